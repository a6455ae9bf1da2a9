use super::entities::SectionStudent;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct SectionStudentListResponse {
    pub items: Vec<SectionStudent>,
}
