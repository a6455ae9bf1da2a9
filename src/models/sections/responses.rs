use super::entities::SectionListItem;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "section.ts")]
pub struct SectionListResponse {
    pub items: Vec<SectionListItem>,
}
