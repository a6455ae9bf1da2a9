use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "group.ts")]
pub struct Group {
    pub id: i64,
    pub section_id: i64,
    pub name: String,
    pub member_count: i64,
    // 成员平均成绩的平均值
    pub final_average: Option<f64>,
}
