use serde::Deserialize;
use ts_rs::TS;

// group_id 为空表示移出小组
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct AssignGroupRequest {
    pub group_id: Option<i64>,
}
