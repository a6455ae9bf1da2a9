use super::entities::Task;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "task.ts")]
pub struct TaskListResponse {
    pub items: Vec<Task>,
}
