use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 一次提交，通过个人提交关联到学生
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct Submission {
    pub id: i64,
    pub task_id: i64,
    pub student_id: i64,
    pub grade: Option<f64>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
