use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct CreateSubmissionRequest {
    pub task_id: i64,
    pub student_id: i64,
    pub grade: Option<f64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct UpdateGradeRequest {
    pub grade: Option<f64>,
}
