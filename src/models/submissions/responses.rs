use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionCreatedResponse {
    pub submission_id: i64,
}

// 某学生在某任务上的最新成绩
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct TaskGradeItem {
    pub task_id: i64,
    pub task_name: String,
    pub submission_id: Option<i64>,
    pub grade: Option<f64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct StudentGradesResponse {
    pub section_id: i64,
    pub student_id: i64,
    pub items: Vec<TaskGradeItem>,
    pub average: Option<f64>,
}
