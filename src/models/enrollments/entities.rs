use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub section_id: i64,
    pub group_id: Option<i64>,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

// 课程班中的学生
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct SectionStudent {
    pub student_id: i64,
    pub person_id: i64,
    pub full_name: String,
    pub first_names: String,
    pub surnames: String,
    pub email: String,
    pub student_code: String,
    pub group_id: Option<i64>,
    pub final_average: Option<f64>,
    pub section_id: i64,
    pub course_name: String,
}
