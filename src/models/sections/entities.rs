use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "section.ts")]
pub struct Section {
    pub id: i64,
    // 所属教师ID
    pub professor_id: i64,
    pub course_name: String,
    pub year: i32,
    // 课程编号（可选）
    pub code: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 列表项，附带教师姓名
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "section.ts")]
pub struct SectionListItem {
    pub id: i64,
    pub professor_id: i64,
    pub professor_name: String,
    pub course_name: String,
    pub year: i32,
    pub code: Option<i32>,
}

impl SectionListItem {
    pub fn from_section(section: Section, professor_name: String) -> Self {
        Self {
            id: section.id,
            professor_id: section.professor_id,
            professor_name,
            course_name: section.course_name,
            year: section.year,
            code: section.code,
        }
    }
}
