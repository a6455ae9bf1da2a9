use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "person.ts")]
pub struct StudentIdResponse {
    pub student_id: i64,
    pub person_id: i64,
    pub student_code: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "person.ts")]
pub struct ProfessorIdResponse {
    pub professor_id: i64,
    pub person_id: i64,
}
