pub mod create;
pub mod grades;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{CreateSubmissionRequest, UpdateGradeRequest};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 登记带成绩的提交
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        submission_data: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, submission_data).await
    }

    // 按提交ID修改成绩
    pub async fn update_submission_grade(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        grade_data: UpdateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_submission_grade(self, request, submission_id, grade_data).await
    }

    // 修改学生在某任务上最新提交的成绩
    pub async fn update_latest_grade(
        &self,
        request: &HttpRequest,
        task_id: i64,
        student_id: i64,
        grade_data: UpdateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_latest_grade(self, request, task_id, student_id, grade_data).await
    }

    // 学生在课程班内各任务的成绩及平均分
    pub async fn get_student_grades(
        &self,
        request: &HttpRequest,
        section_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        grades::get_student_grades(self, request, section_id, student_id).await
    }
}
