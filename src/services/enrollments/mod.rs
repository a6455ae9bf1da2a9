pub mod assign_group;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{
    enrollments::requests::AssignGroupRequest, submissions::entities::Submission,
};
use crate::services::access::internal_error;
use crate::storage::Storage;
use crate::utils::grading::student_average;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
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

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        section_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, section_id).await
    }

    pub async fn get_student(
        &self,
        request: &HttpRequest,
        section_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, request, section_id, student_id).await
    }

    pub async fn assign_group(
        &self,
        request: &HttpRequest,
        section_id: i64,
        student_id: i64,
        group_data: AssignGroupRequest,
    ) -> ActixResult<HttpResponse> {
        assign_group::assign_group(self, request, section_id, student_id, group_data).await
    }
}

/// 计算课程班内每个学生的平均分，键为学生ID
pub(crate) async fn section_averages(
    storage: &Arc<dyn Storage>,
    section_id: i64,
) -> Result<HashMap<i64, Option<f64>>, HttpResponse> {
    let tasks = storage
        .list_tasks_by_section(section_id)
        .await
        .map_err(|e| internal_error("Failed to list tasks", e))?;
    let submissions = storage
        .list_section_submissions(section_id, None)
        .await
        .map_err(|e| internal_error("Failed to list submissions", e))?;

    let mut by_student: HashMap<i64, Vec<Submission>> = HashMap::new();
    for submission in submissions {
        by_student
            .entry(submission.student_id)
            .or_default()
            .push(submission);
    }

    Ok(by_student
        .into_iter()
        .map(|(student_id, subs)| (student_id, student_average(&tasks, &subs)))
        .collect())
}
