pub mod create;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::groups::{entities::Group, requests::CreateGroupRequest};
use crate::services::access::internal_error;
use crate::services::enrollments::section_averages;
use crate::storage::Storage;
use crate::utils::grading::compute_average;

pub(crate) const MAX_GROUP_NAME_CHARS: usize = 20;

pub struct GroupService {
    storage: Option<Arc<dyn Storage>>,
}

impl GroupService {
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

    pub async fn create_group(
        &self,
        request: &HttpRequest,
        section_id: i64,
        group_data: CreateGroupRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_group(self, request, section_id, group_data).await
    }

    pub async fn list_groups(
        &self,
        request: &HttpRequest,
        section_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_groups(self, request, section_id).await
    }

    pub async fn get_group(
        &self,
        request: &HttpRequest,
        section_id: i64,
        group_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_group(self, request, section_id, group_id).await
    }
}

/// 填充小组平均分：成员平均分（非空）的平均值
pub(crate) async fn fill_group_averages(
    storage: &Arc<dyn Storage>,
    section_id: i64,
    groups: &mut [Group],
) -> Result<(), HttpResponse> {
    let students = storage
        .list_section_students(section_id)
        .await
        .map_err(|e| internal_error("Failed to list students", e))?;
    let averages = section_averages(storage, section_id).await?;

    for group in groups.iter_mut() {
        group.final_average = compute_average(
            students
                .iter()
                .filter(|s| s.group_id == Some(group.id))
                .filter_map(|s| averages.get(&s.student_id).copied().flatten()),
        );
    }
    Ok(())
}
