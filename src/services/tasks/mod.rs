pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ErrorCode,
    people::entities::Person,
    sections::entities::Section,
    tasks::{
        entities::Task,
        requests::{CreateTaskRequest, UpdateTaskRequest},
    },
};
use crate::services::access::{ensure_owner, internal_error, load_section, not_found};
use crate::storage::Storage;

pub(crate) const MAX_TASK_NAME_CHARS: usize = 100;
pub(crate) const MAX_TASK_KIND_CHARS: usize = 10;

pub struct TaskService {
    storage: Option<Arc<dyn Storage>>,
}

impl TaskService {
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

    pub async fn create_task(
        &self,
        request: &HttpRequest,
        section_id: i64,
        task_data: CreateTaskRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_task(self, request, section_id, task_data).await
    }

    pub async fn list_tasks(
        &self,
        request: &HttpRequest,
        section_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_tasks(self, request, section_id).await
    }

    pub async fn get_task(&self, request: &HttpRequest, task_id: i64) -> ActixResult<HttpResponse> {
        get::get_task(self, request, task_id).await
    }

    pub async fn update_task(
        &self,
        request: &HttpRequest,
        task_id: i64,
        update_data: UpdateTaskRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_task(self, request, task_id, update_data).await
    }

    pub async fn delete_task(
        &self,
        request: &HttpRequest,
        task_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_task(self, request, task_id).await
    }
}

/// 加载任务及其课程班
pub(crate) async fn load_task_with_section(
    storage: &Arc<dyn Storage>,
    task_id: i64,
) -> Result<(Task, Section), HttpResponse> {
    let task = match storage.get_task_by_id(task_id).await {
        Ok(Some(task)) => task,
        Ok(None) => return Err(not_found(ErrorCode::TaskNotFound, "Task not found")),
        Err(e) => return Err(internal_error("Failed to get task", e)),
    };
    let section = load_section(storage, task.section_id).await?;
    Ok((task, section))
}

/// 加载任务，并要求当前人员是课程班教师
pub(crate) async fn load_owned_task(
    storage: &Arc<dyn Storage>,
    person: &Person,
    task_id: i64,
) -> Result<(Task, Section), HttpResponse> {
    let (task, section) = load_task_with_section(storage, task_id).await?;
    ensure_owner(person, &section)?;
    Ok((task, section))
}
