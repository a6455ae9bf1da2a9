use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MAX_TASK_KIND_CHARS, MAX_TASK_NAME_CHARS, TaskService};
use crate::models::{ApiResponse, ErrorCode, tasks::requests::CreateTaskRequest};
use crate::services::access::{bad_request, current_person, internal_error, load_owned_section};
use crate::utils::validate::validate_required_text;

pub async fn create_task(
    service: &TaskService,
    request: &HttpRequest,
    section_id: i64,
    task_data: CreateTaskRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = load_owned_section(&storage, &person, section_id).await {
        return Ok(resp);
    }

    let name = match validate_required_text(&task_data.name, "name", MAX_TASK_NAME_CHARS) {
        Ok(name) => name,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };
    let kind = match validate_required_text(&task_data.kind, "kind", MAX_TASK_KIND_CHARS) {
        Ok(kind) => kind,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };

    let task_data = CreateTaskRequest {
        name,
        kind,
        ..task_data
    };

    match storage.create_task(section_id, task_data).await {
        Ok(task) => {
            info!("Task {} created in section {}", task.id, section_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(task, "Task created successfully")))
        }
        Err(e) => Ok(internal_error("Task creation failed", e)),
    }
}
