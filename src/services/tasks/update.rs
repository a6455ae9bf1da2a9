use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MAX_TASK_KIND_CHARS, MAX_TASK_NAME_CHARS, TaskService, load_owned_task};
use crate::models::{ApiResponse, ErrorCode, tasks::requests::UpdateTaskRequest};
use crate::services::access::{bad_request, current_person, internal_error, not_found};
use crate::utils::validate::validate_required_text;

pub async fn update_task(
    service: &TaskService,
    request: &HttpRequest,
    task_id: i64,
    update_data: UpdateTaskRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = load_owned_task(&storage, &person, task_id).await {
        return Ok(resp);
    }

    let name = match update_data
        .name
        .as_deref()
        .map(|name| validate_required_text(name, "name", MAX_TASK_NAME_CHARS))
        .transpose()
    {
        Ok(name) => name,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };
    let kind = match update_data
        .kind
        .as_deref()
        .map(|kind| validate_required_text(kind, "kind", MAX_TASK_KIND_CHARS))
        .transpose()
    {
        Ok(kind) => kind,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };

    let update_data = UpdateTaskRequest {
        name,
        kind,
        ..update_data
    };

    match storage.update_task(task_id, update_data).await {
        Ok(Some(task)) => {
            info!("Task {} updated", task.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(task, "Task updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::TaskNotFound, "Task not found")),
        Err(e) => Ok(internal_error("Task update failed", e)),
    }
}
