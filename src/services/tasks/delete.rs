use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TaskService, load_owned_task};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_person, internal_error, not_found};

pub async fn delete_task(
    service: &TaskService,
    request: &HttpRequest,
    task_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = load_owned_task(&storage, &person, task_id).await {
        return Ok(resp);
    }

    match storage.delete_task(task_id).await {
        Ok(true) => {
            info!("Task {} deleted by person {}", task_id, person.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Task deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::TaskNotFound, "Task not found")),
        Err(e) => Ok(internal_error("Task deletion failed", e)),
    }
}
