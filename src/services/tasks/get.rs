use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TaskService, load_task_with_section};
use crate::models::ApiResponse;
use crate::services::access::{current_person, ensure_can_view};

pub async fn get_task(
    service: &TaskService,
    request: &HttpRequest,
    task_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    let (task, section) = match load_task_with_section(&storage, task_id).await {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_can_view(&storage, &person, &section).await {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(task, "Task retrieved successfully")))
}
