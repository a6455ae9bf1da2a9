use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TaskService;
use crate::models::{ApiResponse, tasks::responses::TaskListResponse};
use crate::services::access::{current_person, ensure_can_view, internal_error, load_section};

pub async fn list_tasks(
    service: &TaskService,
    request: &HttpRequest,
    section_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    let section = match load_section(&storage, section_id).await {
        Ok(section) => section,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_can_view(&storage, &person, &section).await {
        return Ok(resp);
    }

    match storage.list_tasks_by_section(section_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TaskListResponse { items },
            "Tasks retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list tasks", e)),
    }
}
