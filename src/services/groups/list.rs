use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GroupService, fill_group_averages};
use crate::models::{ApiResponse, groups::responses::GroupListResponse};
use crate::services::access::{current_person, ensure_can_view, internal_error, load_section};

pub async fn list_groups(
    service: &GroupService,
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

    let mut items = match storage.list_groups_by_section(section_id).await {
        Ok(items) => items,
        Err(e) => return Ok(internal_error("Failed to list groups", e)),
    };
    if let Err(resp) = fill_group_averages(&storage, section_id, &mut items).await {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GroupListResponse { items },
        "Groups retrieved successfully",
    )))
}
