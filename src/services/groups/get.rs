use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GroupService, fill_group_averages};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{
    current_person, ensure_can_view, internal_error, load_section, not_found,
};

pub async fn get_group(
    service: &GroupService,
    request: &HttpRequest,
    section_id: i64,
    group_id: i64,
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

    let group = match storage.get_group_by_id(group_id).await {
        Ok(Some(group)) if group.section_id == section_id => group,
        Ok(_) => return Ok(not_found(ErrorCode::GroupNotFound, "Group not found")),
        Err(e) => return Ok(internal_error("Failed to get group", e)),
    };

    let mut groups = [group];
    if let Err(resp) = fill_group_averages(&storage, section_id, &mut groups).await {
        return Ok(resp);
    }
    let [group] = groups;

    Ok(HttpResponse::Ok().json(ApiResponse::success(group, "Group retrieved successfully")))
}
