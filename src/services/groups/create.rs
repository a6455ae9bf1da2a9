use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GroupService, MAX_GROUP_NAME_CHARS};
use crate::models::{ApiResponse, ErrorCode, groups::requests::CreateGroupRequest};
use crate::services::access::{bad_request, current_person, internal_error, load_owned_section};
use crate::utils::validate::validate_required_text;

pub async fn create_group(
    service: &GroupService,
    request: &HttpRequest,
    section_id: i64,
    group_data: CreateGroupRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = load_owned_section(&storage, &person, section_id).await {
        return Ok(resp);
    }

    let name = match validate_required_text(&group_data.name, "name", MAX_GROUP_NAME_CHARS) {
        Ok(name) => name,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };

    match storage.create_group(section_id, &name).await {
        Ok(group) => {
            info!("Group {} created in section {}", group.id, section_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(group, "Group created successfully")))
        }
        Err(e) => Ok(internal_error("Group creation failed", e)),
    }
}
