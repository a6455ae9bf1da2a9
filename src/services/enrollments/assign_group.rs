use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::models::{ApiResponse, ErrorCode, enrollments::requests::AssignGroupRequest};
use crate::services::access::{current_person, internal_error, load_owned_section, not_found};

pub async fn assign_group(
    service: &EnrollmentService,
    request: &HttpRequest,
    section_id: i64,
    student_id: i64,
    group_data: AssignGroupRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = load_owned_section(&storage, &person, section_id).await {
        return Ok(resp);
    }

    // 小组必须属于同一课程班
    if let Some(group_id) = group_data.group_id {
        match storage.get_group_by_id(group_id).await {
            Ok(Some(group)) if group.section_id == section_id => {}
            Ok(_) => return Ok(not_found(ErrorCode::GroupNotFound, "Group not found")),
            Err(e) => return Ok(internal_error("Failed to get group", e)),
        }
    }

    match storage
        .set_enrollment_group(section_id, student_id, group_data.group_id)
        .await
    {
        Ok(true) => {
            info!(
                "Student {} of section {} assigned to group {:?}",
                student_id, section_id, group_data.group_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Group assigned successfully")))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::EnrollmentNotFound,
            "Student is not enrolled in this section",
        )),
        Err(e) => Ok(internal_error("Group assignment failed", e)),
    }
}
