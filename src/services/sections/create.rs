use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MAX_COURSE_NAME_CHARS, SectionService, check_name_unused, validate_year};
use crate::models::{ApiResponse, ErrorCode, sections::requests::CreateSectionRequest};
use crate::services::access::{bad_request, current_person, forbidden, internal_error};
use crate::utils::validate::validate_required_text;

pub async fn create_section(
    service: &SectionService,
    request: &HttpRequest,
    section_data: CreateSectionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };
    let Some(professor_id) = person.professor_id else {
        return Ok(forbidden("Only professors can create sections"));
    };

    // 校验课程名与年份
    let course_name = match validate_required_text(
        &section_data.course_name,
        "course_name",
        MAX_COURSE_NAME_CHARS,
    ) {
        Ok(name) => name,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };
    let year = match section_data.year.map(validate_year) {
        Some(Ok(year)) => year,
        Some(Err(msg)) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
        None => return Ok(bad_request(ErrorCode::ValidationFailed, "year is required")),
    };

    if let Err(resp) = check_name_unused(&storage, professor_id, year, &course_name, None).await {
        return Ok(resp);
    }

    let section_data = CreateSectionRequest {
        course_name,
        year: Some(year),
        code: section_data.code,
    };

    match storage.create_section(professor_id, section_data).await {
        Ok(section) => {
            info!(
                "Section {} ({}) created by professor {}",
                section.id, section.course_name, professor_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(section, "Section created successfully")))
        }
        Err(e) => Ok(internal_error("Section creation failed", e)),
    }
}
