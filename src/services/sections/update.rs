use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MAX_COURSE_NAME_CHARS, SectionService, check_name_unused, validate_year};
use crate::models::{ApiResponse, ErrorCode, sections::requests::UpdateSectionRequest};
use crate::services::access::{
    bad_request, current_person, internal_error, load_owned_section, not_found,
};
use crate::utils::validate::validate_required_text;

pub async fn update_section(
    service: &SectionService,
    request: &HttpRequest,
    section_id: i64,
    update_data: UpdateSectionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    let section = match load_owned_section(&storage, &person, section_id).await {
        Ok(section) => section,
        Err(resp) => return Ok(resp),
    };

    // 校验修改后的字段
    let course_name = match &update_data.course_name {
        Some(name) => match validate_required_text(name, "course_name", MAX_COURSE_NAME_CHARS) {
            Ok(name) => Some(name),
            Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
        },
        None => None,
    };
    let year = match update_data.year.map(validate_year).transpose() {
        Ok(year) => year,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };

    // 以修改后的课程名与年份检查重名，排除自身
    let effective_name = course_name.as_deref().unwrap_or(&section.course_name);
    let effective_year = year.unwrap_or(section.year);
    if let Err(resp) = check_name_unused(
        &storage,
        section.professor_id,
        effective_year,
        effective_name,
        Some(section.id),
    )
    .await
    {
        return Ok(resp);
    }

    let update_data = UpdateSectionRequest {
        course_name,
        year,
        code: update_data.code,
    };

    match storage.update_section(section_id, update_data).await {
        Ok(Some(section)) => {
            info!("Section {} updated", section.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                section,
                "Section updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::SectionNotFound, "Section not found")),
        Err(e) => Ok(internal_error("Section update failed", e)),
    }
}
