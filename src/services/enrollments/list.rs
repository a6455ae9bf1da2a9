use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EnrollmentService, section_averages};
use crate::models::{ApiResponse, enrollments::responses::SectionStudentListResponse};
use crate::services::access::{current_person, ensure_can_view, internal_error, load_section};

pub async fn list_students(
    service: &EnrollmentService,
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

    let mut items = match storage.list_section_students(section_id).await {
        Ok(items) => items,
        Err(e) => return Ok(internal_error("Failed to list students", e)),
    };

    let averages = match section_averages(&storage, section_id).await {
        Ok(averages) => averages,
        Err(resp) => return Ok(resp),
    };
    for item in &mut items {
        item.final_average = averages.get(&item.student_id).copied().flatten();
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SectionStudentListResponse { items },
        "Students retrieved successfully",
    )))
}
