use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SectionService;
use crate::models::{
    ApiResponse,
    sections::{
        entities::SectionListItem, requests::SectionListQuery, responses::SectionListResponse,
    },
};
use crate::services::access::{current_person, internal_error};

pub async fn list_sections(
    service: &SectionService,
    request: &HttpRequest,
    query: SectionListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    let items = if let Some(professor_id) = person.professor_id {
        let professor_name = person.full_name();
        storage
            .list_sections_by_professor(professor_id, query.year)
            .await
            .map(|sections| {
                sections
                    .into_iter()
                    .map(|s| SectionListItem::from_section(s, professor_name.clone()))
                    .collect()
            })
    } else if let Some(student_id) = person.student_id {
        storage
            .list_sections_by_student(student_id, query.year)
            .await
    } else {
        Ok(vec![])
    };

    match items {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SectionListResponse { items },
            "Sections retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list sections", e)),
    }
}
