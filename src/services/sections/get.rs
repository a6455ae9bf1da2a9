use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SectionService;
use crate::models::ApiResponse;
use crate::services::access::{current_person, ensure_can_view, load_section};

pub async fn get_section(
    service: &SectionService,
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

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        section,
        "Section retrieved successfully",
    )))
}
