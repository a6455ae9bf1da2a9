use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SectionService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_person, internal_error, load_owned_section, not_found};

pub async fn delete_section(
    service: &SectionService,
    request: &HttpRequest,
    section_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = load_owned_section(&storage, &person, section_id).await {
        return Ok(resp);
    }

    match storage.delete_section(section_id).await {
        Ok(true) => {
            info!("Section {} deleted by person {}", section_id, person.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Section deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::SectionNotFound, "Section not found")),
        Err(e) => Ok(internal_error("Section deletion failed", e)),
    }
}
