use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, auth::MeResponse};
use crate::services::access::current_person;

pub async fn handle_me(request: &HttpRequest) -> ActixResult<HttpResponse> {
    match current_person(request) {
        Ok(person) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MeResponse { person },
            "Current person retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
