use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::{InvitationService, build_invitation_response};
use crate::models::{ApiResponse, invitations::responses::InvitationListResponse};
use crate::services::access::{current_person, internal_error};

pub async fn list_pending(
    service: &InvitationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    let invitations = match storage
        .list_open_invitations_by_email(&person.email.to_lowercase(), Utc::now())
        .await
    {
        Ok(invitations) => invitations,
        Err(e) => return Ok(internal_error("Failed to list invitations", e)),
    };

    let mut items = Vec::with_capacity(invitations.len());
    for invitation in invitations {
        match build_invitation_response(&storage, invitation).await {
            Ok(item) => items.push(item),
            Err(resp) => return Ok(resp),
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        InvitationListResponse { items },
        "Invitations retrieved successfully",
    )))
}
