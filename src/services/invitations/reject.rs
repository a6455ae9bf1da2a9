use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::InvitationService;
use crate::models::{
    ApiResponse, ErrorCode,
    invitations::{entities::InvitationStatus, requests::InvitationTokenRequest},
};
use crate::services::access::{bad_request, current_person, internal_error, not_found};

pub async fn reject_invitation(
    service: &InvitationService,
    request: &HttpRequest,
    token_data: InvitationTokenRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    let invitation = match storage.get_invitation_by_token(token_data.token.trim()).await {
        Ok(Some(invitation)) => invitation,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::InvitationNotFound,
                "Invitation not found",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to get invitation", e)),
    };

    if invitation.status.is_terminal() {
        return Ok(bad_request(
            ErrorCode::InvitationAlreadyProcessed,
            "Invitation has already been used or processed",
        ));
    }
    let now = Utc::now();
    if invitation.is_expired_at(now) {
        if let Err(e) = storage
            .update_invitation_status(invitation.id, InvitationStatus::Expired, None)
            .await
        {
            return Ok(internal_error("Failed to expire invitation", e));
        }
        return Ok(bad_request(
            ErrorCode::InvitationExpired,
            "Invitation has expired",
        ));
    }

    match storage
        .update_invitation_status(invitation.id, InvitationStatus::Rejected, Some(now))
        .await
    {
        Ok(true) => {
            info!(
                "Invitation {} rejected by person {}",
                invitation.id, person.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Invitation rejected")))
        }
        Ok(false) => Ok(bad_request(
            ErrorCode::InvitationAlreadyProcessed,
            "Invitation has already been used or processed",
        )),
        Err(e) => Ok(internal_error("Failed to reject invitation", e)),
    }
}
