use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::{InvitationService, build_invitation_response};
use crate::models::{
    ApiResponse, ErrorCode, invitations::entities::InvitationStatus,
};
use crate::services::access::{internal_error, not_found};

pub async fn get_invitation_info(
    service: &InvitationService,
    request: &HttpRequest,
    token: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut invitation = match storage.get_invitation_by_token(token.trim()).await {
        Ok(Some(invitation)) => invitation,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::InvitationNotFound,
                "Invitation not found",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to get invitation", e)),
    };

    // 过期的待处理邀请先标记为 EXPIRADA
    let now = Utc::now();
    if invitation.status == InvitationStatus::Pending && invitation.is_expired_at(now) {
        match storage
            .update_invitation_status(invitation.id, InvitationStatus::Expired, None)
            .await
        {
            Ok(_) => {
                info!("Invitation {} marked as expired", invitation.id);
                invitation.status = InvitationStatus::Expired;
            }
            Err(e) => return Ok(internal_error("Failed to expire invitation", e)),
        }
    }

    match build_invitation_response(&storage, invitation).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Invitation retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
