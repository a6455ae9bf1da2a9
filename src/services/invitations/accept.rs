use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::InvitationService;
use crate::errors::ScorelyError;
use crate::models::{
    ApiResponse, ErrorCode,
    invitations::{
        entities::InvitationStatus, requests::InvitationTokenRequest,
        responses::AcceptInvitationResponse,
    },
};
use crate::services::access::{bad_request, current_person, internal_error, not_found};

pub async fn accept_invitation(
    service: &InvitationService,
    request: &HttpRequest,
    token_data: InvitationTokenRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };
    let Some(student_id) = person.student_id else {
        return Ok(bad_request(
            ErrorCode::StudentNotFound,
            "Only students can accept invitations",
        ));
    };

    // 1. 查找邀请
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

    // 2. 状态与有效期
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

    // 3. 邀请必须发给当前学生
    if !invitation.email.eq_ignore_ascii_case(person.email.trim()) {
        return Ok(bad_request(
            ErrorCode::InvitationEmailMismatch,
            "Invitation was sent to a different email",
        ));
    }

    // 4. 不允许重复选课
    match storage.get_enrollment(invitation.section_id, student_id).await {
        Ok(Some(_)) => {
            return Ok(bad_request(
                ErrorCode::AlreadyEnrolled,
                "Student is already enrolled in this section",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check enrollment", e)),
    }

    let section = match storage.get_section_by_id(invitation.section_id).await {
        Ok(Some(section)) => section,
        Ok(None) => {
            return Ok(not_found(ErrorCode::SectionNotFound, "Section not found"));
        }
        Err(e) => return Ok(internal_error("Failed to get section", e)),
    };

    // 5. 事务内写入选课并标记 ACEPTADA
    match storage
        .accept_invitation(invitation.id, student_id, now)
        .await
    {
        Ok(enrollment) => {
            info!(
                "Student {} joined section {} through invitation {}",
                student_id, section.id, invitation.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AcceptInvitationResponse {
                    success: true,
                    enrollment_id: enrollment.id,
                    section_id: section.id,
                    course_name: section.course_name,
                },
                "Invitation accepted successfully",
            )))
        }
        Err(ScorelyError::Conflict(msg)) => Ok(bad_request(
            ErrorCode::InvitationAlreadyProcessed,
            msg,
        )),
        Err(ScorelyError::Duplicate(msg)) => Ok(bad_request(ErrorCode::AlreadyEnrolled, msg)),
        Err(e) => Ok(internal_error("Failed to accept invitation", e)),
    }
}
