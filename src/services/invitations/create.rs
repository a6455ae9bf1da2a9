use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Duration, Utc};
use tracing::{error, info, warn};

use super::InvitationService;
use crate::errors::ScorelyError;
use crate::models::{
    ApiResponse, ErrorCode,
    invitations::{
        requests::{CreateInvitationRequest, NewInvitation},
        responses::InvitationResponse,
    },
    people::entities::PersonRole,
};
use crate::services::access::{bad_request, current_person, internal_error, load_owned_section};
use crate::services::mail::{InvitationEmail, MailMessage};
use crate::utils::validate::validate_email;

pub async fn create_invitation(
    service: &InvitationService,
    request: &HttpRequest,
    invitation_data: CreateInvitationRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    // 1. 课程班存在且属于当前教师
    let section = match load_owned_section(&storage, &person, invitation_data.section_id).await {
        Ok(section) => section,
        Err(resp) => return Ok(resp),
    };

    // 2. 校验邮箱
    let email = invitation_data.email.trim().to_lowercase();
    if let Err(msg) = validate_email(&email) {
        return Ok(bad_request(ErrorCode::EmailInvalid, msg));
    }

    let now = Utc::now();

    // 3. 不允许重复的待处理邀请
    match storage.find_open_invitation(&email, section.id, now).await {
        Ok(Some(_)) => {
            return Ok(bad_request(
                ErrorCode::InvitationAlreadyPending,
                "A pending invitation already exists for this email",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check invitations", e)),
    }

    // 4. 已选课的学生不再邀请
    let invitee = match storage.get_person_by_email(&email).await {
        Ok(invitee) => invitee,
        Err(e) => return Ok(internal_error("Failed to get person", e)),
    };
    if let Some(student_id) = invitee
        .as_ref()
        .filter(|p| p.role == PersonRole::Student)
        .and_then(|p| p.student_id)
    {
        match storage.get_enrollment(section.id, student_id).await {
            Ok(Some(_)) => {
                return Ok(bad_request(
                    ErrorCode::AlreadyEnrolled,
                    "Student is already enrolled in this section",
                ));
            }
            Ok(None) => {}
            Err(e) => return Ok(internal_error("Failed to check enrollment", e)),
        }
    }

    // 5. 保存邀请
    let token = service.generate_token();
    let invitation = match storage
        .create_invitation(NewInvitation {
            section_id: section.id,
            email: email.clone(),
            token: token.clone(),
            expires_at: now + Duration::hours(config.invitation.expiry_hours),
        })
        .await
    {
        Ok(invitation) => invitation,
        Err(e) => return Ok(internal_error("Invitation creation failed", e)),
    };

    // 6. 渲染并发送邮件，失败时撤回邀请
    let student_name = invitation_data
        .student_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .or_else(|| invitee.as_ref().map(|p| p.full_name()))
        .unwrap_or_else(|| email.clone());
    let link = config.invitation_link(&token);
    let mail = InvitationEmail {
        student_name: &student_name,
        course: &section.course_name,
        link: &link,
    };

    let sent = match (mail.render(), service.get_mailer(request)) {
        (Ok(html_body), Some(mailer)) => {
            mailer
                .send(MailMessage {
                    to: email.clone(),
                    subject: mail.subject(),
                    html_body,
                })
                .await
        }
        (Ok(_), None) => Err(ScorelyError::mail("Mailer not found in app data")),
        (Err(e), _) => Err(e),
    };

    if let Err(e) = sent {
        error!("Failed to send invitation {} to {}: {}", invitation.id, email, e);
        if let Err(e) = storage.delete_invitation(invitation.id).await {
            warn!("Failed to roll back invitation {}: {}", invitation.id, e);
        }
        return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InvitationSendFailed,
            "Failed to send invitation email",
        )));
    }

    info!(
        "Invitation {} sent to {} for section {}",
        invitation.id, email, section.id
    );

    let response = InvitationResponse::new(invitation, section.course_name, person.full_name());
    Ok(HttpResponse::Created().json(ApiResponse::success(
        response,
        "Invitation sent successfully",
    )))
}
