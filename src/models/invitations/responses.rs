use super::entities::{Invitation, InvitationStatus};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "invitation.ts")]
pub struct InvitationResponse {
    pub id: i64,
    pub section_id: i64,
    pub email: String,
    pub token: String,
    pub course_name: String,
    pub professor_name: String,
    pub status: InvitationStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl InvitationResponse {
    pub fn new(invitation: Invitation, course_name: String, professor_name: String) -> Self {
        Self {
            id: invitation.id,
            section_id: invitation.section_id,
            email: invitation.email,
            token: invitation.token,
            course_name,
            professor_name,
            status: invitation.status,
            created_at: invitation.created_at,
            expires_at: invitation.expires_at,
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "invitation.ts")]
pub struct InvitationListResponse {
    pub items: Vec<InvitationResponse>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "invitation.ts")]
pub struct AcceptInvitationResponse {
    pub success: bool,
    pub enrollment_id: i64,
    pub section_id: i64,
    pub course_name: String,
}
