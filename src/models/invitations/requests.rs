use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "invitation.ts")]
pub struct CreateInvitationRequest {
    pub section_id: i64,
    pub email: String,
    /// 邮件中的称呼，缺省时使用已注册学生的姓名
    pub student_name: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "invitation.ts")]
pub struct InvitationTokenQuery {
    pub token: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "invitation.ts")]
pub struct InvitationTokenRequest {
    pub token: String,
}

// 存储层使用
#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub section_id: i64,
    pub email: String,
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}
