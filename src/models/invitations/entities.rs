use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 邀请状态，数据库中保存为西语大写字符串
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "invitation.ts")]
pub enum InvitationStatus {
    #[serde(rename = "PENDIENTE")]
    Pending,
    #[serde(rename = "ACEPTADA")]
    Accepted,
    #[serde(rename = "RECHAZADA")]
    Rejected,
    #[serde(rename = "EXPIRADA")]
    Expired,
}

impl InvitationStatus {
    pub const PENDING: &'static str = "PENDIENTE";
    pub const ACCEPTED: &'static str = "ACEPTADA";
    pub const REJECTED: &'static str = "RECHAZADA";
    pub const EXPIRED: &'static str = "EXPIRADA";

    /// 终态不可再变更
    pub fn is_terminal(&self) -> bool {
        !matches!(self, InvitationStatus::Pending)
    }
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InvitationStatus::Pending => Self::PENDING,
            InvitationStatus::Accepted => Self::ACCEPTED,
            InvitationStatus::Rejected => Self::REJECTED,
            InvitationStatus::Expired => Self::EXPIRED,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for InvitationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PENDING => Ok(InvitationStatus::Pending),
            Self::ACCEPTED => Ok(InvitationStatus::Accepted),
            Self::REJECTED => Ok(InvitationStatus::Rejected),
            Self::EXPIRED => Ok(InvitationStatus::Expired),
            _ => Err(format!("Invalid invitation status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "invitation.ts")]
pub struct Invitation {
    pub id: i64,
    pub section_id: i64,
    pub email: String,
    pub token: String,
    pub status: InvitationStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub responded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Invitation {
    pub fn is_expired_at(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        now >= self.expires_at
    }

    /// 仍处于待处理且未过期
    pub fn is_open_at(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.status == InvitationStatus::Pending && !self.is_expired_at(now)
    }
}
