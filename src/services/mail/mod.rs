//! 邮件发送
//!
//! 服务层只依赖 `Mailer` trait。启用 SMTP 时使用 `SmtpMailer`，否则使用只写日志的 `LogMailer`。

pub mod smtp;
pub mod template;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::errors::Result;

pub use smtp::SmtpMailer;
pub use template::InvitationEmail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<()>;
}

/// 未启用 SMTP 时使用，只记录日志
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<()> {
        info!(
            "Mail delivery disabled, skipping mail to {} with subject {:?}",
            message.to, message.subject
        );
        Ok(())
    }
}

/// 按配置创建邮件发送器
pub fn create_mailer() -> Result<Arc<dyn Mailer>> {
    let config = &AppConfig::get().mail;
    if config.enabled {
        warn!(
            "SMTP mailer enabled: {}:{}",
            config.smtp_host, config.smtp_port
        );
        Ok(Arc::new(SmtpMailer::from_config(config)?))
    } else {
        warn!("SMTP mailer disabled, mails will only be logged");
        Ok(Arc::new(LogMailer))
    }
}
