use crate::cache::{ObjectCache, create_cache};
use crate::errors::Result;
use crate::services::mail::{Mailer, create_mailer};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub mailer: Arc<dyn Mailer>,
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和邮件发送器
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // SMTP 与数据库连接共用 rustls
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    let cache = create_cache();
    warn!("Cache backend initialized");

    let mailer = create_mailer()?;
    warn!("Mailer initialized");

    Ok(StartupContext {
        storage,
        cache,
        mailer,
    })
}
