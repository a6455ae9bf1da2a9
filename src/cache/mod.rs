//! 对象缓存
//!
//! 目前只有 Moka 内存实现，JWT 中间件用它缓存已认证的人员信息。

pub mod moka;
pub mod traits;

use std::sync::Arc;

pub use moka::MokaCacheWrapper;
pub use traits::{CacheResult, ObjectCache, get_json, insert_json};

use crate::config::AppConfig;

/// 按配置创建缓存实例
pub fn create_cache() -> Arc<dyn ObjectCache> {
    let config = AppConfig::get();
    Arc::new(MokaCacheWrapper::new(
        config.cache.memory.max_capacity,
        config.cache.default_ttl,
    ))
}
