//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 时间字段统一保存为 Unix 秒级时间戳。

pub mod prelude;

pub mod enrollments;
pub mod groups;
pub mod individual_submissions;
pub mod invitations;
pub mod persons;
pub mod professors;
pub mod sections;
pub mod students;
pub mod submissions;
pub mod tasks;

use chrono::{DateTime, Utc};

/// 时间戳转换为 UTC 时间
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
