//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_scorely_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ScorelyError {
            $($variant(String),)*
        }

        impl ScorelyError {
            pub fn code(&self) -> &'static str {
                match self {
                    $(ScorelyError::$variant(_) => $code,)*
                }
            }

            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ScorelyError::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(ScorelyError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl ScorelyError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ScorelyError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_scorely_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "Resource Conflict"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
    Template("E011", "Template Error"),
    Mail("E012", "Mail Delivery Error"),
    Io("E013", "IO Error"),
    Duplicate("E014", "Duplicate Record"),
}

impl ScorelyError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ScorelyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ScorelyError {}

impl From<sea_orm::DbErr> for ScorelyError {
    fn from(err: sea_orm::DbErr) -> Self {
        ScorelyError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ScorelyError {
    fn from(err: std::io::Error) -> Self {
        ScorelyError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ScorelyError {
    fn from(err: serde_json::Error) -> Self {
        ScorelyError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ScorelyError {
    fn from(err: chrono::ParseError) -> Self {
        ScorelyError::DateParse(err.to_string())
    }
}

impl From<lettre::error::Error> for ScorelyError {
    fn from(err: lettre::error::Error) -> Self {
        ScorelyError::Mail(err.to_string())
    }
}

impl From<lettre::address::AddressError> for ScorelyError {
    fn from(err: lettre::address::AddressError) -> Self {
        ScorelyError::Mail(format!("Invalid mail address: {err}"))
    }
}

impl From<lettre::transport::smtp::Error> for ScorelyError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        ScorelyError::Mail(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScorelyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ScorelyError::database_config("test").code(), "E001");
        assert_eq!(ScorelyError::validation("test").code(), "E004");
        assert_eq!(ScorelyError::not_found("test").code(), "E005");
        assert_eq!(ScorelyError::mail("test").code(), "E012");
        assert_eq!(ScorelyError::duplicate("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ScorelyError::conflict("test").error_type(),
            "Resource Conflict"
        );
        assert_eq!(
            ScorelyError::template("test").error_type(),
            "Template Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = ScorelyError::validation("Grade out of range");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Grade out of range"));
    }

    #[test]
    fn test_db_err_conversion() {
        let err: ScorelyError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("boom"));
    }
}
