pub mod extractor;
pub mod grading;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod token;
pub mod validate;

pub use extractor::{
    SafeGroupIdI64, SafePersonIdI64, SafeSectionIdI64, SafeStudentIdI64, SafeSubmissionIdI64,
    SafeTaskIdI64,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
