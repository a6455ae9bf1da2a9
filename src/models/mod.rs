pub mod auth;
pub mod common;
pub mod enrollments;
pub mod groups;
pub mod invitations;
pub mod people;
pub mod sections;
pub mod submissions;
pub mod tasks;

pub use common::response::ApiResponse;

use serde::Serialize;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码，写入 ApiResponse.code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用 1xxx
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1002,
    InternalServerError = 1003,
    RateLimitExceeded = 1004,

    // 认证 2xxx
    Unauthorized = 2000,
    AuthFailed = 2001,
    Forbidden = 2002,

    // 人员 3xxx
    RegisterFailed = 3000,
    EmailAlreadyExists = 3001,
    EmailInvalid = 3002,
    StudentCodeAlreadyExists = 3003,
    StudentCodeRequired = 3004,
    InvalidUserType = 3005,
    PasswordPolicyViolation = 3006,
    PersonNotFound = 3007,
    StudentNotFound = 3008,
    ProfessorNotFound = 3009,

    // 课程班 4xxx
    SectionNotFound = 4000,
    SectionNameDuplicated = 4001,
    SectionPermissionDenied = 4002,
    GroupNotFound = 4100,

    // 任务与成绩 5xxx
    TaskNotFound = 5000,
    SubmissionNotFound = 5100,
    InvalidGrade = 5101,

    // 选课 6xxx
    EnrollmentNotFound = 6000,
    AlreadyEnrolled = 6001,
    NotEnrolled = 6002,

    // 邀请 7xxx
    InvitationNotFound = 7000,
    InvitationAlreadyPending = 7001,
    InvitationExpired = 7002,
    InvitationAlreadyProcessed = 7003,
    InvitationEmailMismatch = 7004,
    InvitationSendFailed = 7005,
}
