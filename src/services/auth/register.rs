use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::{
    ApiResponse, ErrorCode,
    people::{
        entities::PersonRole,
        requests::{NewPerson, RegisterRequest},
    },
};
use crate::services::access::{bad_request, internal_error};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_required_text};

use super::AuthService;

const MAX_NAME_CHARS: usize = 100;
const MAX_STUDENT_CODE_CHARS: usize = 20;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 校验请求字段
    let new_person = match validate_register_request(register_request) {
        Ok(validated) => validated,
        Err(resp) => return Ok(resp),
    };

    // 2. 邮箱与学号唯一
    if let Err(resp) = check_email_unused(&storage, &new_person.0.email).await {
        return Ok(resp);
    }
    if let Some(code) = &new_person.0.student_code
        && let Err(resp) = check_student_code_unused(&storage, code).await
    {
        return Ok(resp);
    }

    // 3. 哈希密码
    let (mut person, password) = new_person;
    person.password_hash = match hash_password(&password, &config.argon2) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Password hashing failed", e)),
    };

    // 4. 写入人员及角色记录
    match storage.register_person(person).await {
        Ok(person) => {
            info!("Person {} registered as {}", person.id, person.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(person, "Registration successful")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Registration failed: {e}"),
            )),
        ),
    }
}

/// 校验并规范化注册请求，返回待写入的人员与明文密码
fn validate_register_request(req: RegisterRequest) -> Result<(NewPerson, String), HttpResponse> {
    let role = req
        .user_type
        .parse::<PersonRole>()
        .map_err(|msg| bad_request(ErrorCode::InvalidUserType, msg))?;

    let first_names = validate_required_text(&req.first_names, "first_names", MAX_NAME_CHARS)
        .map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    let last_name_paternal =
        validate_required_text(&req.last_name_paternal, "last_name_paternal", MAX_NAME_CHARS)
            .map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    let last_name_maternal = req.last_name_maternal.trim().to_string();
    if last_name_maternal.chars().count() > MAX_NAME_CHARS {
        return Err(bad_request(
            ErrorCode::ValidationFailed,
            format!("last_name_maternal must be at most {MAX_NAME_CHARS} characters"),
        ));
    }

    let email = req.email.trim().to_lowercase();
    validate_email(&email).map_err(|msg| bad_request(ErrorCode::EmailInvalid, msg))?;
    validate_password(&req.password)
        .map_err(|msg| bad_request(ErrorCode::PasswordPolicyViolation, msg))?;

    let student_code = match role {
        PersonRole::Student => {
            let code = req.student_code.as_deref().unwrap_or_default();
            let code = validate_required_text(code, "student_code", MAX_STUDENT_CODE_CHARS)
                .map_err(|msg| bad_request(ErrorCode::StudentCodeRequired, msg))?;
            Some(code)
        }
        PersonRole::Professor => None,
    };

    Ok((
        NewPerson {
            first_names,
            last_name_paternal,
            last_name_maternal,
            email,
            password_hash: String::new(),
            role,
            student_code,
        },
        req.password,
    ))
}

async fn check_email_unused(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_person_by_email(email).await {
        Ok(Some(_)) => Err(bad_request(
            ErrorCode::EmailAlreadyExists,
            "Email already exists",
        )),
        Ok(None) => Ok(()),
        Err(e) => Err(internal_error("Register failed", e)),
    }
}

async fn check_student_code_unused(
    storage: &Arc<dyn Storage>,
    student_code: &str,
) -> Result<(), HttpResponse> {
    match storage.student_code_exists(student_code).await {
        Ok(true) => Err(bad_request(
            ErrorCode::StudentCodeAlreadyExists,
            "Student code already exists",
        )),
        Ok(false) => Ok(()),
        Err(e) => Err(internal_error("Register failed", e)),
    }
}
