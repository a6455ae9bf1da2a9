//! 各服务共用的身份与课程班权限检查
//!
//! 返回 `Err(HttpResponse)` 时调用方直接把响应返回给客户端。

use std::fmt::Display;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};
use tracing::error;

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    people::entities::{Person, PersonRole},
    sections::entities::Section,
};
use crate::storage::Storage;

/// 记录错误并返回 500
pub(crate) fn internal_error(context: &str, e: impl Display) -> HttpResponse {
    error!("{}: {}", context, e);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {e}"),
    ))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn forbidden(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::SectionPermissionDenied,
        message,
    ))
}

/// 当前登录人员
pub(crate) fn current_person(request: &HttpRequest) -> Result<Person, HttpResponse> {
    RequireJWT::extract_person(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing person",
        ))
    })
}

/// 加载课程班，不存在时返回 404
pub(crate) async fn load_section(
    storage: &Arc<dyn Storage>,
    section_id: i64,
) -> Result<Section, HttpResponse> {
    match storage.get_section_by_id(section_id).await {
        Ok(Some(section)) => Ok(section),
        Ok(None) => Err(not_found(ErrorCode::SectionNotFound, "Section not found")),
        Err(e) => Err(internal_error("Failed to get section", e)),
    }
}

pub(crate) fn is_owner(person: &Person, section: &Section) -> bool {
    person.professor_id == Some(section.professor_id)
}

/// 只有课程班的教师可以修改
pub(crate) fn ensure_owner(person: &Person, section: &Section) -> Result<(), HttpResponse> {
    if is_owner(person, section) {
        Ok(())
    } else {
        Err(forbidden(
            "You do not have permission to manage this section",
        ))
    }
}

/// 加载课程班并要求当前人员是其教师
pub(crate) async fn load_owned_section(
    storage: &Arc<dyn Storage>,
    person: &Person,
    section_id: i64,
) -> Result<Section, HttpResponse> {
    let section = load_section(storage, section_id).await?;
    ensure_owner(person, &section)?;
    Ok(section)
}

/// 教师本人或已选课学生可以查看
pub(crate) async fn ensure_can_view(
    storage: &Arc<dyn Storage>,
    person: &Person,
    section: &Section,
) -> Result<(), HttpResponse> {
    if is_owner(person, section) {
        return Ok(());
    }

    if person.role == PersonRole::Student
        && let Some(student_id) = person.student_id
    {
        match storage.get_enrollment(section.id, student_id).await {
            Ok(Some(_)) => return Ok(()),
            Ok(None) => {}
            Err(e) => return Err(internal_error("Failed to check enrollment", e)),
        }
    }

    Err(forbidden("You do not have access to this section"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(role: PersonRole, professor_id: Option<i64>) -> Person {
        Person {
            id: 1,
            first_names: "Ana".to_string(),
            last_name_paternal: "Quispe".to_string(),
            last_name_maternal: String::new(),
            email: "ana@uni.pe".to_string(),
            password_hash: String::new(),
            role,
            student_id: None,
            student_code: None,
            professor_id,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn section(professor_id: i64) -> Section {
        Section {
            id: 10,
            professor_id,
            course_name: "Algebra".to_string(),
            year: 2025,
            code: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_only_owning_professor_passes() {
        assert!(ensure_owner(&person(PersonRole::Professor, Some(3)), &section(3)).is_ok());

        let denied = ensure_owner(&person(PersonRole::Professor, Some(4)), &section(3));
        assert_eq!(
            denied.unwrap_err().status(),
            actix_web::http::StatusCode::FORBIDDEN
        );
        assert!(ensure_owner(&person(PersonRole::Student, None), &section(3)).is_err());
    }
}
