use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PeopleService;
use crate::models::{
    ApiResponse, ErrorCode,
    people::responses::{ProfessorIdResponse, StudentIdResponse},
};
use crate::services::access::{internal_error, not_found};

pub async fn get_student_id(
    service: &PeopleService,
    request: &HttpRequest,
    person_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_person_id(person_id).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentIdResponse {
                student_id: student.id,
                person_id: student.person_id,
                student_code: student.student_code,
            },
            "Student retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::StudentNotFound,
            "No student found for this person",
        )),
        Err(e) => Ok(internal_error("Failed to get student", e)),
    }
}

pub async fn get_professor_id(
    service: &PeopleService,
    request: &HttpRequest,
    person_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_professor_by_person_id(person_id).await {
        Ok(Some(professor)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ProfessorIdResponse {
                professor_id: professor.id,
                person_id: professor.person_id,
            },
            "Professor retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::ProfessorNotFound,
            "No professor found for this person",
        )),
        Err(e) => Ok(internal_error("Failed to get professor", e)),
    }
}
