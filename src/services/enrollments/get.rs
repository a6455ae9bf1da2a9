use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{
    current_person, ensure_can_view, internal_error, load_section, not_found,
};
use crate::utils::grading::student_average;

pub async fn get_student(
    service: &EnrollmentService,
    request: &HttpRequest,
    section_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    let section = match load_section(&storage, section_id).await {
        Ok(section) => section,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_can_view(&storage, &person, &section).await {
        return Ok(resp);
    }

    let mut student = match storage.get_section_student(section_id, student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::EnrollmentNotFound,
                "Student is not enrolled in this section",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to get student", e)),
    };

    let tasks = match storage.list_tasks_by_section(section_id).await {
        Ok(tasks) => tasks,
        Err(e) => return Ok(internal_error("Failed to list tasks", e)),
    };
    let submissions = match storage
        .list_section_submissions(section_id, Some(student_id))
        .await
    {
        Ok(submissions) => submissions,
        Err(e) => return Ok(internal_error("Failed to list submissions", e)),
    };
    student.final_average = student_average(&tasks, &submissions);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        student,
        "Student retrieved successfully",
    )))
}
