use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::{ApiResponse, ErrorCode, submissions::responses::StudentGradesResponse};
use crate::services::access::{
    current_person, forbidden, internal_error, is_owner, load_section, not_found,
};
use crate::utils::grading::summarize_student_grades;

pub async fn get_student_grades(
    service: &SubmissionService,
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

    // 教师本人或学生自己
    if !is_owner(&person, &section) && person.student_id != Some(student_id) {
        return Ok(forbidden("You do not have access to these grades"));
    }

    match storage.get_enrollment(section_id, student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::EnrollmentNotFound,
                "Student is not enrolled in this section",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to check enrollment", e)),
    }

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

    let (items, average) = summarize_student_grades(&tasks, &submissions);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentGradesResponse {
            section_id,
            student_id,
            items,
            average,
        },
        "Grades retrieved successfully",
    )))
}
