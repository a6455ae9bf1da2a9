use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::models::{ErrorCode, submissions::requests::UpdateGradeRequest};
use crate::services::access::{bad_request, current_person, internal_error, not_found};
use crate::services::tasks::load_owned_task;
use crate::utils::grading::validate_grade;

pub async fn update_submission_grade(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    grade_data: UpdateGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    let grade = match validate_grade(grade_data.grade) {
        Ok(grade) => grade,
        Err(msg) => return Ok(bad_request(ErrorCode::InvalidGrade, msg)),
    };

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to get submission", e)),
    };

    if let Err(resp) = load_owned_task(&storage, &person, submission.task_id).await {
        return Ok(resp);
    }

    match storage.update_submission_grade(submission_id, grade).await {
        Ok(true) => {
            info!("Submission {} graded with {}", submission_id, grade);
            Ok(HttpResponse::NoContent().finish())
        }
        Ok(false) => Ok(not_found(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        )),
        Err(e) => Ok(internal_error("Grade update failed", e)),
    }
}

pub async fn update_latest_grade(
    service: &SubmissionService,
    request: &HttpRequest,
    task_id: i64,
    student_id: i64,
    grade_data: UpdateGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    let grade = match validate_grade(grade_data.grade) {
        Ok(grade) => grade,
        Err(msg) => return Ok(bad_request(ErrorCode::InvalidGrade, msg)),
    };

    if let Err(resp) = load_owned_task(&storage, &person, task_id).await {
        return Ok(resp);
    }

    let latest = match storage.get_latest_submission(task_id, student_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::SubmissionNotFound,
                "Student has no submission for this task",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to get latest submission", e)),
    };

    match storage.update_submission_grade(latest.id, grade).await {
        Ok(true) => {
            info!(
                "Latest submission {} of student {} on task {} graded with {}",
                latest.id, student_id, task_id, grade
            );
            Ok(HttpResponse::NoContent().finish())
        }
        Ok(false) => Ok(not_found(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        )),
        Err(e) => Ok(internal_error("Grade update failed", e)),
    }
}
