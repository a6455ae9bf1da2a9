use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::models::{
    ApiResponse, ErrorCode,
    submissions::{requests::CreateSubmissionRequest, responses::SubmissionCreatedResponse},
};
use crate::services::access::{bad_request, current_person, internal_error, not_found};
use crate::services::tasks::load_owned_task;
use crate::utils::grading::validate_grade;

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_data: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let person = match current_person(request) {
        Ok(person) => person,
        Err(resp) => return Ok(resp),
    };

    let grade = match validate_grade(submission_data.grade) {
        Ok(grade) => grade,
        Err(msg) => return Ok(bad_request(ErrorCode::InvalidGrade, msg)),
    };

    let (task, section) = match load_owned_task(&storage, &person, submission_data.task_id).await
    {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };

    match storage.get_student_by_id(submission_data.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(internal_error("Failed to get student", e)),
    }

    match storage
        .get_enrollment(section.id, submission_data.student_id)
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(bad_request(
                ErrorCode::NotEnrolled,
                "Student is not enrolled in this section",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to check enrollment", e)),
    }

    match storage
        .create_graded_submission(task.id, submission_data.student_id, grade)
        .await
    {
        Ok(submission) => {
            info!(
                "Submission {} registered for task {} and student {}",
                submission.id, task.id, submission.student_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                SubmissionCreatedResponse {
                    submission_id: submission.id,
                },
                "Submission created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Submission creation failed", e)),
    }
}
