use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::people::entities::PersonRole;
use crate::models::submissions::requests::{CreateSubmissionRequest, UpdateGradeRequest};
use crate::services::SubmissionService;
use crate::utils::{SafeSectionIdI64, SafeStudentIdI64, SafeSubmissionIdI64, SafeTaskIdI64};

// 懒加载的全局 SUBMISSION_SERVICE 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn create_submission(
    req: HttpRequest,
    submission_data: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, submission_data.into_inner())
        .await
}

pub async fn update_submission_grade(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
    grade_data: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .update_submission_grade(&req, submission_id.0, grade_data.into_inner())
        .await
}

pub async fn update_latest_grade(
    req: HttpRequest,
    task_id: SafeTaskIdI64,
    student_id: SafeStudentIdI64,
    grade_data: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .update_latest_grade(&req, task_id.0, student_id.0, grade_data.into_inner())
        .await
}

pub async fn get_student_grades(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_student_grades(&req, section_id.0, student_id.0)
        .await
}

// 挂在 /api/v1/sections 下
pub fn configure_student_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/{section_id}/students/{student_id}/grades",
        web::get().to(get_student_grades),
    );
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            // 后添加的中间件先执行，先认证再检查角色
            .wrap(middlewares::RequireRole::new_any(PersonRole::professor_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_submission))
            .route(
                "/{submission_id}/grade",
                web::put().to(update_submission_grade),
            ),
    );
}
