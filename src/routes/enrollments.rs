use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::AssignGroupRequest;
use crate::models::people::entities::PersonRole;
use crate::services::EnrollmentService;
use crate::utils::{SafeSectionIdI64, SafeStudentIdI64};

// 懒加载的全局 ENROLLMENT_SERVICE 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.list_students(&req, section_id.0).await
}

pub async fn get_student(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .get_student(&req, section_id.0, student_id.0)
        .await
}

pub async fn assign_group(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    student_id: SafeStudentIdI64,
    group_data: web::Json<AssignGroupRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .assign_group(&req, section_id.0, student_id.0, group_data.into_inner())
        .await
}

// 挂在 /api/v1/sections 下
pub fn configure_section_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{section_id}/students", web::get().to(list_students))
        .route(
            "/{section_id}/students/{student_id}",
            web::get().to(get_student),
        )
        .service(
            web::resource("/{section_id}/students/{student_id}/group").route(
                web::put()
                    .to(assign_group)
                    .wrap(middlewares::RequireRole::new_any(PersonRole::professor_roles())),
            ),
        );
}
