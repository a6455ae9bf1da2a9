use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::people::entities::PersonRole;
use crate::models::sections::requests::{
    CreateSectionRequest, SectionListQuery, UpdateSectionRequest,
};
use crate::services::SectionService;
use crate::utils::SafeSectionIdI64;

use super::{enrollments, groups, submissions, tasks};

// 懒加载的全局 SECTION_SERVICE 实例
static SECTION_SERVICE: Lazy<SectionService> = Lazy::new(SectionService::new_lazy);

// HTTP处理程序
pub async fn list_sections(
    req: HttpRequest,
    query: web::Query<SectionListQuery>,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE.list_sections(&req, query.into_inner()).await
}

pub async fn create_section(
    req: HttpRequest,
    section_data: web::Json<CreateSectionRequest>,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE
        .create_section(&req, section_data.into_inner())
        .await
}

pub async fn get_section(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE.get_section(&req, section_id.0).await
}

pub async fn update_section(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    update_data: web::Json<UpdateSectionRequest>,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE
        .update_section(&req, section_id.0, update_data.into_inner())
        .await
}

pub async fn delete_section(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE.delete_section(&req, section_id.0).await
}

// 配置路由
//
// 课程班下的任务、学生、小组、成绩都挂在同一个 scope 中
pub fn configure_sections_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/sections")
            .wrap(middlewares::RequireJWT)
            .service(
                // 教师查看自己开设的课程班，学生查看已加入的课程班
                web::resource("").route(web::get().to(list_sections)).route(
                    web::post()
                        .to(create_section)
                        .wrap(middlewares::RequireRole::new_any(PersonRole::professor_roles())),
                ),
            )
            .service(
                web::resource("/{section_id}")
                    .route(web::get().to(get_section))
                    .route(
                        web::put()
                            .to(update_section)
                            .wrap(middlewares::RequireRole::new_any(PersonRole::professor_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_section)
                            .wrap(middlewares::RequireRole::new_any(PersonRole::professor_roles())),
                    ),
            )
            .configure(tasks::configure_section_tasks_routes)
            .configure(enrollments::configure_section_students_routes)
            .configure(submissions::configure_student_grades_routes)
            .configure(groups::configure_section_groups_routes),
    );
}
