use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::people::entities::PersonRole;
use crate::models::tasks::requests::{CreateTaskRequest, UpdateTaskRequest};
use crate::services::TaskService;
use crate::utils::{SafeSectionIdI64, SafeTaskIdI64};

use super::submissions;

// 懒加载的全局 TASK_SERVICE 实例
static TASK_SERVICE: Lazy<TaskService> = Lazy::new(TaskService::new_lazy);

pub async fn list_tasks(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE.list_tasks(&req, section_id.0).await
}

pub async fn create_task(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    task_data: web::Json<CreateTaskRequest>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE
        .create_task(&req, section_id.0, task_data.into_inner())
        .await
}

pub async fn get_task(req: HttpRequest, task_id: SafeTaskIdI64) -> ActixResult<HttpResponse> {
    TASK_SERVICE.get_task(&req, task_id.0).await
}

pub async fn update_task(
    req: HttpRequest,
    task_id: SafeTaskIdI64,
    update_data: web::Json<UpdateTaskRequest>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE
        .update_task(&req, task_id.0, update_data.into_inner())
        .await
}

pub async fn delete_task(req: HttpRequest, task_id: SafeTaskIdI64) -> ActixResult<HttpResponse> {
    TASK_SERVICE.delete_task(&req, task_id.0).await
}

// 挂在 /api/v1/sections 下
pub fn configure_section_tasks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{section_id}/tasks")
            .route(web::get().to(list_tasks))
            .route(
                web::post()
                    .to(create_task)
                    .wrap(middlewares::RequireRole::new_any(PersonRole::professor_roles())),
            ),
    );
}

// 配置路由
pub fn configure_tasks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tasks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{task_id}")
                    .route(web::get().to(get_task))
                    .route(
                        web::put()
                            .to(update_task)
                            .wrap(middlewares::RequireRole::new_any(PersonRole::professor_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_task)
                            .wrap(middlewares::RequireRole::new_any(PersonRole::professor_roles())),
                    ),
            )
            .service(
                // 修改学生在该任务上最新提交的成绩
                web::resource("/{task_id}/students/{student_id}/grade").route(
                    web::put()
                        .to(submissions::update_latest_grade)
                        .wrap(middlewares::RequireRole::new_any(PersonRole::professor_roles())),
                ),
            ),
    );
}
