use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::PeopleService;
use crate::utils::SafePersonIdI64;

// 懒加载的全局 PEOPLE_SERVICE 实例
static PEOPLE_SERVICE: Lazy<PeopleService> = Lazy::new(PeopleService::new_lazy);

pub async fn get_student_id(
    req: HttpRequest,
    person_id: SafePersonIdI64,
) -> ActixResult<HttpResponse> {
    PEOPLE_SERVICE.get_student_id(&req, person_id.0).await
}

pub async fn get_professor_id(
    req: HttpRequest,
    person_id: SafePersonIdI64,
) -> ActixResult<HttpResponse> {
    PEOPLE_SERVICE.get_professor_id(&req, person_id.0).await
}

// 配置路由
pub fn configure_people_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/people")
            .wrap(middlewares::RequireJWT)
            .route("/{person_id}/student", web::get().to(get_student_id))
            .route("/{person_id}/professor", web::get().to(get_professor_id)),
    );
}
