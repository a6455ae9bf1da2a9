use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::groups::requests::CreateGroupRequest;
use crate::models::people::entities::PersonRole;
use crate::services::GroupService;
use crate::utils::{SafeGroupIdI64, SafeSectionIdI64};

// 懒加载的全局 GROUP_SERVICE 实例
static GROUP_SERVICE: Lazy<GroupService> = Lazy::new(GroupService::new_lazy);

pub async fn list_groups(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.list_groups(&req, section_id.0).await
}

pub async fn create_group(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    group_data: web::Json<CreateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .create_group(&req, section_id.0, group_data.into_inner())
        .await
}

pub async fn get_group(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    group_id: SafeGroupIdI64,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.get_group(&req, section_id.0, group_id.0).await
}

// 挂在 /api/v1/sections 下
pub fn configure_section_groups_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{section_id}/groups")
            .route(web::get().to(list_groups))
            .route(
                web::post()
                    .to(create_group)
                    .wrap(middlewares::RequireRole::new_any(PersonRole::professor_roles())),
            ),
    )
    .route("/{section_id}/groups/{group_id}", web::get().to(get_group));
}
