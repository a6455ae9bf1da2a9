use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::invitations::requests::{
    CreateInvitationRequest, InvitationTokenQuery, InvitationTokenRequest,
};
use crate::models::people::entities::PersonRole;
use crate::services::InvitationService;

// 懒加载的全局 INVITATION_SERVICE 实例
static INVITATION_SERVICE: Lazy<InvitationService> = Lazy::new(InvitationService::new_lazy);

pub async fn create_invitation(
    req: HttpRequest,
    invitation_data: web::Json<CreateInvitationRequest>,
) -> ActixResult<HttpResponse> {
    INVITATION_SERVICE
        .create_invitation(&req, invitation_data.into_inner())
        .await
}

pub async fn get_invitation_info(
    req: HttpRequest,
    query: web::Query<InvitationTokenQuery>,
) -> ActixResult<HttpResponse> {
    INVITATION_SERVICE
        .get_invitation_info(&req, &query.token)
        .await
}

pub async fn list_pending(req: HttpRequest) -> ActixResult<HttpResponse> {
    INVITATION_SERVICE.list_pending(&req).await
}

pub async fn accept_invitation(
    req: HttpRequest,
    token_data: web::Json<InvitationTokenRequest>,
) -> ActixResult<HttpResponse> {
    INVITATION_SERVICE
        .accept_invitation(&req, token_data.into_inner())
        .await
}

pub async fn reject_invitation(
    req: HttpRequest,
    token_data: web::Json<InvitationTokenRequest>,
) -> ActixResult<HttpResponse> {
    INVITATION_SERVICE
        .reject_invitation(&req, token_data.into_inner())
        .await
}

// 配置路由
pub fn configure_invitations_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/invitations")
            .service(
                // 邀请链接落地页使用，无需登录
                web::resource("/info")
                    .wrap(middlewares::RateLimit::invitation_info())
                    .route(web::get().to(get_invitation_info)),
            )
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_invitation)
                        .wrap(middlewares::RequireRole::new_any(
                            PersonRole::professor_roles(),
                        ))
                        .wrap(middlewares::RequireJWT),
                ),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .service(
                        web::resource("/pending").route(
                            web::get()
                                .to(list_pending)
                                .wrap(middlewares::RequireRole::new_any(
                                    PersonRole::student_roles(),
                                )),
                        ),
                    )
                    .service(
                        web::resource("/accept").route(
                            web::post()
                                .to(accept_invitation)
                                .wrap(middlewares::RequireRole::new_any(
                                    PersonRole::student_roles(),
                                )),
                        ),
                    )
                    .route("/reject", web::post().to(reject_invitation)),
            ),
    );
}
