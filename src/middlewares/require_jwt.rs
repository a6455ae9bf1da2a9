/*!
 * JWT 认证中间件
 *
 * 验证 `Authorization: Bearer <token>` 中的 access token，并把当前人员写入请求扩展。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new().service(
 *     web::scope("/api/v1/sections")
 *         .wrap(RequireJWT)
 *         .route("", web::get().to(list_sections)),
 * )
 * ```
 *
 * 处理程序中通过 `RequireJWT::extract_person(&req)` 获取当前人员。
 *
 * ## 认证流程
 *
 * 1. 提取并校验 JWT（签名、过期时间、token 类型）
 * 2. 先查缓存 `person:{token}`，未命中时按 `sub` 从存储加载人员
 * 3. 成功则写入请求扩展继续处理，失败返回 401
 */

use crate::cache::{CacheResult, ObjectCache, get_json, insert_json};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::people::entities::Person;
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

// 提取并验证 JWT access token，返回当前人员
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<Person, String> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = crate::utils::jwt::JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let cache = req
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .ok_or_else(|| "Cache not configured".to_string())?
        .get_ref()
        .clone();

    let cache_key = format!("person:{token}");
    if let CacheResult::Found(person) = get_json::<Person>(cache.as_ref(), &cache_key).await {
        return Ok(person);
    }

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| "Storage not configured".to_string())?
        .get_ref()
        .clone();

    let person_id = claims
        .person_id()
        .ok_or_else(|| "Invalid person ID in JWT".to_string())?;

    let person = storage
        .get_person_by_id(person_id)
        .await
        .map_err(|_| "Failed to retrieve person from storage".to_string())?
        .ok_or_else(|| "Person not found".to_string())?;

    insert_json(
        cache.as_ref(),
        cache_key,
        &person,
        AppConfig::get().cache.default_ttl,
    )
    .await;

    Ok(person)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(HttpResponse::NoContent().finish().map_into_right_body()));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(person) => {
                    debug!("JWT authentication successful for person: {}", person.id);
                    req.extensions_mut().insert(person);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 从请求扩展中读取当前人员，需在 RequireJWT 之后使用
impl RequireJWT {
    pub fn extract_person(req: &actix_web::HttpRequest) -> Option<Person> {
        req.extensions().get::<Person>().cloned()
    }
}
