//! 公开端点的速率限制
//!
//! 登录、注册与邀请查询不需要令牌，只能按客户端 IP 计数。
//! 每个 IP 在每个端点上有独立的固定窗口，超出后返回 429 并带 `Retry-After`。
//!
//! | 端点 | 限制 |
//! |------|------|
//! | `POST /auth/login` | 5 次 / 60 秒 |
//! | `POST /auth/register` | 3 次 / 60 秒 |
//! | `GET /invitations/info` | 10 次 / 60 秒 |

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

// 键: 端点:IP，值: (窗口内计数, 窗口开始时间)
static WINDOWS: Lazy<Cache<String, (u32, Instant)>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(300))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    limit: u32,
    window: Duration,
    endpoint: &'static str,
}

impl RateLimit {
    pub fn new(endpoint: &'static str, limit: u32, window_secs: u64) -> Self {
        Self {
            limit,
            window: Duration::from_secs(window_secs),
            endpoint,
        }
    }

    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    pub fn register() -> Self {
        Self::new("register", 3, 60)
    }

    /// 防止枚举邀请令牌
    pub fn invitation_info() -> Self {
        Self::new("invitation_info", 10, 60)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Decision {
    Allowed { remaining: u32 },
    Limited { retry_after: u64 },
}

/// 在 `key` 的窗口内记一次请求
async fn record_hit(
    windows: &Cache<String, (u32, Instant)>,
    key: String,
    limit: u32,
    window: Duration,
    now: Instant,
) -> Decision {
    let (count, started) = match windows.get(&key).await {
        Some((count, started)) if now.duration_since(started) < window => (count, started),
        _ => (0, now),
    };

    if count >= limit {
        let elapsed = now.duration_since(started);
        let retry_after = window.saturating_sub(elapsed).as_secs().max(1);
        return Decision::Limited { retry_after };
    }

    windows.insert(key, (count + 1, started)).await;
    Decision::Allowed {
        remaining: limit - count - 1,
    }
}

/// 客户端 IP。actix 会依次读取 Forwarded、X-Forwarded-For 与对端地址，
/// 部署在反向代理后时需由代理覆盖这些头
fn client_ip(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .and_then(|addr| addr.trim().parse::<IpAddr>().ok())
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn too_many_requests(limit: u32, retry_after: u64) -> HttpResponse {
    HttpResponse::TooManyRequests()
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Limit", limit.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            config: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    config: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let RateLimit {
            limit,
            window,
            endpoint,
        } = self.config.clone();

        Box::pin(async move {
            let key = format!("{}:{}", endpoint, client_ip(&req));

            match record_hit(&WINDOWS, key.clone(), limit, window, Instant::now()).await {
                Decision::Limited { retry_after } => {
                    warn!("Rate limit exceeded for {} ({} per {:?})", key, limit, window);
                    Ok(req.into_response(too_many_requests(limit, retry_after).map_into_right_body()))
                }
                Decision::Allowed { remaining } => {
                    let mut res = srv.call(req).await?.map_into_left_body();
                    let headers = res.headers_mut();
                    headers.insert(
                        HeaderName::from_static("x-ratelimit-limit"),
                        HeaderValue::from(limit),
                    );
                    headers.insert(
                        HeaderName::from_static("x-ratelimit-remaining"),
                        HeaderValue::from(remaining),
                    );
                    Ok(res)
                }
            }
        })
    }
}
