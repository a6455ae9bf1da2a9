//! 路径参数提取器
//!
//! 从 match_info 读取指定名称的参数，要求为正整数，否则直接返回 400。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_id(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(param).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let message = format!("Invalid {param}: must be a positive integer");
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
            Err(InternalError::from_response(message, response).into())
        }
    }
}

macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_positive_id(req, $param).map($name))
            }
        }
    };
}

define_safe_i64_extractor!(SafePersonIdI64, "person_id");
define_safe_i64_extractor!(SafeSectionIdI64, "section_id");
define_safe_i64_extractor!(SafeStudentIdI64, "student_id");
define_safe_i64_extractor!(SafeTaskIdI64, "task_id");
define_safe_i64_extractor!(SafeSubmissionIdI64, "submission_id");
define_safe_i64_extractor!(SafeGroupIdI64, "group_id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};

    async fn echo(id: SafeSectionIdI64) -> HttpResponse {
        HttpResponse::Ok().body(id.0.to_string())
    }

    #[actix_web::test]
    async fn test_accepts_positive_ids() {
        let app =
            test::init_service(App::new().route("/s/{section_id}", web::get().to(echo))).await;
        let req = test::TestRequest::get().uri("/s/42").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, web::Bytes::from_static(b"42"));
    }

    #[actix_web::test]
    async fn test_rejects_invalid_ids() {
        let app =
            test::init_service(App::new().route("/s/{section_id}", web::get().to(echo))).await;
        for uri in ["/s/0", "/s/-3", "/s/abc"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400, "uri {uri}");
        }
    }
}
