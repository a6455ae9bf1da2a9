#[macro_use]
mod common;

use actix_web::test;
use serde_json::{Value, json};

use common::{TestContext, bearer, seed_professor, seed_student, unique_ip};

fn register_body(email: &str, user_type: &str, student_code: Option<&str>) -> Value {
    json!({
        "first_names": "Ana",
        "last_name_paternal": "Quispe",
        "last_name_maternal": "Rojas",
        "email": email,
        "password": common::PASSWORD,
        "user_type": user_type,
        "student_code": student_code,
    })
}

#[actix_web::test]
async fn register_login_and_me() {
    let ctx = TestContext::new().await;
    let app = scorely_app!(ctx);
    let ip = unique_ip();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(("X-Forwarded-For", ip.as_str()))
        .set_json(register_body(" Ana.Quispe@Uni.PE ", "Estudiante", Some("20231234")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "ana.quispe@uni.pe");
    assert_eq!(body["data"]["role"], "student");
    assert!(body["data"].get("password_hash").is_none());

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", ip.as_str()))
        .set_json(json!({ "email": "ANA.QUISPE@uni.pe", "password": common::PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"]
        .as_str()
        .expect("access token")
        .to_string();
    assert!(body["data"]["expires_in"].as_i64().unwrap_or_default() > 0);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["person"]["student_code"], "20231234");
}

#[actix_web::test]
async fn register_rejects_duplicates_and_bad_input() {
    let ctx = TestContext::new().await;
    let app = scorely_app!(ctx);
    seed_student(&ctx.storage, "ana@uni.pe", "2023").await;

    let cases = [
        (register_body("ANA@uni.pe", "student", Some("9999")), 3001),
        (register_body("luis@uni.pe", "student", Some("2023")), 3003),
        (register_body("luis@uni.pe", "student", None), 3004),
        (register_body("luis@uni.pe", "admin", None), 3005),
        (register_body("not-an-email", "professor", None), 3002),
    ];

    // 注册限流为每分钟 3 次，每个请求使用独立 IP
    for (body, code) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .insert_header(("X-Forwarded-For", unique_ip()))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "expected error code {code}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], code);
    }
}

#[actix_web::test]
async fn login_with_wrong_password_is_unauthorized() {
    let ctx = TestContext::new().await;
    let app = scorely_app!(ctx);
    seed_professor(&ctx.storage, "carlos@uni.pe").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", unique_ip()))
        .set_json(json!({ "email": "carlos@uni.pe", "password": "Incorrecta1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2001);
}

#[actix_web::test]
async fn login_is_rate_limited_per_ip() {
    let ctx = TestContext::new().await;
    let app = scorely_app!(ctx);
    let ip = unique_ip();

    let mut statuses = Vec::new();
    for _ in 0..6 {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("X-Forwarded-For", ip.as_str()))
            .set_json(json!({ "email": "nadie@uni.pe", "password": "Secreto123" }))
            .to_request();
        statuses.push(test::call_service(&app, req).await.status().as_u16());
    }
    assert_eq!(&statuses[..5], &[401; 5]);
    assert_eq!(statuses[5], 429);
}

#[actix_web::test]
async fn me_requires_token() {
    let ctx = TestContext::new().await;
    let app = scorely_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer("not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn people_lookup_returns_role_ids() {
    let ctx = TestContext::new().await;
    let app = scorely_app!(ctx);
    let (student, token) = seed_student(&ctx.storage, "ana@uni.pe", "2023").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/people/{}/student", student.id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["student_id"], student.student_id.unwrap_or_default());
    assert_eq!(body["data"]["student_code"], "2023");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/people/{}/professor", student.id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::get()
        .uri("/api/v1/people/abc/student")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
