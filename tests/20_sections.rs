#[macro_use]
mod common;

use actix_web::test;
use serde_json::{Value, json};

use common::{
    TestContext, bearer, enroll, seed_professor, seed_section, seed_student, seed_task,
};

#[actix_web::test]
async fn professor_manages_sections() {
    let ctx = TestContext::new().await;
    let app = scorely_app!(ctx);
    let (_, token) = seed_professor(&ctx.storage, "carlos@uni.pe").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/sections")
        .insert_header(bearer(&token))
        .set_json(json!({ "course_name": " Algebra Lineal ", "year": 2025, "code": 101 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let section_id = body["data"]["id"].as_i64().expect("section id");
    assert_eq!(body["data"]["course_name"], "Algebra Lineal");

    // 同一教师同一年份重名（忽略大小写）
    let req = test::TestRequest::post()
        .uri("/api/v1/sections")
        .insert_header(bearer(&token))
        .set_json(json!({ "course_name": "ALGEBRA lineal", "year": 2025 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4001);

    // 不同年份可以同名
    let req = test::TestRequest::post()
        .uri("/api/v1/sections")
        .insert_header(bearer(&token))
        .set_json(json!({ "course_name": "Algebra Lineal", "year": 2026 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let other_id = body["data"]["id"].as_i64().expect("section id");

    // 修改为已存在的课程名与年份
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/sections/{other_id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "year": 2025 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // 修改自身不算重名
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/sections/{section_id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "course_name": "algebra lineal" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["code"], 101);

    // 显式 null 清除编号
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/sections/{section_id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "code": null }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["code"].is_null());
    assert_eq!(body["data"]["course_name"], "algebra lineal");

    let req = test::TestRequest::get()
        .uri("/api/v1/sections?year=2025")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    let items = body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["course_name"], "algebra lineal");
    assert_eq!(items[0]["professor_name"], "Carlos Quispe Rojas");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/sections/{section_id}"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/sections/{section_id}"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn section_validation_errors() {
    let ctx = TestContext::new().await;
    let app = scorely_app!(ctx);
    let (_, token) = seed_professor(&ctx.storage, "carlos@uni.pe").await;

    for body in [
        json!({ "course_name": "Fisica" }),
        json!({ "course_name": "   ", "year": 2025 }),
        json!({ "course_name": "x".repeat(41), "year": 2025 }),
        json!({ "course_name": "Fisica", "year": 1990 }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/sections")
            .insert_header(bearer(&token))
            .set_json(body.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "body {body}");
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/sections")
        .insert_header(bearer(&token))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn section_access_is_limited_to_owner_and_enrolled_students() {
    let ctx = TestContext::new().await;
    let app = scorely_app!(ctx);
    let (owner, _) = seed_professor(&ctx.storage, "carlos@uni.pe").await;
    let (_, other_token) = seed_professor(&ctx.storage, "lucia@uni.pe").await;
    let (enrolled, enrolled_token) = seed_student(&ctx.storage, "ana@uni.pe", "1").await;
    let (_, outsider_token) = seed_student(&ctx.storage, "luis@uni.pe", "2").await;
    let section = seed_section(&ctx.storage, &owner, "Algebra").await;
    enroll(&ctx.storage, &section, &enrolled).await;

    let uri = format!("/api/v1/sections/{}", section.id);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&enrolled_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&outsider_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);

    // 学生不能创建或删除课程班
    let req = test::TestRequest::post()
        .uri("/api/v1/sections")
        .insert_header(bearer(&enrolled_token))
        .set_json(json!({ "course_name": "Hack", "year": 2025 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2002);

    // 其他教师不能修改或删除
    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&other_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4002);

    // 学生看到已加入的课程班及教师姓名
    let req = test::TestRequest::get()
        .uri("/api/v1/sections")
        .insert_header(bearer(&enrolled_token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let items = body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["professor_name"], "Carlos Quispe Rojas");

    let req = test::TestRequest::get()
        .uri("/api/v1/sections")
        .insert_header(bearer(&outsider_token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(body["data"]["items"].as_array().expect("items").is_empty());
}

#[actix_web::test]
async fn tasks_crud() {
    let ctx = TestContext::new().await;
    let app = scorely_app!(ctx);
    let (owner, token) = seed_professor(&ctx.storage, "carlos@uni.pe").await;
    let (student, student_token) = seed_student(&ctx.storage, "ana@uni.pe", "1").await;
    let section = seed_section(&ctx.storage, &owner, "Algebra").await;
    enroll(&ctx.storage, &section, &student).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sections/{}/tasks", section.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Practica 1", "kind": "pc" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let task_id = body["data"]["id"].as_i64().expect("task id");
    assert_eq!(body["data"]["kind"], "PC");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sections/{}/tasks", section.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Examen", "kind": "EXAMENFINAL" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/tasks/{task_id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Practica Calificada 1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], "Practica Calificada 1");
    assert_eq!(body["data"]["kind"], "PC");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/sections/{}/tasks", section.id))
        .insert_header(bearer(&student_token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));

    // 学生不能删除任务
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/tasks/{task_id}"))
        .insert_header(bearer(&student_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/tasks/{task_id}"))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tasks/{task_id}"))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn groups_and_group_assignment() {
    let ctx = TestContext::new().await;
    let app = scorely_app!(ctx);
    let (owner, token) = seed_professor(&ctx.storage, "carlos@uni.pe").await;
    let (ana, _) = seed_student(&ctx.storage, "ana@uni.pe", "1").await;
    let (luis, _) = seed_student(&ctx.storage, "luis@uni.pe", "2").await;
    let section = seed_section(&ctx.storage, &owner, "Algebra").await;
    let other_section = seed_section(&ctx.storage, &owner, "Fisica").await;
    enroll(&ctx.storage, &section, &ana).await;
    enroll(&ctx.storage, &section, &luis).await;
    let task = seed_task(&ctx.storage, &section, "PC1").await;
    let ana_id = ana.student_id.unwrap_or_default();
    let luis_id = luis.student_id.unwrap_or_default();
    ctx.storage
        .create_graded_submission(task.id, ana_id, 14.0)
        .await
        .expect("submission");
    ctx.storage
        .create_graded_submission(task.id, luis_id, 17.0)
        .await
        .expect("submission");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sections/{}/groups", section.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Grupo A" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let group_id = body["data"]["id"].as_i64().expect("group id");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sections/{}/groups", section.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "x".repeat(21) }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    for student_id in [ana_id, luis_id] {
        let req = test::TestRequest::put()
            .uri(&format!(
                "/api/v1/sections/{}/students/{student_id}/group",
                section.id
            ))
            .insert_header(bearer(&token))
            .set_json(json!({ "group_id": group_id }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/sections/{}/groups", section.id))
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let group = &body["data"]["items"][0];
    assert_eq!(group["member_count"], 2);
    assert_eq!(group["final_average"], 15.5);

    // 小组属于其他课程班
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/sections/{}/groups/{group_id}",
            other_section.id
        ))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4100);

    // 不能分配到其他课程班的小组
    let req = test::TestRequest::put()
        .uri(&format!(
            "/api/v1/sections/{}/students/{ana_id}/group",
            other_section.id
        ))
        .insert_header(bearer(&token))
        .set_json(json!({ "group_id": group_id }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/sections/{}/students/{ana_id}", section.id))
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["group_id"], group_id);
    assert_eq!(body["data"]["final_average"], 14.0);
}
