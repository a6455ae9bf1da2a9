#[macro_use]
mod common;

use std::sync::Arc;

use actix_web::test;
use serde_json::{Value, json};

use common::{
    TestContext, bearer, enroll, seed_professor, seed_section, seed_student, seed_task,
};
use scorely::models::people::{
    entities::{Person, PersonRole},
    requests::NewPerson,
};
use scorely::storage::Storage;

async fn student_named(
    storage: &Arc<dyn Storage>,
    first: &str,
    paternal: &str,
    maternal: &str,
    code: &str,
) -> Person {
    storage
        .register_person(NewPerson {
            first_names: first.to_string(),
            last_name_paternal: paternal.to_string(),
            last_name_maternal: maternal.to_string(),
            email: format!("{code}@uni.pe"),
            password_hash: "unused".to_string(),
            role: PersonRole::Student,
            student_code: Some(code.to_string()),
        })
        .await
        .expect("student should be stored")
}

#[actix_web::test]
async fn registering_submissions_validates_input() {
    let ctx = TestContext::new().await;
    let app = scorely_app!(ctx);
    let (owner, token) = seed_professor(&ctx.storage, "carlos@uni.pe").await;
    let (_, other_token) = seed_professor(&ctx.storage, "lucia@uni.pe").await;
    let (ana, _) = seed_student(&ctx.storage, "ana@uni.pe", "1").await;
    let (luis, _) = seed_student(&ctx.storage, "luis@uni.pe", "2").await;
    let section = seed_section(&ctx.storage, &owner, "Algebra").await;
    let task = seed_task(&ctx.storage, &section, "PC1").await;
    enroll(&ctx.storage, &section, &ana).await;
    let ana_id = ana.student_id.unwrap_or_default();

    let cases = [
        (json!({ "task_id": task.id, "student_id": ana_id, "grade": 20.5 }), 400, 5101),
        (json!({ "task_id": task.id, "student_id": ana_id, "grade": -1 }), 400, 5101),
        (json!({ "task_id": task.id, "student_id": ana_id }), 400, 5101),
        (json!({ "task_id": 999, "student_id": ana_id, "grade": 10 }), 404, 5000),
        (json!({ "task_id": task.id, "student_id": 999, "grade": 10 }), 404, 3008),
        (
            json!({ "task_id": task.id, "student_id": luis.student_id, "grade": 10 }),
            400,
            6002,
        ),
    ];
    for (body, status, code) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/submissions")
            .insert_header(bearer(&token))
            .set_json(body.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status, "body {body}");
        let resp_body: Value = test::read_body_json(resp).await;
        assert_eq!(resp_body["code"], code, "body {body}");
    }

    // 非课程班教师
    let req = test::TestRequest::post()
        .uri("/api/v1/submissions")
        .insert_header(bearer(&other_token))
        .set_json(json!({ "task_id": task.id, "student_id": ana_id, "grade": 10 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);

    let req = test::TestRequest::post()
        .uri("/api/v1/submissions")
        .insert_header(bearer(&token))
        .set_json(json!({ "task_id": task.id, "student_id": ana_id, "grade": 20 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["submission_id"].as_i64().is_some());
}

#[actix_web::test]
async fn grades_use_latest_submission_and_rounded_average() {
    let ctx = TestContext::new().await;
    let app = scorely_app!(ctx);
    let (owner, token) = seed_professor(&ctx.storage, "carlos@uni.pe").await;
    let (ana, ana_token) = seed_student(&ctx.storage, "ana@uni.pe", "1").await;
    let (luis, luis_token) = seed_student(&ctx.storage, "luis@uni.pe", "2").await;
    let section = seed_section(&ctx.storage, &owner, "Algebra").await;
    enroll(&ctx.storage, &section, &ana).await;
    enroll(&ctx.storage, &section, &luis).await;
    let pc1 = seed_task(&ctx.storage, &section, "PC1").await;
    let pc2 = seed_task(&ctx.storage, &section, "PC2").await;
    let pc3 = seed_task(&ctx.storage, &section, "PC3").await;
    let ana_id = ana.student_id.unwrap_or_default();

    for (task_id, grade) in [(pc1.id, 10.0), (pc1.id, 14.0), (pc2.id, 15.0)] {
        let req = test::TestRequest::post()
            .uri("/api/v1/submissions")
            .insert_header(bearer(&token))
            .set_json(json!({ "task_id": task_id, "student_id": ana_id, "grade": grade }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);
    }

    let grades_uri = format!("/api/v1/sections/{}/students/{ana_id}/grades", section.id);

    let req = test::TestRequest::get()
        .uri(&grades_uri)
        .insert_header(bearer(&ana_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    let items = body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["grade"], 14.0);
    assert_eq!(items[1]["grade"], 15.0);
    assert!(items[2]["grade"].is_null());
    assert!(items[2]["submission_id"].is_null());
    assert_eq!(body["data"]["average"], 14.5);

    // 修改最新提交的成绩
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/tasks/{}/students/{ana_id}/grade", pc3.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "grade": 15 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::post()
        .uri("/api/v1/submissions")
        .insert_header(bearer(&token))
        .set_json(json!({ "task_id": pc3.id, "student_id": ana_id, "grade": 0 }))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let pc3_submission = body["data"]["submission_id"].as_i64().expect("submission id");

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/submissions/{pc3_submission}/grade"))
        .insert_header(bearer(&token))
        .set_json(json!({ "grade": 15 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/submissions/{pc3_submission}/grade"))
        .insert_header(bearer(&token))
        .set_json(json!({ "grade": 21 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::get()
        .uri(&grades_uri)
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    // (14 + 15 + 15) / 3 = 14.666...
    assert_eq!(body["data"]["average"], 14.67);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/tasks/{}/students/{ana_id}/grade", pc1.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "grade": 18 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let req = test::TestRequest::get()
        .uri(&grades_uri)
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["items"][0]["grade"], 18.0);
    assert_eq!(body["data"]["average"], 16.0);

    // 其他学生不能查看
    let req = test::TestRequest::get()
        .uri(&grades_uri)
        .insert_header(bearer(&luis_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);
}

#[actix_web::test]
async fn section_students_are_sorted_with_averages() {
    let ctx = TestContext::new().await;
    let app = scorely_app!(ctx);
    let (owner, token) = seed_professor(&ctx.storage, "carlos@uni.pe").await;
    let section = seed_section(&ctx.storage, &owner, "Algebra").await;
    let task = seed_task(&ctx.storage, &section, "PC1").await;

    let zapata = student_named(&ctx.storage, "Maria", "Zapata", "Lopez", "s1").await;
    let diaz_b = student_named(&ctx.storage, "Jorge", "Diaz", "Benavides", "s2").await;
    let diaz_a = student_named(&ctx.storage, "Pedro", "diaz", "Alva", "s3").await;
    for student in [&zapata, &diaz_b, &diaz_a] {
        enroll(&ctx.storage, &section, student).await;
    }
    ctx.storage
        .create_graded_submission(task.id, zapata.student_id.unwrap_or_default(), 12.5)
        .await
        .expect("submission");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/sections/{}/students", section.id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    let items = body["data"]["items"].as_array().expect("items");
    let names: Vec<&str> = items
        .iter()
        .filter_map(|item| item["full_name"].as_str())
        .collect();
    assert_eq!(
        names,
        ["Pedro diaz Alva", "Jorge Diaz Benavides", "Maria Zapata Lopez"]
    );
    assert!(items[0]["final_average"].is_null());
    assert_eq!(items[2]["final_average"], 12.5);
    assert_eq!(items[2]["student_code"], "s1");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/sections/{}/students/999", section.id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 6000);
}
