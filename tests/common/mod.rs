//! 集成测试公共设施：内存 SQLite 存储、记录邮件的 Mailer、种子数据

#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicU32, Ordering},
};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use scorely::cache::{MokaCacheWrapper, ObjectCache};
use scorely::errors::{Result, ScorelyError};
use scorely::models::{
    invitations::requests::NewInvitation,
    people::{
        entities::{Person, PersonRole},
        requests::NewPerson,
    },
    sections::{entities::Section, requests::CreateSectionRequest},
    tasks::{entities::Task, requests::CreateTaskRequest},
};
use scorely::services::mail::{MailMessage, Mailer};
use scorely::storage::{Storage, sea_orm_storage::SeaOrmStorage};

pub const PASSWORD: &str = "Secreto123";

/// 记录所有发出的邮件，可切换为发送失败
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
    failing: AtomicBool,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    pub fn fail_next_sends(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ScorelyError::mail("SMTP server unavailable"));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message);
        }
        Ok(())
    }
}

pub struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestContext {
    pub async fn new() -> Self {
        let storage = SeaOrmStorage::new_in_memory()
            .await
            .expect("in-memory storage should start");
        Self {
            storage: Arc::new(storage),
            cache: Arc::new(MokaCacheWrapper::new(1_000, 60)),
            mailer: Arc::new(RecordingMailer::default()),
        }
    }

    pub fn mailer(&self) -> Arc<dyn Mailer> {
        self.mailer.clone()
    }
}

/// 用测试上下文构建完整的 actix App
macro_rules! scorely_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(
                    actix_web::web::QueryConfig::default()
                        .error_handler(scorely::utils::query_error_handler),
                )
                .app_data(
                    actix_web::web::JsonConfig::default()
                        .error_handler(scorely::utils::json_error_handler),
                )
                .app_data(actix_web::web::Data::new($ctx.storage.clone()))
                .app_data(actix_web::web::Data::new($ctx.cache.clone()))
                .app_data(actix_web::web::Data::new($ctx.mailer()))
                .configure(scorely::routes::configure_api_routes),
        )
        .await
    };
}

static NEXT_IP: AtomicU32 = AtomicU32::new(1);

/// 每个测试使用不同的客户端 IP，避免共享的限流计数互相影响
pub fn unique_ip() -> String {
    let n = NEXT_IP.fetch_add(1, Ordering::SeqCst);
    format!("10.{}.{}.{}", (n >> 16) & 0xff, (n >> 8) & 0xff, n & 0xff)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

pub async fn seed_person(
    storage: &Arc<dyn Storage>,
    first_names: &str,
    email: &str,
    role: PersonRole,
    student_code: Option<&str>,
) -> (Person, String) {
    let config = scorely::config::AppConfig::get();
    let password_hash = scorely::utils::password::hash_password(PASSWORD, &config.argon2)
        .expect("hashing should succeed");
    let person = storage
        .register_person(NewPerson {
            first_names: first_names.to_string(),
            last_name_paternal: "Quispe".to_string(),
            last_name_maternal: "Rojas".to_string(),
            email: email.to_string(),
            password_hash,
            role,
            student_code: student_code.map(str::to_string),
        })
        .await
        .expect("person should be stored");
    let token = person
        .generate_access_token()
        .expect("token should be generated");
    (person, token)
}

pub async fn seed_professor(storage: &Arc<dyn Storage>, email: &str) -> (Person, String) {
    seed_person(storage, "Carlos", email, PersonRole::Professor, None).await
}

pub async fn seed_student(storage: &Arc<dyn Storage>, email: &str, code: &str) -> (Person, String) {
    seed_person(storage, "Ana", email, PersonRole::Student, Some(code)).await
}

pub async fn seed_section(
    storage: &Arc<dyn Storage>,
    professor: &Person,
    course_name: &str,
) -> Section {
    storage
        .create_section(
            professor.professor_id.expect("professor id"),
            CreateSectionRequest {
                course_name: course_name.to_string(),
                year: Some(2025),
                code: None,
            },
        )
        .await
        .expect("section should be stored")
}

pub async fn seed_task(storage: &Arc<dyn Storage>, section: &Section, name: &str) -> Task {
    storage
        .create_task(
            section.id,
            CreateTaskRequest {
                name: name.to_string(),
                kind: "PC".to_string(),
                description: None,
                due_at: None,
            },
        )
        .await
        .expect("task should be stored")
}

/// 通过已接受的邀请把学生加入课程班
pub async fn enroll(storage: &Arc<dyn Storage>, section: &Section, student: &Person) {
    let invitation = storage
        .create_invitation(NewInvitation {
            section_id: section.id,
            email: student.email.clone(),
            token: uuid::Uuid::new_v4().to_string(),
            expires_at: Utc::now() + Duration::hours(1),
        })
        .await
        .expect("invitation should be stored");
    storage
        .accept_invitation(
            invitation.id,
            student.student_id.expect("student id"),
            Utc::now(),
        )
        .await
        .expect("invitation should be accepted");
}
