//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod enrollments;
mod groups;
mod invitations;
mod persons;
mod sections;
mod submissions;
mod tasks;

use crate::config::AppConfig;
use crate::errors::{Result, ScorelyError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::migrate(&db).await?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 内存 SQLite 实例，单连接保证所有查询看到同一个库
    pub async fn new_in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| ScorelyError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| ScorelyError::database_connection(format!("SQLite 连接失败: {e}")))?;

        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
        Self::migrate(&db).await?;

        Ok(Self { db })
    }

    async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("数据库迁移失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ScorelyError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ScorelyError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| ScorelyError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 推断数据库类型
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
        {
            Ok(url.to_string())
        } else {
            Err(ScorelyError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql:// 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    enrollments::entities::{Enrollment, SectionStudent},
    groups::entities::Group,
    invitations::{
        entities::{Invitation, InvitationStatus},
        requests::NewInvitation,
    },
    people::{
        entities::{Person, Professor, Student},
        requests::NewPerson,
    },
    sections::{
        entities::{Section, SectionListItem},
        requests::{CreateSectionRequest, UpdateSectionRequest},
    },
    submissions::entities::Submission,
    tasks::{
        entities::Task,
        requests::{CreateTaskRequest, UpdateTaskRequest},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 人员模块
    async fn register_person(&self, person: NewPerson) -> Result<Person> {
        self.register_person_impl(person).await
    }

    async fn get_person_by_id(&self, id: i64) -> Result<Option<Person>> {
        self.get_person_by_id_impl(id).await
    }

    async fn get_person_by_email(&self, email: &str) -> Result<Option<Person>> {
        self.get_person_by_email_impl(email).await
    }

    async fn get_person_by_professor_id(&self, professor_id: i64) -> Result<Option<Person>> {
        self.get_person_by_professor_id_impl(professor_id).await
    }

    async fn student_code_exists(&self, student_code: &str) -> Result<bool> {
        self.student_code_exists_impl(student_code).await
    }

    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(student_id).await
    }

    async fn get_student_by_person_id(&self, person_id: i64) -> Result<Option<Student>> {
        self.get_student_by_person_id_impl(person_id).await
    }

    async fn get_professor_by_person_id(&self, person_id: i64) -> Result<Option<Professor>> {
        self.get_professor_by_person_id_impl(person_id).await
    }

    // 课程班模块
    async fn create_section(
        &self,
        professor_id: i64,
        section: CreateSectionRequest,
    ) -> Result<Section> {
        self.create_section_impl(professor_id, section).await
    }

    async fn get_section_by_id(&self, section_id: i64) -> Result<Option<Section>> {
        self.get_section_by_id_impl(section_id).await
    }

    async fn list_sections_by_professor(
        &self,
        professor_id: i64,
        year: Option<i32>,
    ) -> Result<Vec<Section>> {
        self.list_sections_by_professor_impl(professor_id, year)
            .await
    }

    async fn list_sections_by_student(
        &self,
        student_id: i64,
        year: Option<i32>,
    ) -> Result<Vec<SectionListItem>> {
        self.list_sections_by_student_impl(student_id, year).await
    }

    async fn section_name_exists(
        &self,
        professor_id: i64,
        year: i32,
        course_name: &str,
        exclude_section_id: Option<i64>,
    ) -> Result<bool> {
        self.section_name_exists_impl(professor_id, year, course_name, exclude_section_id)
            .await
    }

    async fn update_section(
        &self,
        section_id: i64,
        update: UpdateSectionRequest,
    ) -> Result<Option<Section>> {
        self.update_section_impl(section_id, update).await
    }

    async fn delete_section(&self, section_id: i64) -> Result<bool> {
        self.delete_section_impl(section_id).await
    }

    // 任务模块
    async fn create_task(&self, section_id: i64, task: CreateTaskRequest) -> Result<Task> {
        self.create_task_impl(section_id, task).await
    }

    async fn get_task_by_id(&self, task_id: i64) -> Result<Option<Task>> {
        self.get_task_by_id_impl(task_id).await
    }

    async fn list_tasks_by_section(&self, section_id: i64) -> Result<Vec<Task>> {
        self.list_tasks_by_section_impl(section_id).await
    }

    async fn update_task(&self, task_id: i64, update: UpdateTaskRequest) -> Result<Option<Task>> {
        self.update_task_impl(task_id, update).await
    }

    async fn delete_task(&self, task_id: i64) -> Result<bool> {
        self.delete_task_impl(task_id).await
    }

    // 提交模块
    async fn create_graded_submission(
        &self,
        task_id: i64,
        student_id: i64,
        grade: f64,
    ) -> Result<Submission> {
        self.create_graded_submission_impl(task_id, student_id, grade)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn update_submission_grade(&self, submission_id: i64, grade: f64) -> Result<bool> {
        self.update_submission_grade_impl(submission_id, grade).await
    }

    async fn get_latest_submission(
        &self,
        task_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_latest_submission_impl(task_id, student_id).await
    }

    async fn list_section_submissions(
        &self,
        section_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<Submission>> {
        self.list_section_submissions_impl(section_id, student_id)
            .await
    }

    // 选课模块
    async fn get_enrollment(
        &self,
        section_id: i64,
        student_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(section_id, student_id).await
    }

    async fn list_section_students(&self, section_id: i64) -> Result<Vec<SectionStudent>> {
        self.list_section_students_impl(section_id).await
    }

    async fn get_section_student(
        &self,
        section_id: i64,
        student_id: i64,
    ) -> Result<Option<SectionStudent>> {
        self.get_section_student_impl(section_id, student_id).await
    }

    async fn set_enrollment_group(
        &self,
        section_id: i64,
        student_id: i64,
        group_id: Option<i64>,
    ) -> Result<bool> {
        self.set_enrollment_group_impl(section_id, student_id, group_id)
            .await
    }

    // 小组模块
    async fn create_group(&self, section_id: i64, name: &str) -> Result<Group> {
        self.create_group_impl(section_id, name).await
    }

    async fn get_group_by_id(&self, group_id: i64) -> Result<Option<Group>> {
        self.get_group_by_id_impl(group_id).await
    }

    async fn list_groups_by_section(&self, section_id: i64) -> Result<Vec<Group>> {
        self.list_groups_by_section_impl(section_id).await
    }

    // 邀请模块
    async fn create_invitation(&self, invitation: NewInvitation) -> Result<Invitation> {
        self.create_invitation_impl(invitation).await
    }

    async fn get_invitation_by_token(&self, token: &str) -> Result<Option<Invitation>> {
        self.get_invitation_by_token_impl(token).await
    }

    async fn find_open_invitation(
        &self,
        email: &str,
        section_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<Invitation>> {
        self.find_open_invitation_impl(email, section_id, now).await
    }

    async fn list_open_invitations_by_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Invitation>> {
        self.list_open_invitations_by_email_impl(email, now).await
    }

    async fn update_invitation_status(
        &self,
        invitation_id: i64,
        status: InvitationStatus,
        responded_at: Option<DateTime<Utc>>,
    ) -> Result<bool> {
        self.update_invitation_status_impl(invitation_id, status, responded_at)
            .await
    }

    async fn delete_invitation(&self, invitation_id: i64) -> Result<bool> {
        self.delete_invitation_impl(invitation_id).await
    }

    async fn accept_invitation(
        &self,
        invitation_id: i64,
        student_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Enrollment> {
        self.accept_invitation_impl(invitation_id, student_id, now)
            .await
    }
}
