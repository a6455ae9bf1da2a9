use std::sync::Arc;

use chrono::{DateTime, Utc};

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 人员管理方法
    // 注册人员，同时创建学生或教师记录（事务）
    async fn register_person(&self, person: NewPerson) -> Result<Person>;
    // 通过ID获取人员（含学生/教师信息）
    async fn get_person_by_id(&self, id: i64) -> Result<Option<Person>>;
    // 通过邮箱获取人员
    async fn get_person_by_email(&self, email: &str) -> Result<Option<Person>>;
    // 通过教师ID获取人员
    async fn get_person_by_professor_id(&self, professor_id: i64) -> Result<Option<Person>>;
    // 学号是否已被使用
    async fn student_code_exists(&self, student_code: &str) -> Result<bool>;
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    async fn get_student_by_person_id(&self, person_id: i64) -> Result<Option<Student>>;
    async fn get_professor_by_person_id(&self, person_id: i64) -> Result<Option<Professor>>;

    /// 课程班管理方法
    async fn create_section(
        &self,
        professor_id: i64,
        section: CreateSectionRequest,
    ) -> Result<Section>;
    async fn get_section_by_id(&self, section_id: i64) -> Result<Option<Section>>;
    // 教师的课程班，可按年份过滤
    async fn list_sections_by_professor(
        &self,
        professor_id: i64,
        year: Option<i32>,
    ) -> Result<Vec<Section>>;
    // 学生已加入的课程班，附带教师姓名
    async fn list_sections_by_student(
        &self,
        student_id: i64,
        year: Option<i32>,
    ) -> Result<Vec<SectionListItem>>;
    // 同一教师同一年份下是否已有同名课程班（忽略大小写）
    async fn section_name_exists(
        &self,
        professor_id: i64,
        year: i32,
        course_name: &str,
        exclude_section_id: Option<i64>,
    ) -> Result<bool>;
    async fn update_section(
        &self,
        section_id: i64,
        update: UpdateSectionRequest,
    ) -> Result<Option<Section>>;
    async fn delete_section(&self, section_id: i64) -> Result<bool>;

    /// 任务管理方法
    async fn create_task(&self, section_id: i64, task: CreateTaskRequest) -> Result<Task>;
    async fn get_task_by_id(&self, task_id: i64) -> Result<Option<Task>>;
    async fn list_tasks_by_section(&self, section_id: i64) -> Result<Vec<Task>>;
    async fn update_task(&self, task_id: i64, update: UpdateTaskRequest) -> Result<Option<Task>>;
    async fn delete_task(&self, task_id: i64) -> Result<bool>;

    /// 提交与成绩方法
    // 创建带成绩的提交及个人提交关联（事务）
    async fn create_graded_submission(
        &self,
        task_id: i64,
        student_id: i64,
        grade: f64,
    ) -> Result<Submission>;
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    async fn update_submission_grade(&self, submission_id: i64, grade: f64) -> Result<bool>;
    // 学生在某任务上的最新提交
    async fn get_latest_submission(
        &self,
        task_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 课程班内所有任务的提交，可限定学生
    async fn list_section_submissions(
        &self,
        section_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<Submission>>;

    /// 选课方法
    async fn get_enrollment(&self, section_id: i64, student_id: i64)
    -> Result<Option<Enrollment>>;
    // 按父姓、母姓、名字排序
    async fn list_section_students(&self, section_id: i64) -> Result<Vec<SectionStudent>>;
    async fn get_section_student(
        &self,
        section_id: i64,
        student_id: i64,
    ) -> Result<Option<SectionStudent>>;
    async fn set_enrollment_group(
        &self,
        section_id: i64,
        student_id: i64,
        group_id: Option<i64>,
    ) -> Result<bool>;

    /// 小组方法
    async fn create_group(&self, section_id: i64, name: &str) -> Result<Group>;
    async fn get_group_by_id(&self, group_id: i64) -> Result<Option<Group>>;
    async fn list_groups_by_section(&self, section_id: i64) -> Result<Vec<Group>>;

    /// 邀请方法
    async fn create_invitation(&self, invitation: NewInvitation) -> Result<Invitation>;
    async fn get_invitation_by_token(&self, token: &str) -> Result<Option<Invitation>>;
    // 指定邮箱和课程班的未过期待处理邀请
    async fn find_open_invitation(
        &self,
        email: &str,
        section_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<Invitation>>;
    async fn list_open_invitations_by_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Invitation>>;
    // 仅当当前状态为 PENDIENTE 时更新，返回是否更新成功
    async fn update_invitation_status(
        &self,
        invitation_id: i64,
        status: InvitationStatus,
        responded_at: Option<DateTime<Utc>>,
    ) -> Result<bool>;
    async fn delete_invitation(&self, invitation_id: i64) -> Result<bool>;
    // 接受邀请：写入选课并标记 ACEPTADA（事务）
    async fn accept_invitation(
        &self,
        invitation_id: i64,
        student_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Enrollment>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
