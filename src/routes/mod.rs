pub mod auth;

pub mod people;

pub mod sections;

pub mod tasks;

pub mod submissions;

pub mod enrollments;

pub mod groups;

pub mod invitations;

pub use auth::configure_auth_routes;
pub use invitations::configure_invitations_routes;
pub use people::configure_people_routes;
pub use sections::configure_sections_routes;
pub use submissions::configure_submissions_routes;
pub use tasks::configure_tasks_routes;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.configure(configure_auth_routes) // 认证
        .configure(configure_people_routes) // 人员查询
        .configure(configure_sections_routes) // 课程班及其任务、学生、小组、成绩
        .configure(configure_tasks_routes) // 任务
        .configure(configure_submissions_routes) // 提交与成绩
        .configure(configure_invitations_routes); // 邀请
}
