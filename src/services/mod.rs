pub mod access;
pub mod auth;
pub mod enrollments;
pub mod groups;
pub mod invitations;
pub mod mail;
pub mod people;
pub mod sections;
pub mod submissions;
pub mod tasks;

pub use auth::AuthService;
pub use enrollments::EnrollmentService;
pub use groups::GroupService;
pub use invitations::InvitationService;
pub use people::PeopleService;
pub use sections::SectionService;
pub use submissions::SubmissionService;
pub use tasks::TaskService;
