//! 预导入模块，方便使用

pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::groups::{ActiveModel as GroupActiveModel, Entity as Groups, Model as GroupModel};
pub use super::individual_submissions::{
    ActiveModel as IndividualSubmissionActiveModel, Entity as IndividualSubmissions,
    Model as IndividualSubmissionModel,
};
pub use super::invitations::{
    ActiveModel as InvitationActiveModel, Entity as Invitations, Model as InvitationModel,
};
pub use super::persons::{ActiveModel as PersonActiveModel, Entity as Persons, Model as PersonModel};
pub use super::professors::{
    ActiveModel as ProfessorActiveModel, Entity as Professors, Model as ProfessorModel,
};
pub use super::sections::{
    ActiveModel as SectionActiveModel, Entity as Sections, Model as SectionModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::tasks::{ActiveModel as TaskActiveModel, Entity as Tasks, Model as TaskModel};
