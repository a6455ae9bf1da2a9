//! 提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub task_id: i64,
    pub grade: Option<f64>,
    pub submitted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tasks::Entity",
        from = "Column::TaskId",
        to = "super::tasks::Column::Id"
    )]
    Task,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 学生ID 来自个人提交关联表
    pub fn into_submission(
        self,
        student_id: i64,
    ) -> crate::models::submissions::entities::Submission {
        crate::models::submissions::entities::Submission {
            id: self.id,
            task_id: self.task_id,
            student_id,
            grade: self.grade,
            submitted_at: super::to_datetime(self.submitted_at),
        }
    }
}
