//! 人员实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "persons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_names: String,
    pub last_name_paternal: String,
    pub last_name_maternal: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，学生/教师信息由调用方补全
    pub fn into_person(
        self,
        student: Option<super::students::Model>,
        professor: Option<super::professors::Model>,
    ) -> crate::models::people::entities::Person {
        use crate::models::people::entities::{Person, PersonRole};

        let role = self.role.parse::<PersonRole>().unwrap_or(PersonRole::Student);
        let (student_id, student_code) = match student {
            Some(s) => (Some(s.id), Some(s.student_code)),
            None => (None, None),
        };

        Person {
            id: self.id,
            first_names: self.first_names,
            last_name_paternal: self.last_name_paternal,
            last_name_maternal: self.last_name_maternal,
            email: self.email,
            password_hash: self.password_hash,
            role,
            student_id,
            student_code,
            professor_id: professor.map(|p| p.id),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
