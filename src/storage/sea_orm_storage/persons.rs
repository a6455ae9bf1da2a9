//! 人员、学生与教师存储操作

use super::SeaOrmStorage;
use crate::entity::persons::{ActiveModel, Column, Entity as Persons, Model as PersonModel};
use crate::entity::professors::{
    ActiveModel as ProfessorActiveModel, Column as ProfessorColumn, Entity as Professors,
};
use crate::entity::students::{
    ActiveModel as StudentActiveModel, Column as StudentColumn, Entity as Students,
};
use crate::errors::{Result, ScorelyError};
use crate::models::people::{
    entities::{Person, PersonRole, Professor, Student},
    requests::NewPerson,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 注册人员：人员记录与学生/教师记录在同一事务中写入
    pub async fn register_person_impl(&self, req: NewPerson) -> Result<Person> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScorelyError::database_operation(format!("开启事务失败: {e}")))?;

        let person = ActiveModel {
            first_names: Set(req.first_names),
            last_name_paternal: Set(req.last_name_paternal),
            last_name_maternal: Set(req.last_name_maternal),
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ScorelyError::database_operation(format!("创建人员失败: {e}")))?;

        let (student, professor) = match req.role {
            PersonRole::Student => {
                let student_code = req.student_code.ok_or_else(|| {
                    ScorelyError::validation("student_code is required for students")
                })?;
                let student = StudentActiveModel {
                    person_id: Set(person.id),
                    student_code: Set(student_code),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| ScorelyError::database_operation(format!("创建学生失败: {e}")))?;
                (Some(student), None)
            }
            PersonRole::Professor => {
                let professor = ProfessorActiveModel {
                    person_id: Set(person.id),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| ScorelyError::database_operation(format!("创建教师失败: {e}")))?;
                (None, Some(professor))
            }
        };

        txn.commit()
            .await
            .map_err(|e| ScorelyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(person.into_person(student, professor))
    }

    /// 补全学生/教师信息
    pub(crate) async fn load_person<C: ConnectionTrait>(
        conn: &C,
        model: PersonModel,
    ) -> Result<Person> {
        let student = Students::find()
            .filter(StudentColumn::PersonId.eq(model.id))
            .one(conn)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询学生失败: {e}")))?;

        let professor = Professors::find()
            .filter(ProfessorColumn::PersonId.eq(model.id))
            .one(conn)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(model.into_person(student, professor))
    }

    /// 通过 ID 获取人员
    pub async fn get_person_by_id_impl(&self, id: i64) -> Result<Option<Person>> {
        let result = Persons::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询人员失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(Self::load_person(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 通过邮箱获取人员
    pub async fn get_person_by_email_impl(&self, email: &str) -> Result<Option<Person>> {
        let result = Persons::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询人员失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(Self::load_person(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 通过教师 ID 获取人员
    pub async fn get_person_by_professor_id_impl(
        &self,
        professor_id: i64,
    ) -> Result<Option<Person>> {
        let result = Professors::find_by_id(professor_id)
            .find_also_related(Persons)
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(match result {
            Some((professor, Some(person))) => Some(person.into_person(None, Some(professor))),
            _ => None,
        })
    }

    pub async fn student_code_exists_impl(&self, student_code: &str) -> Result<bool> {
        let count = Students::find()
            .filter(StudentColumn::StudentCode.eq(student_code))
            .count(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询学号失败: {e}")))?;

        Ok(count > 0)
    }

    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_person_id_impl(&self, person_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(StudentColumn::PersonId.eq(person_id))
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_professor_by_person_id_impl(
        &self,
        person_id: i64,
    ) -> Result<Option<Professor>> {
        let result = Professors::find()
            .filter(ProfessorColumn::PersonId.eq(person_id))
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_professor()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_person(email: &str, role: PersonRole, code: Option<&str>) -> NewPerson {
        NewPerson {
            first_names: "Ana Lucia".to_string(),
            last_name_paternal: "Quispe".to_string(),
            last_name_maternal: "Mamani".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role,
            student_code: code.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_register_student_creates_student_row() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let person = storage
            .register_person_impl(new_person("ana@uni.pe", PersonRole::Student, Some("20231234")))
            .await
            .unwrap();

        assert!(person.student_id.is_some());
        assert!(person.professor_id.is_none());
        assert!(storage.student_code_exists_impl("20231234").await.unwrap());

        let loaded = storage
            .get_person_by_email_impl("ana@uni.pe")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.student_id, person.student_id);
        assert_eq!(loaded.student_code.as_deref(), Some("20231234"));
    }

    #[tokio::test]
    async fn test_register_student_without_code_rolls_back() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let result = storage
            .register_person_impl(new_person("sin@uni.pe", PersonRole::Student, None))
            .await;

        assert!(result.is_err());
        assert!(
            storage
                .get_person_by_email_impl("sin@uni.pe")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_professor_lookup_by_professor_id() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let person = storage
            .register_person_impl(new_person("prof@uni.pe", PersonRole::Professor, None))
            .await
            .unwrap();
        let professor_id = person.professor_id.unwrap();

        let found = storage
            .get_person_by_professor_id_impl(professor_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, person.id);
        assert_eq!(found.full_name(), "Ana Lucia Quispe Mamani");
    }
}
