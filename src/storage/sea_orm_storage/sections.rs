//! 课程班存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::persons::Entity as Persons;
use crate::entity::professors::Entity as Professors;
use crate::entity::sections::{ActiveModel, Column, Entity as Sections};
use crate::errors::{Result, ScorelyError};
use crate::models::sections::{
    entities::{Section, SectionListItem},
    requests::{CreateSectionRequest, UpdateSectionRequest},
};
use chrono::Datelike;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 创建课程班，未指定年份时取当前年份
    pub async fn create_section_impl(
        &self,
        professor_id: i64,
        req: CreateSectionRequest,
    ) -> Result<Section> {
        let now = chrono::Utc::now();

        let model = ActiveModel {
            professor_id: Set(professor_id),
            course_name: Set(req.course_name.trim().to_string()),
            year: Set(req.year.unwrap_or_else(|| now.year())),
            code: Set(req.code),
            created_at: Set(now.timestamp()),
            updated_at: Set(now.timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("创建课程班失败: {e}")))?;

        Ok(result.into_section())
    }

    /// 通过 ID 获取课程班
    pub async fn get_section_by_id_impl(&self, section_id: i64) -> Result<Option<Section>> {
        let result = Sections::find_by_id(section_id)
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询课程班失败: {e}")))?;

        Ok(result.map(|m| m.into_section()))
    }

    /// 列出教师的课程班
    pub async fn list_sections_by_professor_impl(
        &self,
        professor_id: i64,
        year: Option<i32>,
    ) -> Result<Vec<Section>> {
        let mut select = Sections::find().filter(Column::ProfessorId.eq(professor_id));

        if let Some(year) = year {
            select = select.filter(Column::Year.eq(year));
        }

        let sections = select
            .order_by_desc(Column::Year)
            .order_by_asc(Column::CourseName)
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询课程班列表失败: {e}")))?;

        Ok(sections.into_iter().map(|m| m.into_section()).collect())
    }

    /// 列出学生加入的课程班
    pub async fn list_sections_by_student_impl(
        &self,
        student_id: i64,
        year: Option<i32>,
    ) -> Result<Vec<SectionListItem>> {
        // 查询学生加入的课程班 ID
        let section_ids: Vec<i64> = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询选课记录失败: {e}")))?
            .into_iter()
            .map(|e| e.section_id)
            .collect();

        if section_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut select = Sections::find().filter(Column::Id.is_in(section_ids));
        if let Some(year) = year {
            select = select.filter(Column::Year.eq(year));
        }

        let sections = select
            .order_by_desc(Column::Year)
            .order_by_asc(Column::CourseName)
            .find_also_related(Professors)
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询课程班列表失败: {e}")))?;

        // 批量加载教师姓名
        let person_ids: Vec<i64> = sections
            .iter()
            .filter_map(|(_, p)| p.as_ref().map(|p| p.person_id))
            .collect();
        let names: HashMap<i64, String> = Persons::find()
            .filter(crate::entity::persons::Column::Id.is_in(person_ids))
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询教师姓名失败: {e}")))?
            .into_iter()
            .map(|p| {
                let person = p.into_person(None, None);
                (person.id, person.full_name())
            })
            .collect();

        Ok(sections
            .into_iter()
            .map(|(section, professor)| {
                let professor_name = professor
                    .and_then(|p| names.get(&p.person_id).cloned())
                    .unwrap_or_default();
                SectionListItem::from_section(section.into_section(), professor_name)
            })
            .collect())
    }

    /// 同一教师同一年份下课程名是否重复，比较时忽略大小写与首尾空白
    pub async fn section_name_exists_impl(
        &self,
        professor_id: i64,
        year: i32,
        course_name: &str,
        exclude_section_id: Option<i64>,
    ) -> Result<bool> {
        let mut select = Sections::find()
            .filter(Column::ProfessorId.eq(professor_id))
            .filter(Column::Year.eq(year));

        if let Some(exclude) = exclude_section_id {
            select = select.filter(Column::Id.ne(exclude));
        }

        let sections = select
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询课程班失败: {e}")))?;

        let wanted = course_name.trim().to_lowercase();
        Ok(sections
            .iter()
            .any(|s| s.course_name.trim().to_lowercase() == wanted))
    }

    /// 更新课程班
    pub async fn update_section_impl(
        &self,
        section_id: i64,
        update: UpdateSectionRequest,
    ) -> Result<Option<Section>> {
        let existing = Sections::find_by_id(section_id)
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询课程班失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(course_name) = update.course_name {
            model.course_name = Set(course_name.trim().to_string());
        }
        if let Some(year) = update.year {
            model.year = Set(year);
        }
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("更新课程班失败: {e}")))?;

        Ok(Some(result.into_section()))
    }

    /// 删除课程班，任务、提交、选课、小组与邀请随外键级联删除
    pub async fn delete_section_impl(&self, section_id: i64) -> Result<bool> {
        let result = Sections::delete_by_id(section_id)
            .exec(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("删除课程班失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::people::{entities::PersonRole, requests::NewPerson};

    async fn setup_professor(storage: &SeaOrmStorage) -> i64 {
        storage
            .register_person_impl(NewPerson {
                first_names: "Carlos".to_string(),
                last_name_paternal: "Rojas".to_string(),
                last_name_maternal: String::new(),
                email: "carlos@uni.pe".to_string(),
                password_hash: "hash".to_string(),
                role: PersonRole::Professor,
                student_code: None,
            })
            .await
            .unwrap()
            .professor_id
            .unwrap()
    }

    fn create_request(name: &str, year: i32) -> CreateSectionRequest {
        CreateSectionRequest {
            course_name: name.to_string(),
            year: Some(year),
            code: None,
        }
    }

    #[tokio::test]
    async fn test_section_name_exists_is_case_insensitive() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let professor_id = setup_professor(&storage).await;
        let section = storage
            .create_section_impl(professor_id, create_request("Algebra Lineal", 2025))
            .await
            .unwrap();

        assert!(
            storage
                .section_name_exists_impl(professor_id, 2025, " algebra lineal ", None)
                .await
                .unwrap()
        );
        assert!(
            !storage
                .section_name_exists_impl(professor_id, 2024, "Algebra Lineal", None)
                .await
                .unwrap()
        );
        assert!(
            !storage
                .section_name_exists_impl(professor_id, 2025, "Algebra Lineal", Some(section.id))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_list_sections_filters_by_year() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let professor_id = setup_professor(&storage).await;
        for (name, year) in [("Calculo I", 2024), ("Calculo II", 2025), ("Fisica", 2025)] {
            storage
                .create_section_impl(professor_id, create_request(name, year))
                .await
                .unwrap();
        }

        let all = storage
            .list_sections_by_professor_impl(professor_id, None)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let current = storage
            .list_sections_by_professor_impl(professor_id, Some(2025))
            .await
            .unwrap();
        let names: Vec<_> = current.iter().map(|s| s.course_name.as_str()).collect();
        assert_eq!(names, vec!["Calculo II", "Fisica"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_section() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let professor_id = setup_professor(&storage).await;
        let section = storage
            .create_section_impl(professor_id, create_request("Quimica", 2025))
            .await
            .unwrap();

        let updated = storage
            .update_section_impl(
                section.id,
                UpdateSectionRequest {
                    course_name: Some("Quimica General".to_string()),
                    year: None,
                    code: Some(Some(101)),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.course_name, "Quimica General");
        assert_eq!(updated.year, 2025);
        assert_eq!(updated.code, Some(101));

        // 显式 null 清除编号，缺省则保持不变
        let cleared = storage
            .update_section_impl(
                section.id,
                UpdateSectionRequest {
                    course_name: None,
                    year: None,
                    code: Some(None),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cleared.code, None);
        assert_eq!(cleared.course_name, "Quimica General");

        assert!(storage.delete_section_impl(section.id).await.unwrap());
        assert!(!storage.delete_section_impl(section.id).await.unwrap());
        assert!(storage.get_section_by_id_impl(section.id).await.unwrap().is_none());
    }
}
