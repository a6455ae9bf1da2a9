//! 选课存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments, Model};
use crate::entity::persons::{Column as PersonColumn, Entity as Persons};
use crate::entity::sections::Entity as Sections;
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, ScorelyError};
use crate::models::enrollments::entities::{Enrollment, SectionStudent};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use std::collections::HashMap;

impl SeaOrmStorage {
    async fn find_enrollment_model(&self, section_id: i64, student_id: i64) -> Result<Option<Model>> {
        Enrollments::find()
            .filter(Column::SectionId.eq(section_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询选课记录失败: {e}")))
    }

    pub async fn get_enrollment_impl(
        &self,
        section_id: i64,
        student_id: i64,
    ) -> Result<Option<Enrollment>> {
        Ok(self
            .find_enrollment_model(section_id, student_id)
            .await?
            .map(|m| m.into_enrollment()))
    }

    /// 课程班学生列表，按父姓、母姓、名字排序；平均分由服务层补全
    pub async fn list_section_students_impl(&self, section_id: i64) -> Result<Vec<SectionStudent>> {
        let enrollments = Enrollments::find()
            .filter(Column::SectionId.eq(section_id))
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询选课记录失败: {e}")))?;

        self.build_section_students(section_id, enrollments).await
    }

    pub async fn get_section_student_impl(
        &self,
        section_id: i64,
        student_id: i64,
    ) -> Result<Option<SectionStudent>> {
        let Some(enrollment) = self.find_enrollment_model(section_id, student_id).await? else {
            return Ok(None);
        };

        Ok(self
            .build_section_students(section_id, vec![enrollment])
            .await?
            .into_iter()
            .next())
    }

    async fn build_section_students(
        &self,
        section_id: i64,
        enrollments: Vec<Model>,
    ) -> Result<Vec<SectionStudent>> {
        if enrollments.is_empty() {
            return Ok(vec![]);
        }

        let course_name = Sections::find_by_id(section_id)
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询课程班失败: {e}")))?
            .map(|s| s.course_name)
            .unwrap_or_default();

        let students: HashMap<i64, crate::entity::students::Model> = Students::find()
            .filter(StudentColumn::Id.is_in(enrollments.iter().map(|e| e.student_id)))
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let persons: HashMap<i64, crate::entity::persons::Model> = Persons::find()
            .filter(PersonColumn::Id.is_in(students.values().map(|s| s.person_id)))
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询人员失败: {e}")))?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut items: Vec<SectionStudent> = enrollments
            .into_iter()
            .filter_map(|enrollment| {
                let student = students.get(&enrollment.student_id)?;
                let person = persons.get(&student.person_id)?.clone();
                let person = person.into_person(Some(student.clone()), None);
                Some(SectionStudent {
                    student_id: student.id,
                    person_id: person.id,
                    full_name: person.full_name(),
                    surnames: person.surnames(),
                    first_names: person.first_names,
                    email: person.email,
                    student_code: student.student_code.clone(),
                    group_id: enrollment.group_id,
                    final_average: None,
                    section_id,
                    course_name: course_name.clone(),
                })
            })
            .collect();

        items.sort_by_cached_key(|s| {
            let person = &persons[&s.person_id];
            (
                person.last_name_paternal.to_lowercase(),
                person.last_name_maternal.to_lowercase(),
                person.first_names.to_lowercase(),
            )
        });

        Ok(items)
    }

    /// 设置或清除学生的小组
    pub async fn set_enrollment_group_impl(
        &self,
        section_id: i64,
        student_id: i64,
        group_id: Option<i64>,
    ) -> Result<bool> {
        let Some(enrollment) = self.find_enrollment_model(section_id, student_id).await? else {
            return Ok(false);
        };

        let mut model: ActiveModel = enrollment.into();
        model.group_id = Set(group_id);
        model
            .update(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("更新小组失败: {e}")))?;

        Ok(true)
    }
}
