//! 提交与成绩存储操作

use super::SeaOrmStorage;
use crate::entity::individual_submissions::{
    ActiveModel as IndividualActiveModel, Column as IndividualColumn,
    Entity as IndividualSubmissions,
};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::tasks::{Column as TaskColumn, Entity as Tasks};
use crate::errors::{Result, ScorelyError};
use crate::models::submissions::entities::Submission;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 创建带成绩的提交，提交与个人提交在同一事务中写入
    pub async fn create_graded_submission_impl(
        &self,
        task_id: i64,
        student_id: i64,
        grade: f64,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScorelyError::database_operation(format!("开启事务失败: {e}")))?;

        let submission = ActiveModel {
            task_id: Set(task_id),
            grade: Set(Some(grade)),
            submitted_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ScorelyError::database_operation(format!("创建提交失败: {e}")))?;

        IndividualActiveModel {
            submission_id: Set(submission.id),
            student_id: Set(student_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ScorelyError::database_operation(format!("创建个人提交失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| ScorelyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(submission.into_submission(student_id))
    }

    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let submission = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询提交失败: {e}")))?;

        let Some(submission) = submission else {
            return Ok(None);
        };

        let link = IndividualSubmissions::find()
            .filter(IndividualColumn::SubmissionId.eq(submission.id))
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询个人提交失败: {e}")))?;

        // 没有个人提交关联的提交不属于任何学生
        Ok(link.map(|l| submission.into_submission(l.student_id)))
    }

    pub async fn update_submission_grade_impl(
        &self,
        submission_id: i64,
        grade: f64,
    ) -> Result<bool> {
        let result = Submissions::update_many()
            .col_expr(Column::Grade, sea_orm::sea_query::Expr::value(grade))
            .filter(Column::Id.eq(submission_id))
            .exec(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("更新成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生在某任务上的最新提交
    pub async fn get_latest_submission_impl(
        &self,
        task_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let submission_ids: Vec<i64> = IndividualSubmissions::find()
            .filter(IndividualColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询个人提交失败: {e}")))?
            .into_iter()
            .map(|l| l.submission_id)
            .collect();

        if submission_ids.is_empty() {
            return Ok(None);
        }

        let latest = Submissions::find()
            .filter(Column::TaskId.eq(task_id))
            .filter(Column::Id.is_in(submission_ids))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询最新提交失败: {e}")))?;

        Ok(latest.map(|s| s.into_submission(student_id)))
    }

    /// 课程班内任务的所有提交，可限定某个学生
    pub async fn list_section_submissions_impl(
        &self,
        section_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<Submission>> {
        let task_ids: Vec<i64> = Tasks::find()
            .filter(TaskColumn::SectionId.eq(section_id))
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询任务失败: {e}")))?
            .into_iter()
            .map(|t| t.id)
            .collect();

        if task_ids.is_empty() {
            return Ok(vec![]);
        }

        let submissions = Submissions::find()
            .filter(Column::TaskId.is_in(task_ids))
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询提交失败: {e}")))?;

        if submissions.is_empty() {
            return Ok(vec![]);
        }

        let mut links = IndividualSubmissions::find()
            .filter(IndividualColumn::SubmissionId.is_in(submissions.iter().map(|s| s.id)));
        if let Some(student_id) = student_id {
            links = links.filter(IndividualColumn::StudentId.eq(student_id));
        }

        let owners: HashMap<i64, i64> = links
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询个人提交失败: {e}")))?
            .into_iter()
            .map(|l| (l.submission_id, l.student_id))
            .collect();

        Ok(submissions
            .into_iter()
            .filter_map(|s| {
                let student_id = *owners.get(&s.id)?;
                Some(s.into_submission(student_id))
            })
            .collect())
    }
}
