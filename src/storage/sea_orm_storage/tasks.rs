//! 任务存储操作

use super::SeaOrmStorage;
use crate::entity::tasks::{ActiveModel, Column, Entity as Tasks};
use crate::errors::{Result, ScorelyError};
use crate::models::tasks::{
    entities::Task,
    requests::{CreateTaskRequest, UpdateTaskRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建任务
    pub async fn create_task_impl(&self, section_id: i64, req: CreateTaskRequest) -> Result<Task> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            section_id: Set(section_id),
            name: Set(req.name.trim().to_string()),
            kind: Set(req.kind.trim().to_uppercase()),
            description: Set(req.description),
            due_at: Set(req.due_at.map(|d| d.timestamp())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("创建任务失败: {e}")))?;

        Ok(result.into_task())
    }

    pub async fn get_task_by_id_impl(&self, task_id: i64) -> Result<Option<Task>> {
        let result = Tasks::find_by_id(task_id)
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询任务失败: {e}")))?;

        Ok(result.map(|m| m.into_task()))
    }

    /// 列出课程班任务，按创建顺序
    pub async fn list_tasks_by_section_impl(&self, section_id: i64) -> Result<Vec<Task>> {
        let tasks = Tasks::find()
            .filter(Column::SectionId.eq(section_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询任务列表失败: {e}")))?;

        Ok(tasks.into_iter().map(|m| m.into_task()).collect())
    }

    pub async fn update_task_impl(
        &self,
        task_id: i64,
        update: UpdateTaskRequest,
    ) -> Result<Option<Task>> {
        let existing = Tasks::find_by_id(task_id)
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询任务失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(kind) = update.kind {
            model.kind = Set(kind.trim().to_uppercase());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(due_at) = update.due_at {
            model.due_at = Set(Some(due_at.timestamp()));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("更新任务失败: {e}")))?;

        Ok(Some(result.into_task()))
    }

    /// 删除任务，其提交随外键级联删除
    pub async fn delete_task_impl(&self, task_id: i64) -> Result<bool> {
        let result = Tasks::delete_by_id(task_id)
            .exec(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("删除任务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
