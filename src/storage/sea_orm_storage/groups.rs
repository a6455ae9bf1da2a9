//! 小组存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::groups::{ActiveModel, Column, Entity as Groups};
use crate::errors::{Result, ScorelyError};
use crate::models::groups::entities::Group;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    async fn count_group_members(&self, group_id: i64) -> Result<i64> {
        let count = Enrollments::find()
            .filter(EnrollmentColumn::GroupId.eq(group_id))
            .count(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询小组人数失败: {e}")))?;

        Ok(count as i64)
    }

    pub async fn create_group_impl(&self, section_id: i64, name: &str) -> Result<Group> {
        let model = ActiveModel {
            section_id: Set(section_id),
            name: Set(name.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("创建小组失败: {e}")))?;

        Ok(result.into_group(0))
    }

    pub async fn get_group_by_id_impl(&self, group_id: i64) -> Result<Option<Group>> {
        let result = Groups::find_by_id(group_id)
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询小组失败: {e}")))?;

        match result {
            Some(model) => {
                let members = self.count_group_members(model.id).await?;
                Ok(Some(model.into_group(members)))
            }
            None => Ok(None),
        }
    }

    pub async fn list_groups_by_section_impl(&self, section_id: i64) -> Result<Vec<Group>> {
        let groups = Groups::find()
            .filter(Column::SectionId.eq(section_id))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询小组列表失败: {e}")))?;

        let mut items = Vec::with_capacity(groups.len());
        for group in groups {
            let members = self.count_group_members(group.id).await?;
            items.push(group.into_group(members));
        }
        Ok(items)
    }
}
