//! 小组实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "section_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub section_id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sections::Entity",
        from = "Column::SectionId",
        to = "super::sections::Column::Id"
    )]
    Section,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_group(self, member_count: i64) -> crate::models::groups::entities::Group {
        crate::models::groups::entities::Group {
            id: self.id,
            section_id: self.section_id,
            name: self.name,
            member_count,
            final_average: None,
        }
    }
}
