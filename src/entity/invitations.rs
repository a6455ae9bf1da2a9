//! 邀请实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invitations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub section_id: i64,
    pub email: String,
    #[sea_orm(unique)]
    pub token: String,
    pub status: String,
    pub created_at: i64,
    pub expires_at: i64,
    pub responded_at: Option<i64>,
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
    pub fn into_invitation(self) -> crate::models::invitations::entities::Invitation {
        use crate::models::invitations::entities::{Invitation, InvitationStatus};

        Invitation {
            id: self.id,
            section_id: self.section_id,
            email: self.email,
            token: self.token,
            status: self
                .status
                .parse::<InvitationStatus>()
                .unwrap_or(InvitationStatus::Expired),
            created_at: super::to_datetime(self.created_at),
            expires_at: super::to_datetime(self.expires_at),
            responded_at: self.responded_at.map(super::to_datetime),
        }
    }
}
