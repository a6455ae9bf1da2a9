//! 邀请存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::ActiveModel as EnrollmentActiveModel;
use crate::entity::invitations::{ActiveModel, Column, Entity as Invitations};
use crate::errors::{Result, ScorelyError};
use crate::models::{
    enrollments::entities::Enrollment,
    invitations::{
        entities::{Invitation, InvitationStatus},
        requests::NewInvitation,
    },
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
    TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn create_invitation_impl(&self, req: NewInvitation) -> Result<Invitation> {
        let model = ActiveModel {
            section_id: Set(req.section_id),
            email: Set(req.email),
            token: Set(req.token),
            status: Set(InvitationStatus::Pending.to_string()),
            created_at: Set(Utc::now().timestamp()),
            expires_at: Set(req.expires_at.timestamp()),
            responded_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("创建邀请失败: {e}")))?;

        Ok(result.into_invitation())
    }

    pub async fn get_invitation_by_token_impl(&self, token: &str) -> Result<Option<Invitation>> {
        let result = Invitations::find()
            .filter(Column::Token.eq(token))
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询邀请失败: {e}")))?;

        Ok(result.map(|m| m.into_invitation()))
    }

    pub async fn find_open_invitation_impl(
        &self,
        email: &str,
        section_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<Invitation>> {
        let result = Invitations::find()
            .filter(Column::Email.eq(email))
            .filter(Column::SectionId.eq(section_id))
            .filter(Column::Status.eq(InvitationStatus::PENDING))
            .filter(Column::ExpiresAt.gt(now.timestamp()))
            .one(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询邀请失败: {e}")))?;

        Ok(result.map(|m| m.into_invitation()))
    }

    /// 某邮箱收到的待处理且未过期的邀请
    pub async fn list_open_invitations_by_email_impl(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Invitation>> {
        let result = Invitations::find()
            .filter(Column::Email.eq(email))
            .filter(Column::Status.eq(InvitationStatus::PENDING))
            .filter(Column::ExpiresAt.gt(now.timestamp()))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询邀请列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_invitation()).collect())
    }

    /// 条件更新：只有 PENDIENTE 状态的邀请会被修改
    pub async fn update_invitation_status_impl(
        &self,
        invitation_id: i64,
        status: InvitationStatus,
        responded_at: Option<DateTime<Utc>>,
    ) -> Result<bool> {
        let result = Invitations::update_many()
            .col_expr(Column::Status, Expr::value(status.to_string()))
            .col_expr(
                Column::RespondedAt,
                Expr::value(responded_at.map(|t| t.timestamp())),
            )
            .filter(Column::Id.eq(invitation_id))
            .filter(Column::Status.eq(InvitationStatus::PENDING))
            .exec(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("更新邀请状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_invitation_impl(&self, invitation_id: i64) -> Result<bool> {
        let result = Invitations::delete_by_id(invitation_id)
            .exec(&self.db)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("删除邀请失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 接受邀请：标记 ACEPTADA 并写入选课，两步在同一事务中完成
    pub async fn accept_invitation_impl(
        &self,
        invitation_id: i64,
        student_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Enrollment> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScorelyError::database_operation(format!("开启事务失败: {e}")))?;

        let invitation = Invitations::find_by_id(invitation_id)
            .one(&txn)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("查询邀请失败: {e}")))?
            .ok_or_else(|| ScorelyError::not_found("Invitation not found"))?;

        let updated = Invitations::update_many()
            .col_expr(Column::Status, Expr::value(InvitationStatus::ACCEPTED))
            .col_expr(Column::RespondedAt, Expr::value(Some(now.timestamp())))
            .filter(Column::Id.eq(invitation_id))
            .filter(Column::Status.eq(InvitationStatus::PENDING))
            .exec(&txn)
            .await
            .map_err(|e| ScorelyError::database_operation(format!("更新邀请状态失败: {e}")))?;

        // 并发请求已经处理过该邀请
        if updated.rows_affected == 0 {
            return Err(ScorelyError::conflict("Invitation has already been processed"));
        }

        let enrollment = EnrollmentActiveModel {
            student_id: Set(student_id),
            section_id: Set(invitation.section_id),
            group_id: Set(None),
            enrolled_at: Set(now.timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            // (student_id, section_id) 唯一索引：并发接受同一课程班的另一份邀请
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ScorelyError::duplicate("Student is already enrolled in this section")
            }
            _ => ScorelyError::database_operation(format!("写入选课记录失败: {e}")),
        })?;

        txn.commit()
            .await
            .map_err(|e| ScorelyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(enrollment.into_enrollment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::people::{entities::PersonRole, requests::NewPerson};
    use crate::models::sections::requests::CreateSectionRequest;
    use chrono::Duration;

    async fn setup(storage: &SeaOrmStorage) -> (i64, i64) {
        let professor = storage
            .register_person_impl(NewPerson {
                first_names: "Rosa".to_string(),
                last_name_paternal: "Vega".to_string(),
                last_name_maternal: String::new(),
                email: "rosa@uni.pe".to_string(),
                password_hash: "hash".to_string(),
                role: PersonRole::Professor,
                student_code: None,
            })
            .await
            .unwrap();
        let student = storage
            .register_person_impl(NewPerson {
                first_names: "Luis".to_string(),
                last_name_paternal: "Diaz".to_string(),
                last_name_maternal: String::new(),
                email: "luis@uni.pe".to_string(),
                password_hash: "hash".to_string(),
                role: PersonRole::Student,
                student_code: Some("20240001".to_string()),
            })
            .await
            .unwrap();
        let section = storage
            .create_section_impl(
                professor.professor_id.unwrap(),
                CreateSectionRequest {
                    course_name: "Redes".to_string(),
                    year: Some(2025),
                    code: None,
                },
            )
            .await
            .unwrap();
        (section.id, student.student_id.unwrap())
    }

    fn new_invitation(section_id: i64, token: &str, expires_at: DateTime<Utc>) -> NewInvitation {
        NewInvitation {
            section_id,
            email: "luis@uni.pe".to_string(),
            token: token.to_string(),
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_open_invitation_ignores_expired() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let (section_id, _) = setup(&storage).await;
        let now = Utc::now();

        storage
            .create_invitation_impl(new_invitation(section_id, "old", now - Duration::hours(1)))
            .await
            .unwrap();
        assert!(
            storage
                .find_open_invitation_impl("luis@uni.pe", section_id, now)
                .await
                .unwrap()
                .is_none()
        );

        storage
            .create_invitation_impl(new_invitation(section_id, "new", now + Duration::hours(1)))
            .await
            .unwrap();
        let open = storage
            .list_open_invitations_by_email_impl("luis@uni.pe", now)
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].token, "new");
    }

    #[tokio::test]
    async fn test_accept_is_single_use() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let (section_id, student_id) = setup(&storage).await;
        let now = Utc::now();
        let invitation = storage
            .create_invitation_impl(new_invitation(section_id, "tok", now + Duration::hours(1)))
            .await
            .unwrap();

        let enrollment = storage
            .accept_invitation_impl(invitation.id, student_id, now)
            .await
            .unwrap();
        assert_eq!(enrollment.section_id, section_id);

        let reloaded = storage
            .get_invitation_by_token_impl("tok")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.status, InvitationStatus::Accepted);
        assert!(reloaded.responded_at.is_some());

        assert!(
            storage
                .accept_invitation_impl(invitation.id, student_id, now)
                .await
                .is_err()
        );
        assert!(
            !storage
                .update_invitation_status_impl(invitation.id, InvitationStatus::Rejected, Some(now))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_accept_second_invitation_for_enrolled_student_is_duplicate() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let (section_id, student_id) = setup(&storage).await;
        let now = Utc::now();
        let first = storage
            .create_invitation_impl(new_invitation(section_id, "a", now + Duration::hours(1)))
            .await
            .unwrap();
        let second = storage
            .create_invitation_impl(new_invitation(section_id, "b", now + Duration::hours(1)))
            .await
            .unwrap();

        storage
            .accept_invitation_impl(first.id, student_id, now)
            .await
            .unwrap();
        let err = storage
            .accept_invitation_impl(second.id, student_id, now)
            .await
            .unwrap_err();
        assert!(matches!(err, ScorelyError::Duplicate(_)), "{err}");

        // 事务回滚，第二份邀请保持待处理
        let reloaded = storage
            .get_invitation_by_token_impl("b")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.status, InvitationStatus::Pending);
        assert!(reloaded.responded_at.is_none());
    }
}
