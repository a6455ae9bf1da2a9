//! 邀请服务
//!
//! 邀请状态只能从 PENDIENTE 变为 ACEPTADA、RECHAZADA 或 EXPIRADA，终态不可再改变。

pub mod accept;
pub mod create;
pub mod info;
pub mod pending;
pub mod reject;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::invitations::{
    entities::Invitation,
    requests::{CreateInvitationRequest, InvitationTokenRequest},
    responses::InvitationResponse,
};
use crate::services::access::{internal_error, load_section};
use crate::services::mail::Mailer;
use crate::storage::Storage;
use crate::utils::token::{TokenGenerator, UuidTokenGenerator};

pub struct InvitationService {
    storage: Option<Arc<dyn Storage>>,
    token_generator: Arc<dyn TokenGenerator>,
}

impl InvitationService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            token_generator: Arc::new(UuidTokenGenerator),
        }
    }

    pub fn with_token_generator(token_generator: Arc<dyn TokenGenerator>) -> Self {
        Self {
            storage: None,
            token_generator,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_mailer(&self, request: &HttpRequest) -> Option<Arc<dyn Mailer>> {
        request
            .app_data::<web::Data<Arc<dyn Mailer>>>()
            .map(|mailer| mailer.get_ref().clone())
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub(crate) fn generate_token(&self) -> String {
        self.token_generator.generate()
    }

    // 教师邀请学生加入课程班
    pub async fn create_invitation(
        &self,
        request: &HttpRequest,
        invitation_data: CreateInvitationRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_invitation(self, request, invitation_data).await
    }

    // 公开查询邀请信息
    pub async fn get_invitation_info(
        &self,
        request: &HttpRequest,
        token: &str,
    ) -> ActixResult<HttpResponse> {
        info::get_invitation_info(self, request, token).await
    }

    // 当前学生的待处理邀请
    pub async fn list_pending(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        pending::list_pending(self, request).await
    }

    pub async fn accept_invitation(
        &self,
        request: &HttpRequest,
        token_data: InvitationTokenRequest,
    ) -> ActixResult<HttpResponse> {
        accept::accept_invitation(self, request, token_data).await
    }

    pub async fn reject_invitation(
        &self,
        request: &HttpRequest,
        token_data: InvitationTokenRequest,
    ) -> ActixResult<HttpResponse> {
        reject::reject_invitation(self, request, token_data).await
    }
}

/// 组装邀请响应：附带课程名和教师姓名
pub(crate) async fn build_invitation_response(
    storage: &Arc<dyn Storage>,
    invitation: Invitation,
) -> Result<InvitationResponse, HttpResponse> {
    let section = load_section(storage, invitation.section_id).await?;
    let professor_name = match storage.get_person_by_professor_id(section.professor_id).await {
        Ok(Some(professor)) => professor.full_name(),
        Ok(None) => String::new(),
        Err(e) => return Err(internal_error("Failed to get professor", e)),
    };
    Ok(InvitationResponse::new(
        invitation,
        section.course_name,
        professor_name,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{HttpMessage, body::to_bytes, http::StatusCode, test::TestRequest};
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::errors::Result;
    use crate::models::people::{entities::PersonRole, requests::NewPerson};
    use crate::models::sections::requests::CreateSectionRequest;
    use crate::services::mail::MailMessage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    struct FixedToken;

    impl TokenGenerator for FixedToken {
        fn generate(&self) -> String {
            "token-fijo".to_string()
        }
    }

    #[derive(Default)]
    struct CapturingMailer {
        sent: Mutex<Vec<MailMessage>>,
    }

    #[async_trait]
    impl Mailer for CapturingMailer {
        async fn send(&self, message: MailMessage) -> Result<()> {
            self.sent.lock().unwrap().push(message);
            Ok(())
        }
    }

    #[actix_web::test]
    async fn test_generated_token_is_stored_and_mailed() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await.unwrap());
        let professor = storage
            .register_person(NewPerson {
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
        let section = storage
            .create_section(
                professor.professor_id.unwrap(),
                CreateSectionRequest {
                    course_name: "Redes".to_string(),
                    year: Some(2025),
                    code: None,
                },
            )
            .await
            .unwrap();

        let mailer = Arc::new(CapturingMailer::default());
        let request = TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(mailer.clone() as Arc<dyn Mailer>))
            .to_http_request();
        request.extensions_mut().insert(professor);

        let service = InvitationService::with_token_generator(Arc::new(FixedToken));
        let resp = service
            .create_invitation(
                &request,
                CreateInvitationRequest {
                    section_id: section.id,
                    email: "Luis@Uni.pe".to_string(),
                    student_name: Some("Luis".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: serde_json::Value =
            serde_json::from_slice(&to_bytes(resp.into_body()).await.unwrap()).unwrap();
        assert_eq!(body["data"]["token"], "token-fijo");
        assert_eq!(body["data"]["email"], "luis@uni.pe");

        let stored = storage
            .get_invitation_by_token("token-fijo")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.section_id, section.id);

        let sent = mailer.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "luis@uni.pe");
        let link = AppConfig::get().invitation_link("token-fijo");
        assert!(sent[0].html_body.contains(&link), "{}", sent[0].html_body);
    }
}
