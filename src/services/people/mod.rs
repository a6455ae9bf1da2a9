pub mod lookup;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct PeopleService {
    storage: Option<Arc<dyn Storage>>,
}

impl PeopleService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 根据人员 ID 获取学生 ID
    pub async fn get_student_id(
        &self,
        request: &HttpRequest,
        person_id: i64,
    ) -> ActixResult<HttpResponse> {
        lookup::get_student_id(self, request, person_id).await
    }

    // 根据人员 ID 获取教师 ID
    pub async fn get_professor_id(
        &self,
        request: &HttpRequest,
        person_id: i64,
    ) -> ActixResult<HttpResponse> {
        lookup::get_professor_id(self, request, person_id).await
    }
}
