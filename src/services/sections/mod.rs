pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::sections::requests::{
    CreateSectionRequest, SectionListQuery, UpdateSectionRequest,
};
use crate::storage::Storage;

/// 课程名最大长度
pub(crate) const MAX_COURSE_NAME_CHARS: usize = 40;

pub struct SectionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SectionService {
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

    // 当前人员的课程班：教师为自己开设的，学生为已加入的
    pub async fn list_sections(
        &self,
        request: &HttpRequest,
        query: SectionListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_sections(self, request, query).await
    }

    pub async fn create_section(
        &self,
        request: &HttpRequest,
        section_data: CreateSectionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_section(self, request, section_data).await
    }

    pub async fn get_section(
        &self,
        request: &HttpRequest,
        section_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_section(self, request, section_id).await
    }

    pub async fn update_section(
        &self,
        request: &HttpRequest,
        section_id: i64,
        update_data: UpdateSectionRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_section(self, request, section_id, update_data).await
    }

    pub async fn delete_section(
        &self,
        request: &HttpRequest,
        section_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_section(self, request, section_id).await
    }
}

/// 年份合法范围
pub(crate) fn validate_year(year: i32) -> Result<i32, String> {
    if (2000..=2100).contains(&year) {
        Ok(year)
    } else {
        Err(format!("Invalid year: {year}"))
    }
}

/// 同一教师同一年份下课程名不能重复
pub(crate) async fn check_name_unused(
    storage: &Arc<dyn Storage>,
    professor_id: i64,
    year: i32,
    course_name: &str,
    exclude_section_id: Option<i64>,
) -> Result<(), HttpResponse> {
    use crate::models::ErrorCode;
    use crate::services::access::{bad_request, internal_error};

    match storage
        .section_name_exists(professor_id, year, course_name, exclude_section_id)
        .await
    {
        Ok(true) => Err(bad_request(
            ErrorCode::SectionNameDuplicated,
            format!("A section named '{course_name}' already exists for {year}"),
        )),
        Ok(false) => Ok(()),
        Err(e) => Err(internal_error("Failed to check section name", e)),
    }
}
