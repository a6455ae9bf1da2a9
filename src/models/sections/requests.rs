use serde::{Deserialize, Deserializer};
use ts_rs::TS;

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "section.ts")]
pub struct SectionListQuery {
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "section.ts")]
pub struct CreateSectionRequest {
    pub course_name: String,
    pub year: Option<i32>,
    pub code: Option<i32>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "section.ts")]
pub struct UpdateSectionRequest {
    pub course_name: Option<String>,
    pub year: Option<i32>,
    /// 缺省表示不修改，显式 null 表示清除
    #[serde(default, deserialize_with = "nullable_field")]
    #[ts(optional)]
    pub code: Option<Option<i32>>,
}

/// 区分"未提供"与"显式 null"
fn nullable_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_code_distinguishes_missing_and_null() {
        let missing: UpdateSectionRequest = serde_json::from_str(r#"{"year": 2025}"#).unwrap();
        assert_eq!(missing.code, None);

        let cleared: UpdateSectionRequest = serde_json::from_str(r#"{"code": null}"#).unwrap();
        assert_eq!(cleared.code, Some(None));

        let set: UpdateSectionRequest = serde_json::from_str(r#"{"code": 7}"#).unwrap();
        assert_eq!(set.code, Some(Some(7)));
    }
}
