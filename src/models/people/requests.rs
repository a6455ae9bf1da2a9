use serde::Deserialize;
use ts_rs::TS;

use super::entities::PersonRole;

// 注册请求
//
// user_type 保留为字符串，未知类型由服务层返回 400
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "person.ts")]
pub struct RegisterRequest {
    pub first_names: String,
    pub last_name_paternal: String,
    #[serde(default)]
    pub last_name_maternal: String,
    pub email: String,
    pub password: String,
    pub user_type: String,
    pub student_code: Option<String>,
}

// 存储层使用的新建人员数据，密码已哈希
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub first_names: String,
    pub last_name_paternal: String,
    pub last_name_maternal: String,
    pub email: String,
    pub password_hash: String,
    pub role: PersonRole,
    pub student_code: Option<String>,
}
