use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 人员角色
#[derive(Debug, Clone, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "person.ts")]
pub enum PersonRole {
    Student,   // 学生
    Professor, // 教师
}

impl PersonRole {
    pub const STUDENT: &'static str = "student";
    pub const PROFESSOR: &'static str = "professor";

    pub fn student_roles() -> &'static [&'static PersonRole] {
        &[&Self::Student]
    }
    pub fn professor_roles() -> &'static [&'static PersonRole] {
        &[&Self::Professor]
    }
    pub fn all_roles() -> &'static [&'static PersonRole] {
        &[&Self::Student, &Self::Professor]
    }
}

impl<'de> Deserialize<'de> for PersonRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for PersonRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonRole::Student => write!(f, "{}", PersonRole::STUDENT),
            PersonRole::Professor => write!(f, "{}", PersonRole::PROFESSOR),
        }
    }
}

impl std::str::FromStr for PersonRole {
    type Err = String;

    /// 同时接受旧客户端使用的 "Estudiante" / "Profesor"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" | "estudiante" => Ok(PersonRole::Student),
            "professor" | "profesor" => Ok(PersonRole::Professor),
            _ => Err(format!("Invalid user type: {s}")),
        }
    }
}

// 人员实体，学生或教师的身份根
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "person.ts")]
pub struct Person {
    pub id: i64,
    pub first_names: String,
    pub last_name_paternal: String,
    pub last_name_maternal: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: PersonRole,
    pub student_id: Option<i64>,
    pub student_code: Option<String>,
    pub professor_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Person {
    pub fn surnames(&self) -> String {
        join_names(&[&self.last_name_paternal, &self.last_name_maternal])
    }

    pub fn full_name(&self) -> String {
        join_names(&[
            &self.first_names,
            &self.last_name_paternal,
            &self.last_name_maternal,
        ])
    }

    // 生成访问令牌
    pub fn generate_access_token(&self) -> Result<String, jsonwebtoken::errors::Error> {
        crate::utils::jwt::JwtUtils::generate_access_token(self.id, &self.role.to_string())
    }
}

/// 拼接姓名片段，忽略空白部分
pub fn join_names(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "person.ts")]
pub struct Student {
    pub id: i64,
    pub person_id: i64,
    pub student_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "person.ts")]
pub struct Professor {
    pub id: i64,
    pub person_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_accepts_aliases() {
        assert_eq!("student".parse::<PersonRole>(), Ok(PersonRole::Student));
        assert_eq!("Estudiante".parse::<PersonRole>(), Ok(PersonRole::Student));
        assert_eq!("Profesor".parse::<PersonRole>(), Ok(PersonRole::Professor));
        assert!("admin".parse::<PersonRole>().is_err());
    }

    #[test]
    fn test_join_names_skips_blanks() {
        assert_eq!(join_names(&["Ana", " ", "Quispe"]), "Ana Quispe");
        assert_eq!(join_names(&[" Luis ", "Rojas", "Diaz"]), "Luis Rojas Diaz");
    }
}
