use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

const MIN_PASSWORD_LEN: usize = 8;

static COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "12345678",
    "123456789",
    "qwerty123",
    "contraseña",
    "contrasena1",
    "abcd1234",
];

/// 密码策略：至少 8 个字符，同时包含大写、小写和数字，且不能是常见弱密码
///
/// 返回所有未满足的规则。
pub fn password_policy_violations(password: &str) -> Vec<&'static str> {
    let checks: [(bool, &'static str); 4] = [
        (
            password.chars().count() >= MIN_PASSWORD_LEN,
            "Password must be at least 8 characters long",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Password must contain at least one uppercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Password must contain at least one lowercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Password must contain at least one digit",
        ),
    ];

    let mut violations: Vec<&'static str> = checks
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, msg)| msg)
        .collect();

    if COMMON_PASSWORDS
        .iter()
        .any(|weak| password.to_lowercase() == *weak)
    {
        violations.push("Password is too common, please choose a stronger password");
    }
    violations
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let violations = password_policy_violations(password);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations.join("; "))
    }
}

/// 校验必填文本：去除首尾空白后非空且不超过 max_chars 个字符
pub fn validate_required_text(value: &str, field: &str, max_chars: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} is required"));
    }
    if trimmed.chars().count() > max_chars {
        return Err(format!("{field} must be at most {max_chars} characters"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("Secreto123").is_ok());
        assert!(validate_password("MiClave2024").is_ok());
    }

    #[test]
    fn test_password_violations_are_reported_together() {
        let violations = password_policy_violations("abc");
        assert!(violations.contains(&"Password must be at least 8 characters long"));
        assert!(violations.contains(&"Password must contain at least one uppercase letter"));
        assert!(violations.contains(&"Password must contain at least one digit"));
        assert!(!violations.contains(&"Password must contain at least one lowercase letter"));
    }

    #[test]
    fn test_common_password() {
        let err = validate_password("Password1").unwrap_err();
        assert!(err.contains("too common"));
    }

    #[test]
    fn test_email_format() {
        assert!(validate_email("ana.quispe@unmsm.edu.pe").is_ok());
        assert!(validate_email("ana@").is_err());
        assert!(validate_email("no-at-sign.pe").is_err());
    }

    #[test]
    fn test_required_text() {
        assert_eq!(
            validate_required_text("  Calculo I ", "course_name", 40),
            Ok("Calculo I".to_string())
        );
        assert!(validate_required_text("   ", "course_name", 40).is_err());
        assert!(validate_required_text(&"x".repeat(41), "course_name", 40).is_err());
        assert!(validate_required_text(&"ñ".repeat(10), "kind", 10).is_ok());
    }
}
