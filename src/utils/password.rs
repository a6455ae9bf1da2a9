use crate::config::Argon2Config;
use crate::errors::ScorelyError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// 使用 Argon2id 哈希密码，参数来自配置
pub fn hash_password(password: &str, params: &Argon2Config) -> Result<String, ScorelyError> {
    let params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        None,
    )
    .map_err(|e| ScorelyError::validation(format!("Invalid Argon2 parameters: {e}")))?;

    let salt = SaltString::generate(&mut OsRng);
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ScorelyError::validation(format!("Password hashing failed: {e}")))
}

/// 校验密码，哈希串自带参数
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_params() -> Argon2Config {
        Argon2Config {
            memory_cost: 8,
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Secreto123", &cheap_params()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Secreto123", &hash));
        assert!(!verify_password("secreto123", &hash));
    }

    #[test]
    fn test_plain_text_is_not_a_hash() {
        assert!(!verify_password("Secreto123", "Secreto123"));
    }
}
