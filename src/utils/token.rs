use uuid::Uuid;

/// 邀请令牌生成器
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// UUID v4 令牌
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTokenGenerator;

impl TokenGenerator for UuidTokenGenerator {
    fn generate(&self) -> String {
        generate_invitation_token()
    }
}

/// 生成邀请令牌（UUID v4）
pub fn generate_invitation_token() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_uuids_and_unique() {
        let a = generate_invitation_token();
        let b = generate_invitation_token();
        assert!(Uuid::parse_str(&a).is_ok());
        assert_eq!(a.len(), 36);
        assert_ne!(a, b);
    }

    #[test]
    fn test_generator_through_trait_object() {
        let generator: Box<dyn TokenGenerator> = Box::new(UuidTokenGenerator);
        assert!(Uuid::parse_str(&generator.generate()).is_ok());
    }
}
