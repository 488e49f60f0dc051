/*
 * Responsibility
 * - /authorize の request DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeRequest {
    pub authorization_token: String,
}

impl AuthorizeRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.authorization_token.trim().is_empty() {
            return Err("authorizationToken is required");
        }
        Ok(())
    }

    // Gateways sometimes forward the raw `Authorization` header value, so
    // accept both the bare token and `Bearer <token>`.
    pub fn token(&self) -> &str {
        let t = self.authorization_token.trim();
        t.strip_prefix("Bearer ").unwrap_or(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(token: &str) -> AuthorizeRequest {
        AuthorizeRequest {
            authorization_token: token.to_string(),
        }
    }

    #[test]
    fn validate_rejects_blank_token() {
        assert!(req("").validate().is_err());
        assert!(req("   ").validate().is_err());
        assert!(req("abc.def.ghi").validate().is_ok());
    }

    #[test]
    fn token_strips_optional_bearer_prefix() {
        assert_eq!(req("abc.def.ghi").token(), "abc.def.ghi");
        assert_eq!(req("Bearer abc.def.ghi").token(), "abc.def.ghi");
        assert_eq!(req("  Bearer abc.def.ghi  ").token(), "abc.def.ghi");
    }
}
