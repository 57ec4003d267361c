//! Session DTOs shared with the external auth provider.
//!
//! The provider issues HS256 tokens carrying [`TokenClaims`]; the backend only
//! validates them and the frontend only stores them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
}

impl UserInfo {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    pub sub: String, // user_id
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}

impl From<TokenClaims> for UserInfo {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
            full_name: claims.full_name,
            email: claims.email,
            is_admin: claims.is_admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_without_optional_fields() {
        let json = r#"{"sub":"u1","username":"maria","exp":10,"iat":1}"#;
        let claims: TokenClaims = serde_json::from_str(json).unwrap();
        assert!(!claims.is_admin);

        let user: UserInfo = claims.into();
        assert_eq!(user.id, "u1");
        assert_eq!(user.display_name(), "maria");
    }
}
