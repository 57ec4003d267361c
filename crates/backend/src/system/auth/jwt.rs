use anyhow::{Context, Result};
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, DecodingKey, Validation};
use once_cell::sync::OnceCell;

static JWT_SECRET: OnceCell<String> = OnceCell::new();

/// Installs the secret shared with the auth provider. Only the first call
/// has an effect.
pub fn init_secret(secret: String) {
    if JWT_SECRET.set(secret).is_err() {
        tracing::warn!("JWT secret already initialized, ignoring new value");
    }
}

fn secret() -> Result<&'static str> {
    JWT_SECRET
        .get()
        .map(String::as_str)
        .context("JWT secret is not initialized")
}

/// Validate JWT token and extract claims
pub fn validate_token(token: &str) -> Result<TokenClaims> {
    let secret = secret()?;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    pub const TEST_SECRET: &str = "test-secret";

    /// Signs a token the way the auth provider does.
    pub fn issue_token(sub: &str, is_admin: bool, lifetime_secs: i64) -> String {
        init_secret(TEST_SECRET.to_string());
        let now = chrono::Utc::now().timestamp();
        let claims = TokenClaims {
            sub: sub.to_string(),
            username: format!("{sub}-name"),
            full_name: None,
            email: None,
            is_admin,
            exp: (now + lifetime_secs) as usize,
            iat: now as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::issue_token;
    use super::*;

    #[test]
    fn test_valid_token() {
        let token = issue_token("u1", true, 3600);
        let claims = validate_token(&token).unwrap();
        assert_eq!(claims.sub, "u1");
        assert!(claims.is_admin);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = issue_token("u1", false, -3600);
        assert!(validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        issue_token("u1", false, 3600);
        assert!(validate_token("not-a-jwt").is_err());
    }
}
