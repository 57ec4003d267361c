use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use contracts::system::auth::TokenClaims;

/// Extracts and validates the bearer token of a request.
pub fn authenticate(headers: &HeaderMap) -> Result<TokenClaims, StatusCode> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    super::jwt::validate_token(token).map_err(|e| {
        tracing::debug!("Rejected token: {:#}", e);
        StatusCode::UNAUTHORIZED
    })
}

/// Middleware that requires valid JWT authentication
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = authenticate(req.headers())?;

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware that requires admin privileges
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = authenticate(req.headers())?;

    if !claims.is_admin {
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::super::jwt::test_support::issue_token;
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert("Authorization", HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn test_authenticate() {
        let token = issue_token("u7", false, 600);
        let claims = authenticate(&headers(&format!("Bearer {token}"))).unwrap();
        assert_eq!(claims.sub, "u7");
    }

    #[test]
    fn test_missing_or_malformed_header() {
        let token = issue_token("u7", false, 600);
        assert_eq!(authenticate(&HeaderMap::new()), Err(StatusCode::UNAUTHORIZED));
        assert_eq!(authenticate(&headers(&token)), Err(StatusCode::UNAUTHORIZED));
        assert_eq!(
            authenticate(&headers("Bearer nope")),
            Err(StatusCode::UNAUTHORIZED)
        );
    }
}
