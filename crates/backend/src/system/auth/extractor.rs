use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use contracts::system::auth::{TokenClaims, UserInfo};

use crate::domain::simulation::service::Caller;

/// Claims of the request's bearer token, put in the request extensions by
/// [`super::middleware::require_auth`] or [`super::middleware::require_admin`].
pub struct AuthenticatedUser(pub TokenClaims);

impl AuthenticatedUser {
    pub fn caller(&self) -> Caller {
        Caller::from(&self.0)
    }

    pub fn user_info(&self) -> UserInfo {
        UserInfo::from(self.0.clone())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A route without the auth layer has no claims
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
