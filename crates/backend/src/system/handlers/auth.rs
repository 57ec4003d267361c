use axum::Json;
use contracts::system::auth::UserInfo;

use crate::system::auth::extractor::AuthenticatedUser;

/// GET /api/auth/me
pub async fn current_user(user: AuthenticatedUser) -> Json<UserInfo> {
    Json(user.user_info())
}
