use contracts::system::auth::{LoginResponse, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// A stored session is being validated; guards must wait.
    pub restoring: bool,
}

impl AuthState {
    pub fn signed_in(access_token: String, user_info: UserInfo) -> Self {
        Self {
            access_token: Some(access_token),
            user_info: Some(user_info),
            restoring: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user_info.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user_info.as_ref().map_or(false, |u| u.is_admin)
    }
}

/// Session owned by [`AuthProvider`]; the methods below are its only writers.
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
}

impl AuthContext {
    pub fn state(&self) -> ReadSignal<AuthState> {
        self.state.read_only()
    }

    /// Current access token (tracked).
    pub fn token(&self) -> Option<String> {
        self.state.with(|s| s.access_token.clone())
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.state.with(|s| s.user_info.clone())
    }

    pub fn sign_in(&self, response: LoginResponse) {
        storage::save_tokens(&response.access_token, &response.refresh_token);
        log::info!("Signed in as {}", response.user.username);
        self.state
            .set(AuthState::signed_in(response.access_token, response.user));
    }

    pub async fn sign_out(&self) {
        if let Some(refresh_token) = storage::get_refresh_token() {
            if let Err(e) = api::logout(refresh_token).await {
                log::warn!("Logout at provider failed: {}", e);
            }
        }
        storage::clear_tokens();
        self.state.set(AuthState::default());
    }
}

/// Validates a stored token, refreshing it once if the backend rejects it.
async fn restore_session(access_token: String) -> Option<(String, UserInfo)> {
    match api::get_current_user(&access_token).await {
        Ok(user) => return Some((access_token, user)),
        Err(e) => log::info!("Stored session rejected: {}", e),
    }

    let refresh_token = storage::get_refresh_token()?;
    let refreshed = match api::refresh_token(refresh_token).await {
        Ok(r) => r,
        Err(e) => {
            log::info!("Session refresh failed: {}", e);
            return None;
        }
    };
    storage::save_access_token(&refreshed.access_token);

    let user = api::get_current_user(&refreshed.access_token).await.ok()?;
    Some((refreshed.access_token, user))
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let stored_token = storage::get_access_token();
    let state = RwSignal::new(AuthState {
        restoring: stored_token.is_some(),
        ..AuthState::default()
    });
    provide_context(AuthContext { state });

    if let Some(token) = stored_token {
        spawn_local(async move {
            match restore_session(token).await {
                Some((token, user)) => {
                    log::info!("Session restored for {}", user.username);
                    state.set(AuthState::signed_in(token, user));
                }
                None => {
                    storage::clear_tokens();
                    state.set(AuthState::default());
                }
            }
        });
    }

    children()
}

/// Hook to access auth state. Panics outside [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> UserInfo {
        UserInfo {
            id: "u1".into(),
            username: "ana".into(),
            full_name: None,
            email: None,
            is_admin,
        }
    }

    #[test]
    fn test_auth_state_flags() {
        assert!(!AuthState::default().is_authenticated());

        let regular = AuthState::signed_in("t".into(), user(false));
        assert!(regular.is_authenticated());
        assert!(!regular.is_admin());

        let admin = AuthState::signed_in("t".into(), user(true));
        assert!(admin.is_admin());
    }
}
