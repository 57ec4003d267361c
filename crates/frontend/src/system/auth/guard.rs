//! Render-time route guards.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::{use_auth, AuthState};

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/login";
/// Landing page of authenticated users.
pub const DEFAULT_APP_PATH: &str = "/app";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteRequirement {
    Authenticated,
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// The stored session is still being validated.
    Pending,
    Allow,
    Redirect(&'static str),
}

pub fn route_access(state: &AuthState, requirement: RouteRequirement) -> RouteAccess {
    if state.restoring {
        return RouteAccess::Pending;
    }
    if !state.is_authenticated() {
        return RouteAccess::Redirect(LOGIN_PATH);
    }
    match requirement {
        RouteRequirement::Authenticated => RouteAccess::Allow,
        RouteRequirement::Admin if state.is_admin() => RouteAccess::Allow,
        RouteRequirement::Admin => RouteAccess::Redirect(DEFAULT_APP_PATH),
    }
}

fn guarded(requirement: RouteRequirement, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let state = auth.state();
    // Memo so children are not re-created on unrelated session updates
    let access = Memo::new(move |_| state.with(|s| route_access(s, requirement)));

    move || match access.get() {
        RouteAccess::Pending => view! {
            <div class="route-pending">"Verificando sessão..."</div>
        }
        .into_any(),
        RouteAccess::Allow => children().into_any(),
        RouteAccess::Redirect(path) => {
            log::debug!("Route guard redirect to {}", path);
            view! { <Redirect path=path /> }.into_any()
        }
    }
}

/// Renders children only for an authenticated session, otherwise redirects
/// to [`LOGIN_PATH`].
#[component]
pub fn PrivateRoute(children: ChildrenFn) -> impl IntoView {
    guarded(RouteRequirement::Authenticated, children)
}

/// Like [`PrivateRoute`], and redirects authenticated non-admins to
/// [`DEFAULT_APP_PATH`].
#[component]
pub fn AdminRoute(children: ChildrenFn) -> impl IntoView {
    guarded(RouteRequirement::Admin, children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::UserInfo;

    fn session(is_admin: bool) -> AuthState {
        AuthState::signed_in(
            "token".into(),
            UserInfo {
                id: "u1".into(),
                username: "ana".into(),
                full_name: Some("Ana Souza".into()),
                email: None,
                is_admin,
            },
        )
    }

    #[test]
    fn test_private_route_without_session_redirects_to_login() {
        assert_eq!(
            route_access(&AuthState::default(), RouteRequirement::Authenticated),
            RouteAccess::Redirect(LOGIN_PATH)
        );
    }

    #[test]
    fn test_private_route_with_session_allows() {
        assert_eq!(
            route_access(&session(false), RouteRequirement::Authenticated),
            RouteAccess::Allow
        );
    }

    #[test]
    fn test_admin_route() {
        assert_eq!(
            route_access(&AuthState::default(), RouteRequirement::Admin),
            RouteAccess::Redirect(LOGIN_PATH)
        );
        assert_eq!(
            route_access(&session(false), RouteRequirement::Admin),
            RouteAccess::Redirect(DEFAULT_APP_PATH)
        );
        assert_eq!(
            route_access(&session(true), RouteRequirement::Admin),
            RouteAccess::Allow
        );
    }

    #[test]
    fn test_restoring_session_waits() {
        let state = AuthState {
            restoring: true,
            ..AuthState::default()
        };
        assert_eq!(
            route_access(&state, RouteRequirement::Authenticated),
            RouteAccess::Pending
        );
        assert_eq!(route_access(&state, RouteRequirement::Admin), RouteAccess::Pending);
    }
}
