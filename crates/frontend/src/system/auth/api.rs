//! Client for the external auth provider plus the backend's session check.

use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_base, get_json};

/// Base URL of the auth provider, fixed at build time through
/// `FUNDEB_AUTH_URL`. Without it the provider is expected behind the same
/// origin as the API (reverse proxy on `/auth`).
pub fn auth_base() -> String {
    match option_env!("FUNDEB_AUTH_URL") {
        Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
        _ => api_base(),
    }
}

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let request = LoginRequest { username, password };

    let response = Request::post(&format!("{}/auth/login", auth_base()))
        .json(&request)
        .map_err(|e| format!("Falha ao serializar requisição: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Falha ao enviar requisição: {}", e))?;

    match response.status() {
        200 => {}
        401 => return Err("Usuário ou senha inválidos".to_string()),
        status => return Err(format!("Falha no login ({})", status)),
    }

    response
        .json::<LoginResponse>()
        .await
        .map_err(|e| format!("Resposta inválida do provedor: {}", e))
}

/// Refresh access token using refresh token
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    let request = RefreshRequest { refresh_token };

    let response = Request::post(&format!("{}/auth/refresh", auth_base()))
        .json(&request)
        .map_err(|e| format!("Falha ao serializar requisição: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Falha ao enviar requisição: {}", e))?;

    if !response.ok() {
        return Err(format!("Falha ao renovar sessão ({})", response.status()));
    }

    response
        .json::<RefreshResponse>()
        .await
        .map_err(|e| format!("Resposta inválida do provedor: {}", e))
}

/// Logout (revoke refresh token at the provider)
pub async fn logout(refresh_token: String) -> Result<(), String> {
    let request = RefreshRequest { refresh_token };

    let response = Request::post(&format!("{}/auth/logout", auth_base()))
        .json(&request)
        .map_err(|e| format!("Falha ao serializar requisição: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Falha ao enviar requisição: {}", e))?;

    if !response.ok() {
        return Err(format!("Falha ao sair ({})", response.status()));
    }

    Ok(())
}

/// Session check against the backend: validates the token and returns the
/// user it belongs to.
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, String> {
    get_json("/api/auth/me", access_token).await
}
