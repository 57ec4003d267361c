//! API utilities for frontend-backend communication
//!
//! Every request carries the session's bearer token; failures are reported as
//! human-readable strings that pages can show as they are.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Port the backend listens on by default.
pub const API_PORT: u16 = 3000;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location, using
/// [`API_PORT`] for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, API_PORT)
}

/// Build a full API URL from a path starting with "/api/".
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

fn with_token(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {}", token))
}

/// Turns a failed response into the message shown to the user.
///
/// The backend answers errors as `{"error": "..."}`; anything else falls back
/// to a generic message for the status.
pub fn error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("error").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }
    match status {
        401 => "Sessão expirada. Entre novamente.".to_string(),
        403 => "Acesso negado.".to_string(),
        404 => "Registro não encontrado.".to_string(),
        _ => format!("Falha na requisição ({})", status),
    }
}

async fn check(response: Response) -> Result<Response, String> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(error_message(status, &body))
}

pub async fn get_json<T: DeserializeOwned>(path: &str, token: &str) -> Result<T, String> {
    let response = with_token(Request::get(&api_url(path)), token)
        .send()
        .await
        .map_err(|e| format!("Falha ao enviar requisição: {}", e))?;
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| format!("Resposta inválida do servidor: {}", e))
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    token: &str,
    body: &B,
) -> Result<T, String> {
    let response = with_token(Request::post(&api_url(path)), token)
        .json(body)
        .map_err(|e| format!("Falha ao serializar requisição: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Falha ao enviar requisição: {}", e))?;
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| format!("Resposta inválida do servidor: {}", e))
}

/// PUT without a response body (204).
pub async fn put_json<B: Serialize>(path: &str, token: &str, body: &B) -> Result<(), String> {
    let response = with_token(Request::put(&api_url(path)), token)
        .json(body)
        .map_err(|e| format!("Falha ao serializar requisição: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Falha ao enviar requisição: {}", e))?;
    check(response).await.map(|_| ())
}

pub async fn delete(path: &str, token: &str) -> Result<(), String> {
    let response = with_token(Request::delete(&api_url(path)), token)
        .send()
        .await
        .map_err(|e| format!("Falha ao enviar requisição: {}", e))?;
    check(response).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_backend_text() {
        assert_eq!(
            error_message(422, r#"{"error":"Selecione uma localidade"}"#),
            "Selecione uma localidade"
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(401, ""), "Sessão expirada. Entre novamente.");
        assert_eq!(error_message(403, "nope"), "Acesso negado.");
        assert_eq!(error_message(500, "{}"), "Falha na requisição (500)");
    }
}
