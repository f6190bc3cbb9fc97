//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. The session rides
//! on the HttpOnly cookie the browser attaches to same-origin requests.
//! Server-side (SSR): stubs returning [`ApiError::unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Pages show
//! [`ApiError::message_or`] so a server-provided `{"error": ...}` wins over
//! the page's generic fallback text.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;
use serde_json::Value;
use wire::endpoints as ep;
use wire::{
    AddProblemRequest, AuthResponse, ChangePasswordRequest, Difficulty, DifficultyStats, LoginRequest,
    MessageResponse, PasswordResetConfirm, PasswordResetRequest, PracticeProblem, Problem, ProblemStats,
    RegisterRequest, StatsPeriod, User,
};

/// A failed API call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status, or `None` if no response arrived.
    pub status: Option<u16>,
    /// Message from the server's `{"error": ...}` body, if any.
    pub message: Option<String>,
}

impl ApiError {
    /// Build from a non-2xx response body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        Self { status: Some(status), message: wire::server_error_message(body) }
    }

    /// Network failure, undecodable body, or similar.
    #[must_use]
    pub fn transport(detail: impl std::fmt::Display) -> Self {
        #[cfg(feature = "hydrate")]
        log::warn!("api transport error: {detail}");
        #[cfg(not(feature = "hydrate"))]
        let _ = detail;
        Self { status: None, message: None }
    }

    /// Returned by every call outside the browser.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { status: None, message: Some("not available on server".to_owned()) }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    /// The server's message, else `fallback`.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_owned())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.message, self.status) {
            (Some(msg), _) => f.write_str(msg),
            (None, Some(status)) => write!(f, "request failed: {status}"),
            (None, None) => f.write_str("request failed"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Delete,
}

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(path: &str) -> String {
    ep::api_path(path)
}

#[cfg(any(test, feature = "hydrate"))]
fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(ApiError::transport)
}

async fn call<T: DeserializeOwned>(method: Method, path: &str, body: Option<Value>) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use gloo_net::http::Request;

        let url = endpoint(path);
        let builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Delete => Request::delete(&url),
        };
        let resp = match body {
            Some(payload) => builder.json(&payload).map_err(ApiError::transport)?.send().await,
            None => builder.send().await,
        }
        .map_err(ApiError::transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(ApiError::transport)?;
        if !resp.ok() {
            return Err(ApiError::from_response(status, &text));
        }
        decode_body(&text)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (method, path, body);
        Err(ApiError::unavailable())
    }
}

fn to_value<T: serde::Serialize>(payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(ApiError::transport)
}

// =============================================================================
// AUTH
// =============================================================================

/// `POST /auth/register/`
///
/// # Errors
///
/// Returns the server's validation message (e.g. duplicate username) or a
/// transport error.
pub async fn register(req: &RegisterRequest) -> Result<AuthResponse, ApiError> {
    call(Method::Post, ep::AUTH_REGISTER, Some(to_value(req)?)).await
}

/// `POST /auth/login/`
///
/// # Errors
///
/// Returns `"Invalid username or password."` from the server on bad credentials.
pub async fn login(username: &str, password: &str) -> Result<AuthResponse, ApiError> {
    let req = LoginRequest { username: username.to_owned(), password: password.to_owned() };
    call(Method::Post, ep::AUTH_LOGIN, Some(to_value(&req)?)).await
}

/// `POST /auth/logout/`
///
/// # Errors
///
/// Returns a transport error; the server itself always accepts logout.
pub async fn logout() -> Result<MessageResponse, ApiError> {
    call(Method::Post, ep::AUTH_LOGOUT, None).await
}

/// `GET /auth/user/`: the session check used by route guards.
///
/// # Errors
///
/// Returns a 401 [`ApiError`] when no valid session exists.
pub async fn get_user_info() -> Result<User, ApiError> {
    call(Method::Get, ep::AUTH_USER, None).await
}

/// `POST /auth/password-reset/`
///
/// # Errors
///
/// Returns the server's message when the email is malformed or delivery fails.
pub async fn request_password_reset(email: &str) -> Result<MessageResponse, ApiError> {
    let req = PasswordResetRequest { email: email.to_owned() };
    call(Method::Post, ep::AUTH_PASSWORD_RESET, Some(to_value(&req)?)).await
}

/// `POST /auth/password-reset-confirm/`
///
/// # Errors
///
/// Returns `"Invalid or expired token"` / `"Token has expired"` or a password
/// validation message from the server.
pub async fn confirm_password_reset(
    token: &str,
    new_password: &str,
    new_password_confirm: &str,
) -> Result<MessageResponse, ApiError> {
    let req = PasswordResetConfirm {
        token: token.to_owned(),
        new_password: new_password.to_owned(),
        new_password_confirm: new_password_confirm.to_owned(),
    };
    call(Method::Post, ep::AUTH_PASSWORD_RESET_CONFIRM, Some(to_value(&req)?)).await
}

/// `POST /auth/change-password/`. The server ends every session on success.
///
/// # Errors
///
/// Returns `"Current password is incorrect."` or a password validation
/// message from the server.
pub async fn change_password(req: &ChangePasswordRequest) -> Result<MessageResponse, ApiError> {
    call(Method::Post, ep::AUTH_CHANGE_PASSWORD, Some(to_value(req)?)).await
}

// =============================================================================
// PROBLEMS
// =============================================================================

/// `GET /problems/practice/`: problems due for review today.
///
/// # Errors
///
/// Returns a 401 [`ApiError`] without a session.
pub async fn get_practice_problems() -> Result<Vec<PracticeProblem>, ApiError> {
    call(Method::Get, ep::PROBLEMS_PRACTICE, None).await
}

/// `POST /problems/add/`. `difficulty` overrides the scraped value.
///
/// # Errors
///
/// Returns the server's message for bad URLs or failed lookups.
pub async fn add_problem(leetcode_url: &str, difficulty: Option<Difficulty>) -> Result<Problem, ApiError> {
    let req = AddProblemRequest { leetcode_url: leetcode_url.to_owned(), difficulty };
    call(Method::Post, ep::PROBLEMS_ADD, Some(to_value(&req)?)).await
}

/// `POST /problems/{id}/done/`
///
/// # Errors
///
/// Returns a 404 [`ApiError`] for unknown ids.
pub async fn mark_as_done(id: i64) -> Result<Problem, ApiError> {
    call(Method::Post, &ep::problem_done(id), None).await
}

/// `GET /problems/`
///
/// # Errors
///
/// Returns a 401 [`ApiError`] without a session.
pub async fn get_all_problems() -> Result<Vec<Problem>, ApiError> {
    call(Method::Get, ep::PROBLEMS, None).await
}

/// `DELETE /problems/{id}/`
///
/// # Errors
///
/// Returns a 404 [`ApiError`] for unknown ids.
pub async fn delete_problem(id: i64) -> Result<MessageResponse, ApiError> {
    call(Method::Delete, &ep::problem_detail(id), None).await
}

/// `GET /problems/stats/`
///
/// # Errors
///
/// Returns a 401 [`ApiError`] without a session.
pub async fn get_problem_stats() -> Result<ProblemStats, ApiError> {
    call(Method::Get, ep::PROBLEMS_STATS, None).await
}

/// `GET /problems/stats/difficulty/?period=`
///
/// # Errors
///
/// Returns a 401 [`ApiError`] without a session.
pub async fn get_difficulty_stats(period: StatsPeriod) -> Result<DifficultyStats, ApiError> {
    call(Method::Get, &ep::difficulty_stats(period), None).await
}
