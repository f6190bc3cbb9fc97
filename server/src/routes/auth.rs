//! Auth routes: registration, login, logout, current user, password reset.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use wire::endpoints::SESSION_COOKIE;
use wire::{
    AuthResponse, ChangePasswordRequest, LoginRequest, MessageResponse, PasswordResetConfirm, PasswordResetRequest,
    RegisterRequest, User,
};

use super::error::ApiError;
use super::extract::ApiJson;
use crate::config::Config;
use crate::services::{account, password_reset, session};
use crate::state::AppState;

pub const REGISTERED: &str = "User registered successfully";
pub const LOGGED_IN: &str = "Login successful";
pub const LOGGED_OUT: &str = "Logout successful";
pub const RESET_SENT: &str = "If an account exists with this email, a password reset link has been sent.";
pub const RESET_DONE: &str = "Password reset successful";
pub const PASSWORD_CHANGED: &str = "Password changed. Please log in again.";

// =============================================================================
// COOKIES
// =============================================================================

pub(crate) fn session_cookie(config: &Config, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::days(config.session_ttl_days))
        .build()
}

pub(crate) fn cleared_cookie(config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: User,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(SESSION_COOKIE).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::unauthorized());
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await?
            .ok_or_else(ApiError::unauthorized)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/register/`: create an account and sign it in.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = account::register(&state.pool, &body).await?;
    let token = session::create_session(&state.pool, user.id, state.config.session_ttl_days).await?;
    tracing::info!(user_id = user.id, "user registered");

    let jar = jar.add(session_cookie(&state.config, token));
    Ok((StatusCode::CREATED, jar, Json(AuthResponse { message: REGISTERED.to_owned(), user })))
}

/// `POST /api/auth/login/`: check credentials and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = account::login(&state.pool, &body).await?;
    let token = session::create_session(&state.pool, user.id, state.config.session_ttl_days).await?;
    tracing::info!(user_id = user.id, "user logged in");

    let jar = jar.add(session_cookie(&state.config, token));
    Ok((jar, Json(AuthResponse { message: LOGGED_IN.to_owned(), user })))
}

/// `POST /api/auth/logout/`: drop the session (if any) and clear the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = jar.get(SESSION_COOKIE).map(Cookie::value).filter(|t| !t.is_empty()) {
        if let Err(e) = session::delete_session(&state.pool, token).await {
            tracing::warn!(error = %e, "session delete failed during logout");
        }
    }

    let jar = jar.add(cleared_cookie(&state.config));
    (jar, Json(MessageResponse { message: LOGGED_OUT.to_owned() }))
}

/// `GET /api/auth/user/`: return the current user.
pub async fn current_user(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}

/// `POST /api/auth/password-reset/`: email a reset link if the account exists.
pub async fn password_reset(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PasswordResetRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    password_reset::request_reset(&state.pool, state.mailer.as_ref(), &state.config.frontend_url, &body.email)
        .await?;
    Ok(Json(MessageResponse { message: RESET_SENT.to_owned() }))
}

/// `POST /api/auth/password-reset-confirm/`: consume a token and set a new password.
pub async fn password_reset_confirm(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PasswordResetConfirm>,
) -> Result<Json<MessageResponse>, ApiError> {
    password_reset::confirm_reset(&state.pool, &body).await?;
    Ok(Json(MessageResponse { message: RESET_DONE.to_owned() }))
}

/// `POST /api/auth/change-password/`: replace the password and sign out
/// everywhere, this browser included.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
    ApiJson(body): ApiJson<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    account::change_password(&state.pool, auth.user.id, &body).await?;
    let jar = jar.add(cleared_cookie(&state.config));
    Ok((jar, Json(MessageResponse { message: PASSWORD_CHANGED.to_owned() })))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
