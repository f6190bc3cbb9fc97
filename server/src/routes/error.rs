//! JSON error responses.
//!
//! Every API failure is `{"error": "..."}` with a matching status. Internal
//! failures are logged here and reported with a generic message.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use wire::ErrorBody;

use crate::services::account::AccountError;
use crate::services::password_reset::ResetError;
use crate::services::problem::ProblemError;
use crate::services::scrape::ScrapeError;

pub const NOT_AUTHENTICATED: &str = "Not authenticated";
pub const INTERNAL: &str = "Internal server error";
pub const EMAIL_FAILED: &str = "Failed to send email. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, NOT_AUTHENTICATED)
    }

    /// Log `err` and return an opaque 500.
    pub fn internal(err: &dyn std::fmt::Display) -> Self {
        tracing::error!(error = %err, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::internal(&err)
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Invalid(_)
            | AccountError::UsernameTaken
            | AccountError::EmailTaken
            | AccountError::InvalidCredentials
            | AccountError::WrongCurrentPassword => Self::bad_request(err.to_string()),
            AccountError::Hash(_) | AccountError::Db(_) => Self::internal(&err),
        }
    }
}

impl From<ResetError> for ApiError {
    fn from(err: ResetError) -> Self {
        match err {
            ResetError::Invalid(_) | ResetError::InvalidToken | ResetError::Expired => {
                Self::bad_request(err.to_string())
            }
            ResetError::Mail(e) => {
                tracing::error!(error = %e, "password reset email failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, EMAIL_FAILED)
            }
            ResetError::Account(e) => e.into(),
            ResetError::Db(e) => e.into(),
        }
    }
}

impl From<ProblemError> for ApiError {
    fn from(err: ProblemError) -> Self {
        match err {
            ProblemError::NotFound => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            ProblemError::Invalid(_) => Self::bad_request(err.to_string()),
            ProblemError::Scrape(e) => {
                tracing::warn!(error = %e, "problem lookup failed");
                Self::bad_request(ScrapeError::NoSlug.to_string())
            }
            ProblemError::Db(e) => e.into(),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
