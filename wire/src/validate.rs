//! Form input checks shared by the browser client and the server.
//!
//! The client runs these before sending a request so obvious mistakes never
//! leave the browser; the server runs them again because it cannot trust the
//! client.

use crate::{ChangePasswordRequest, LoginRequest, RegisterRequest};

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

pub const MIN_PASSWORD_LEN: usize = 8;
/// Titles shorter than this are treated as scrape failures.
pub const MIN_TITLE_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Please provide both username and password.")]
    MissingCredentials,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 8 characters long.")]
    PasswordTooShort,
    #[error("New password must be different from the current password.")]
    PasswordUnchanged,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please provide a Leetcode URL.")]
    MissingUrl,
    #[error("Please enter a valid http(s) URL.")]
    InvalidUrl,
    #[error("Title must be at least 3 characters long.")]
    TitleTooShort,
}

/// Check a password and its confirmation. Mismatch is reported before length.
///
/// # Errors
///
/// Returns [`ValidationError::PasswordMismatch`] or
/// [`ValidationError::PasswordTooShort`].
pub fn password_pair(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Trim + lowercase an email and require exactly one `@` with both sides set.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let mut parts = normalized.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };
    if local.is_empty() || domain.is_empty() {
        return None;
    }
    Some(normalized)
}

/// Validate a registration form, returning a normalized copy.
///
/// # Errors
///
/// Returns the first failing check in form order.
pub fn registration(req: &RegisterRequest) -> Result<RegisterRequest, ValidationError> {
    let username = req.username.trim();
    if username.is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    let email = normalize_email(&req.email).ok_or(ValidationError::InvalidEmail)?;
    password_pair(&req.password, &req.password_confirm)?;
    Ok(RegisterRequest {
        username: username.to_owned(),
        email,
        password: req.password.clone(),
        password_confirm: req.password_confirm.clone(),
    })
}

/// Validate a login form, returning a copy with the username trimmed.
///
/// # Errors
///
/// Returns [`ValidationError::MissingCredentials`] if either field is blank.
pub fn credentials(req: &LoginRequest) -> Result<LoginRequest, ValidationError> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(LoginRequest { username: username.to_owned(), password: req.password.clone() })
}

/// Validate a password change. The current password is only checked for
/// presence here; the server verifies it against the stored hash.
///
/// # Errors
///
/// Returns [`ValidationError::MissingFields`], the [`password_pair`] errors,
/// or [`ValidationError::PasswordUnchanged`].
pub fn password_change(req: &ChangePasswordRequest) -> Result<(), ValidationError> {
    if req.current_password.trim().is_empty() || req.new_password.is_empty() || req.new_password_confirm.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    password_pair(&req.new_password, &req.new_password_confirm)?;
    if req.new_password == req.current_password.trim() {
        return Err(ValidationError::PasswordUnchanged);
    }
    Ok(())
}

/// Trim a problem URL, require an `http(s)` scheme with a host, and drop
/// trailing slashes so the same problem always maps to one key.
///
/// # Errors
///
/// Returns [`ValidationError::MissingUrl`] for blank input and
/// [`ValidationError::InvalidUrl`] otherwise.
pub fn problem_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingUrl);
    }
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or(ValidationError::InvalidUrl)?;
    let host = rest
        .split(|c| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or_default();
    if host.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidUrl);
    }
    Ok(trimmed.trim_end_matches('/').to_owned())
}

/// Trim a user-supplied title and enforce the minimum length.
///
/// # Errors
///
/// Returns [`ValidationError::TitleTooShort`].
pub fn title(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_TITLE_LEN {
        return Err(ValidationError::TitleTooShort);
    }
    Ok(trimmed.to_owned())
}
