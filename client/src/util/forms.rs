//! Form checks run before a request is sent.
//!
//! Only presence and length are checked here; the server repeats every rule
//! and its `{"error"}` message is what the user ultimately sees.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use wire::validate::{self, MIN_PASSWORD_LEN};

pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const RESET_FAILED: &str = "Password reset failed. Please try again.";
pub const RESET_SUCCESS: &str = "Password reset successful! Redirecting to login...";
pub const ADD_FAILED: &str = "Failed to add problem. Please check the URL and try again.";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";
pub const RESET_REQUEST_FAILED: &str = "Failed to send reset email. Please try again.";
pub const CHANGE_PASSWORD_FAILED: &str = "Failed to change password. Please try again.";

/// New-password form on the reset page. Only the mismatch is reported
/// locally; length is enforced by the input's `minlength` and the server.
///
/// # Errors
///
/// Returns [`PASSWORDS_DO_NOT_MATCH`] when the fields differ.
pub fn check_new_password(password: &str, confirm: &str) -> Result<(), String> {
    if password == confirm { Ok(()) } else { Err(PASSWORDS_DO_NOT_MATCH.to_owned()) }
}

/// Registration form, using the same rules the server applies.
///
/// # Errors
///
/// Returns the first failing rule's message.
pub fn check_registration(req: &wire::RegisterRequest) -> Result<(), String> {
    validate::registration(req).map(|_| ()).map_err(|e| e.to_string())
}

/// Login form: both fields present after trimming the username.
///
/// # Errors
///
/// Returns the server's wording for missing credentials.
pub fn check_login(username: &str, password: &str) -> Result<(), String> {
    let req = wire::LoginRequest { username: username.to_owned(), password: password.to_owned() };
    validate::credentials(&req).map(|_| ()).map_err(|e| e.to_string())
}

/// Change-password form, using the same rules the server applies before it
/// checks the current password.
///
/// # Errors
///
/// Returns the first failing rule's message.
pub fn check_password_change(req: &wire::ChangePasswordRequest) -> Result<(), String> {
    validate::password_change(req).map_err(|e| e.to_string())
}

/// `minlength` attribute value for password inputs.
#[must_use]
pub fn min_password_attr() -> String {
    MIN_PASSWORD_LEN.to_string()
}

/// Label for a submit button that shows progress while `busy`.
#[must_use]
pub fn submit_label(busy: bool, idle: &'static str, pending: &'static str) -> &'static str {
    if busy { pending } else { idle }
}
