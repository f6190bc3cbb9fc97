//! REST paths shared by every API consumer.
//!
//! Paths are relative to [`API_PREFIX`]; trailing slashes are part of the
//! contract.

pub const API_PREFIX: &str = "/api";

pub const AUTH_REGISTER: &str = "/auth/register/";
pub const AUTH_LOGIN: &str = "/auth/login/";
pub const AUTH_LOGOUT: &str = "/auth/logout/";
pub const AUTH_USER: &str = "/auth/user/";
pub const AUTH_PASSWORD_RESET: &str = "/auth/password-reset/";
pub const AUTH_PASSWORD_RESET_CONFIRM: &str = "/auth/password-reset-confirm/";
pub const AUTH_CHANGE_PASSWORD: &str = "/auth/change-password/";

pub const PROBLEMS: &str = "/problems/";
pub const PROBLEMS_PRACTICE: &str = "/problems/practice/";
pub const PROBLEMS_ADD: &str = "/problems/add/";
pub const PROBLEMS_STATS: &str = "/problems/stats/";
pub const PROBLEMS_STATS_DIFFICULTY: &str = "/problems/stats/difficulty/";
pub const PROBLEMS_STATS_ACTIVITY: &str = "/problems/stats/activity/";

/// Session cookie carrying the opaque server-side token.
pub const SESSION_COOKIE: &str = "session_token";

#[must_use]
pub fn problem_detail(id: i64) -> String {
    format!("/problems/{id}/")
}

#[must_use]
pub fn problem_done(id: i64) -> String {
    format!("/problems/{id}/done/")
}

#[must_use]
pub fn problem_history(id: i64) -> String {
    format!("/problems/{id}/history/")
}

#[must_use]
pub fn difficulty_stats(period: crate::StatsPeriod) -> String {
    format!("{PROBLEMS_STATS_DIFFICULTY}?period={period}")
}

/// Heatmap path; `None` asks for the server's current year.
#[must_use]
pub fn activity_heatmap(year: Option<i32>) -> String {
    match year {
        Some(year) => format!("{PROBLEMS_STATS_ACTIVITY}?year={year}"),
        None => PROBLEMS_STATS_ACTIVITY.to_owned(),
    }
}

/// Prefix a relative endpoint with [`API_PREFIX`].
#[must_use]
pub fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

/// Absolute URL for `path` under `base_url`, tolerating a trailing slash.
#[must_use]
pub fn api_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), api_path(path))
}

/// Client route that consumes a password-reset token.
#[must_use]
pub fn reset_password_link(frontend_url: &str, token: &str) -> String {
    format!("{}/reset-password/{token}", frontend_url.trim_end_matches('/'))
}
