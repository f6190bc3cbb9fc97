//! Shared REST schema for the flashcard API.
//!
//! This crate owns the JSON representation used by `server`, `client` and
//! `cli`. Timestamps travel as RFC 3339 strings so the WASM client never needs
//! a date library; the server is the only side that does date arithmetic.

pub mod endpoints;
pub mod validate;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;


/// Category used when a practice entry arrives without one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Error returned when parsing a [`Difficulty`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty: {0}")]
pub struct DifficultyError(pub String);

/// LeetCode difficulty tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Uppercase label shown on difficulty badges.
    #[must_use]
    pub fn badge(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(DifficultyError(s.to_owned())),
        }
    }
}

// =============================================================================
// ENTITIES
// =============================================================================

/// A tracked coding problem as returned by `/problems/` endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Server-assigned identifier.
    pub id: i64,
    /// Human title, e.g. `"Four Divisors"`.
    pub title: String,
    /// Canonical LeetCode URL.
    pub leetcode_url: String,
    pub difficulty: Difficulty,
    /// When the problem was first solved (RFC 3339).
    pub solved_date: String,
    /// Row creation time (RFC 3339).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last time the problem was marked done (RFC 3339).
    #[serde(default)]
    pub last_practiced: Option<String>,
    /// Number of times the problem was marked done.
    #[serde(default)]
    pub practice_count: i32,
}

/// A problem due for review today, tagged with why it was picked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PracticeProblem {
    #[serde(flatten)]
    pub problem: Problem,
    /// Grouping label such as `"Solved 2 days ago"` or `"Random Practice"`.
    #[serde(default)]
    pub category: Option<String>,
    /// Touched within the last twelve hours.
    #[serde(default)]
    pub solved_recently: bool,
}

impl PracticeProblem {
    /// Category label with the `"Other"` fallback applied.
    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }
}

/// An account as returned by `/auth/user/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Aggregate practice counters returned by `/problems/stats/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemStats {
    pub total: i64,
    pub fully_practiced: i64,
    pub partially_practiced: i64,
    pub solved_once: i64,
    pub not_practiced: i64,
    pub practiced_today: i64,
    pub practiced_yesterday: i64,
}

/// Reporting window for [`DifficultyStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    Today,
    Week,
    Month,
    Year,
    #[default]
    Lifetime,
}

impl StatsPeriod {
    pub const ALL: [Self; 5] = [Self::Today, Self::Week, Self::Month, Self::Year, Self::Lifetime];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::Lifetime => "lifetime",
        }
    }

    /// Parse a query value, falling back to [`StatsPeriod::Lifetime`] for
    /// anything unrecognised.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

/// Error returned when parsing a [`StatsPeriod`] strictly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown period: {0} (expected today, week, month, year or lifetime)")]
pub struct PeriodError(pub String);

impl FromStr for StatsPeriod {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PeriodError(s.to_owned()))
    }
}

impl fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Problems practiced in a [`StatsPeriod`], split by difficulty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyStats {
    pub period: StatsPeriod,
    pub easy: i64,
    pub medium: i64,
    pub hard: i64,
    pub total: i64,
}

/// One calendar day of practice activity (`date` is `YYYY-MM-DD`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDay {
    pub date: String,
    pub count: i64,
}

/// Daily practice counts for one calendar year, for a contribution heatmap.
/// Days without activity are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityHeatmap {
    pub year: i32,
    pub days: Vec<ActivityDay>,
    pub total: i64,
    /// Largest single-day count, for shading.
    pub max: i64,
}

/// Practice timeline for one problem.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProblemHistory {
    pub problem_id: i64,
    pub title: String,
    pub practice_count: i32,
    /// Practice timestamps (RFC 3339), newest first.
    pub history: Vec<String>,
}

// =============================================================================
// REQUESTS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetConfirm {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub new_password_confirm: String,
}

/// Password change for the signed-in account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub new_password_confirm: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddProblemRequest {
    #[serde(default)]
    pub leetcode_url: String,
    /// Overrides the scraped difficulty when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

/// Partial update for `PUT /problems/{id}/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProblemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Body returned by register and login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of every non-2xx API response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Pull the server-provided `error` string out of a raw response body.
///
/// Returns `None` for non-JSON bodies, missing fields and blank messages so
/// callers can fall back to their own generic text.
#[must_use]
pub fn server_error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    error_message_from_value(&value)
}

/// Same as [`server_error_message`] for an already-parsed body.
#[must_use]
pub fn error_message_from_value(value: &Value) -> Option<String> {
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|msg| !msg.is_empty())
        .map(ToOwned::to_owned)
}

/// Group practice entries by category, keeping first-appearance order.
#[must_use]
pub fn group_by_category(items: &[PracticeProblem]) -> Vec<(String, Vec<PracticeProblem>)> {
    let mut groups: Vec<(String, Vec<PracticeProblem>)> = Vec::new();
    for item in items {
        let label = item.category_label();
        match groups.iter_mut().find(|(name, _)| name == label) {
            Some((_, bucket)) => bucket.push(item.clone()),
            None => groups.push((label.to_owned(), vec![item.clone()])),
        }
    }
    groups
}
