//! Environment-driven runtime configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` (if present) and then builds a [`Config`] once at
//! startup. Everything downstream receives plain values, so handlers never
//! read the process environment directly.

use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_SESSION_TTL_DAYS: i64 = 14;
const DEFAULT_SCRAPE_TIMEOUT_SECS: u64 = 15;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Resend credentials for outbound email.
#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub api_key: String,
    pub from: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Upper bound on pooled Postgres connections.
    pub db_max_connections: u32,
    /// Base URL of the browser client, used to build reset links.
    pub frontend_url: String,
    pub cookie_secure: bool,
    pub session_ttl_days: i64,
    pub scrape_timeout: Duration,
    /// `None` disables delivery; reset links are logged instead.
    pub email: Option<EmailConfig>,
}

impl Config {
    /// Build configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a numeric variable
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", value: "0".to_owned() });
        }
        let session_ttl_days = parse_or(&lookup, "SESSION_TTL_DAYS", DEFAULT_SESSION_TTL_DAYS)?;
        if session_ttl_days <= 0 {
            return Err(ConfigError::Invalid { key: "SESSION_TTL_DAYS", value: session_ttl_days.to_string() });
        }
        let scrape_timeout_secs = parse_or(&lookup, "SCRAPE_TIMEOUT_SECS", DEFAULT_SCRAPE_TIMEOUT_SECS)?;

        let frontend_url = lookup("FRONTEND_URL")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_owned());

        let cookie_secure = lookup("COOKIE_SECURE")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or_else(|| frontend_url.starts_with("https://"));

        let email = match (lookup("RESEND_API_KEY"), lookup("RESEND_FROM")) {
            (Some(api_key), Some(from)) if !api_key.trim().is_empty() && !from.trim().is_empty() => {
                Some(EmailConfig { api_key, from })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            port,
            db_max_connections,
            frontend_url,
            cookie_secure,
            session_ttl_days,
            scrape_timeout: Duration::from_secs(scrape_timeout_secs),
            email,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

/// Parse a loose boolean flag (`1/true/yes/on`, `0/false/no/off`).
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
