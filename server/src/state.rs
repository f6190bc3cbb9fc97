//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database pool, the parsed config, one shared HTTP client for
//! problem lookups, and the mailer used for reset links.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::services::mailer::{LogMailer, Mailer, ResendMailer};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub http: reqwest::Client,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: Config, mailer: Arc<dyn Mailer>) -> Self {
        Self { pool, config: Arc::new(config), http: reqwest::Client::new(), mailer }
    }

    /// Build state with the mailer implied by `config.email`.
    #[must_use]
    pub fn from_config(pool: PgPool, config: Config) -> Self {
        let mailer: Arc<dyn Mailer> = match &config.email {
            Some(email) => {
                tracing::info!(from = %email.from, "resend mailer configured");
                Arc::new(ResendMailer::new(email))
            }
            None => {
                tracing::warn!("RESEND_API_KEY/RESEND_FROM not set; reset links will be logged");
                Arc::new(LogMailer)
            }
        };
        Self::new(pool, config, mailer)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
