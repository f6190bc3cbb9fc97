//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and auth plumbing.
//! Selection and stats logic are pure functions over loaded rows so they can
//! be tested without a database.

pub mod account;
pub mod mailer;
pub mod password_reset;
pub mod practice;
pub mod problem;
pub mod scrape;
pub mod session;
pub mod stats;
