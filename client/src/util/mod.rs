//! Helpers shared by pages and components.

pub mod auth;
pub mod forms;
