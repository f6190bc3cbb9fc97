//! Client state shared through Leptos context or owned by a page.
//!
//! DESIGN
//! ======
//! State types are plain structs wrapped in `RwSignal` by their owners, so
//! the transitions below are testable without a reactive runtime.

pub mod auth;
pub mod practice;
pub mod problems;
