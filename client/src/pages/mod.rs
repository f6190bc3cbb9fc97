//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its request state and delegates rendering details to
//! `components`. Pages under `ProtectedRoute` may assume a checked session.

pub mod change_password;
pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod problems;
pub mod register;
pub mod reset_password;
