//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render problem cards and the add dialog, and guard protected
//! routes. They read shared auth state from Leptos context and report user
//! actions to their page through callbacks.

pub mod add_problem_modal;
pub mod problem_card;
pub mod protected_route;
