//! Networking for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps every `/api` endpoint the pages call. Request and response
//! shapes come from the shared `wire` crate.

pub mod api;
