//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The JSON API is nested under `/api`. When a Leptos configuration is
//! available the client pages are server-rendered from the same router and
//! their WASM bundle is served from `/pkg`; otherwise the server is API-only.

pub mod auth;
pub mod error;
pub mod extract;
pub mod problems;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use wire::endpoints as ep;

use crate::state::AppState;

/// `/api` routes, relative to the prefix.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route(ep::AUTH_REGISTER, post(auth::register))
        .route(ep::AUTH_LOGIN, post(auth::login))
        .route(ep::AUTH_LOGOUT, post(auth::logout))
        .route(ep::AUTH_USER, get(auth::current_user))
        .route(ep::AUTH_PASSWORD_RESET, post(auth::password_reset))
        .route(ep::AUTH_PASSWORD_RESET_CONFIRM, post(auth::password_reset_confirm))
        .route(ep::AUTH_CHANGE_PASSWORD, post(auth::change_password))
        .route(ep::PROBLEMS, get(problems::list))
        .route(ep::PROBLEMS_PRACTICE, get(problems::practice))
        .route(ep::PROBLEMS_ADD, post(problems::add))
        .route(ep::PROBLEMS_STATS, get(problems::stats))
        .route(ep::PROBLEMS_STATS_DIFFICULTY, get(problems::difficulty_stats))
        .route(ep::PROBLEMS_STATS_ACTIVITY, get(problems::activity))
        .route(
            "/problems/{id}/",
            get(problems::detail).put(problems::update).delete(problems::delete),
        )
        .route("/problems/{id}/done/", post(problems::mark_done))
        .route("/problems/{id}/history/", get(problems::history))
}

/// API + health check with CORS and request tracing. No frontend.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest(ep::API_PREFIX, api_routes())
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes + Leptos SSR for the client pages.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // WASM, JS and CSS from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(app(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
