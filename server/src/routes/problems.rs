//! Problem routes. Every handler requires a session.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::Deserialize;
use time::OffsetDateTime;
use wire::{
    ActivityHeatmap, AddProblemRequest, DifficultyStats, MessageResponse, PracticeProblem, Problem, ProblemHistory,
    ProblemStats, StatsPeriod, UpdateProblemRequest,
};

use super::auth::AuthUser;
use super::error::ApiError;
use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::services::problem::{self, AddOutcome};
use crate::services::{practice, stats};
use crate::state::AppState;

pub const DELETED: &str = "Problem deleted successfully";

/// `GET /api/problems/`: all problems, most recently solved first.
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<Problem>>, ApiError> {
    let rows = problem::list(&state.pool, auth.user.id).await?;
    Ok(Json(rows.iter().map(problem::ProblemRecord::to_wire).collect()))
}

/// `GET /api/problems/practice/`: today's review list.
pub async fn practice(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<PracticeProblem>>, ApiError> {
    let rows = problem::list(&state.pool, auth.user.id).await?;
    Ok(Json(practice::select(&rows, auth.user.id, OffsetDateTime::now_utc())))
}

/// `POST /api/problems/add/`: 201 for a new problem, 200 when it already existed.
pub async fn add(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<AddProblemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = problem::add(&state.pool, &state.http, state.config.scrape_timeout, auth.user.id, &body).await?;
    Ok(match outcome {
        AddOutcome::Created(p) => (StatusCode::CREATED, Json(p.to_wire())),
        AddOutcome::Existing(p) => (StatusCode::OK, Json(p.to_wire())),
    })
}

/// `GET /api/problems/{id}/`
pub async fn detail(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    auth: AuthUser,
) -> Result<Json<Problem>, ApiError> {
    Ok(Json(problem::get(&state.pool, auth.user.id, id).await?.to_wire()))
}

/// `PUT /api/problems/{id}/`: edit title and/or difficulty.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    auth: AuthUser,
    ApiJson(body): ApiJson<UpdateProblemRequest>,
) -> Result<Json<Problem>, ApiError> {
    Ok(Json(problem::update(&state.pool, auth.user.id, id, &body).await?.to_wire()))
}

/// `DELETE /api/problems/{id}/`
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    problem::delete(&state.pool, auth.user.id, id).await?;
    Ok(Json(MessageResponse { message: DELETED.to_owned() }))
}

/// `POST /api/problems/{id}/done/`: record a practice session.
pub async fn mark_done(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    auth: AuthUser,
) -> Result<Json<Problem>, ApiError> {
    let record = problem::mark_done(&state.pool, auth.user.id, id).await?;
    tracing::info!(user_id = auth.user.id, problem_id = id, count = record.practice_count, "problem practiced");
    Ok(Json(record.to_wire()))
}

/// `GET /api/problems/{id}/history/`
pub async fn history(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    auth: AuthUser,
) -> Result<Json<ProblemHistory>, ApiError> {
    Ok(Json(problem::history(&state.pool, auth.user.id, id).await?))
}

/// `GET /api/problems/stats/`
pub async fn stats(State(state): State<AppState>, auth: AuthUser) -> Result<Json<ProblemStats>, ApiError> {
    Ok(Json(stats::for_user(&state.pool, auth.user.id, OffsetDateTime::now_utc()).await?))
}

/// Query for `/problems/stats/difficulty/`. Unknown periods mean lifetime.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
}

/// `GET /api/problems/stats/difficulty/?period=`
pub async fn difficulty_stats(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
    auth: AuthUser,
) -> Result<Json<DifficultyStats>, ApiError> {
    let period = query.period.as_deref().map(StatsPeriod::parse_lenient).unwrap_or_default();
    let now = OffsetDateTime::now_utc();
    Ok(Json(stats::difficulty_for_user(&state.pool, auth.user.id, period, now).await?))
}

/// Query for `/problems/stats/activity/`. A missing, malformed or
/// out-of-range year means the current one.
#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    pub year: Option<String>,
}

/// `GET /api/problems/stats/activity/?year=`
pub async fn activity(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
    auth: AuthUser,
) -> Result<Json<ActivityHeatmap>, ApiError> {
    let today = OffsetDateTime::now_utc().date();
    let year = stats::heatmap_year(query.year.and_then(|y| y.trim().parse().ok()), today);
    Ok(Json(stats::heatmap_for_user(&state.pool, auth.user.id, year).await?))
}
