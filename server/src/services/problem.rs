//! Problem persistence: CRUD plus practice history.
//!
//! Every query is scoped by `user_id`; another user's problem is
//! indistinguishable from a missing one.

use std::time::Duration;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use wire::validate::{self, ValidationError};
use wire::{AddProblemRequest, Difficulty, Problem, ProblemHistory, UpdateProblemRequest};

use super::scrape::{self, ScrapeError};

const PROBLEM_COLUMNS: &str =
    "id, title, leetcode_url, difficulty, solved_date, created_at, last_practiced, practice_count";

#[derive(Debug, thiserror::Error)]
pub enum ProblemError {
    #[error("Problem not found")]
    NotFound,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Scrape(#[from] ScrapeError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// A stored problem with typed timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemRecord {
    pub id: i64,
    pub title: String,
    pub leetcode_url: String,
    pub difficulty: Difficulty,
    pub solved_date: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub last_practiced: Option<OffsetDateTime>,
    pub practice_count: i32,
}

/// RFC 3339 rendering used on the wire.
#[must_use]
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}

impl ProblemRecord {
    fn from_row(row: &PgRow) -> Self {
        let difficulty: String = row.get("difficulty");
        Self {
            id: row.get("id"),
            title: row.get("title"),
            leetcode_url: row.get("leetcode_url"),
            difficulty: difficulty.parse().unwrap_or_default(),
            solved_date: row.get("solved_date"),
            created_at: row.get("created_at"),
            last_practiced: row.get("last_practiced"),
            practice_count: row.get("practice_count"),
        }
    }

    #[must_use]
    pub fn to_wire(&self) -> Problem {
        Problem {
            id: self.id,
            title: self.title.clone(),
            leetcode_url: self.leetcode_url.clone(),
            difficulty: self.difficulty,
            solved_date: format_timestamp(self.solved_date),
            created_at: Some(format_timestamp(self.created_at)),
            last_practiced: self.last_practiced.map(format_timestamp),
            practice_count: self.practice_count,
        }
    }
}

/// Outcome of an add: a fresh row, or an existing one that got a history entry.
#[derive(Debug)]
pub enum AddOutcome {
    Created(ProblemRecord),
    Existing(ProblemRecord),
}

// =============================================================================
// QUERIES
// =============================================================================

/// All of a user's problems, most recently solved first.
pub async fn list(pool: &PgPool, user_id: i64) -> Result<Vec<ProblemRecord>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {PROBLEM_COLUMNS} FROM problems WHERE user_id = $1 ORDER BY solved_date DESC, id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(ProblemRecord::from_row).collect())
}

/// # Errors
///
/// Returns [`ProblemError::NotFound`] if the id is missing or not the user's.
pub async fn get(pool: &PgPool, user_id: i64, id: i64) -> Result<ProblemRecord, ProblemError> {
    let row = sqlx::query(&format!("SELECT {PROBLEM_COLUMNS} FROM problems WHERE id = $1 AND user_id = $2"))
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ProblemError::NotFound)?;
    Ok(ProblemRecord::from_row(&row))
}

async fn find_by_url(pool: &PgPool, user_id: i64, url: &str) -> Result<Option<ProblemRecord>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {PROBLEM_COLUMNS} FROM problems WHERE user_id = $1 AND leetcode_url = $2"
    ))
    .bind(user_id)
    .bind(url)
    .fetch_optional(pool)
    .await?;
    Ok(row.as_ref().map(ProblemRecord::from_row))
}

/// Re-solving a known problem restarts its review schedule.
async fn record_resolve(pool: &PgPool, id: i64) -> Result<ProblemRecord, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let row = sqlx::query(&format!(
        "UPDATE problems SET solved_date = now(), last_practiced = now()
         WHERE id = $1 RETURNING {PROBLEM_COLUMNS}"
    ))
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;
    sqlx::query("INSERT INTO problem_history (problem_id) VALUES ($1)")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(ProblemRecord::from_row(&row))
}

async fn insert(
    pool: &PgPool,
    user_id: i64,
    title: &str,
    url: &str,
    difficulty: Difficulty,
) -> Result<Option<ProblemRecord>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "INSERT INTO problems (user_id, title, leetcode_url, difficulty) VALUES ($1, $2, $3, $4)
         ON CONFLICT (user_id, leetcode_url) DO NOTHING
         RETURNING {PROBLEM_COLUMNS}"
    ))
    .bind(user_id)
    .bind(title)
    .bind(url)
    .bind(difficulty.as_str())
    .fetch_optional(pool)
    .await?;
    Ok(row.as_ref().map(ProblemRecord::from_row))
}

/// Add a problem by URL, scraping its title and difficulty.
///
/// # Errors
///
/// Returns URL validation failures, [`ScrapeError::NoSlug`] when no title
/// can be found, or database errors.
pub async fn add(
    pool: &PgPool,
    http: &reqwest::Client,
    scrape_timeout: Duration,
    user_id: i64,
    req: &AddProblemRequest,
) -> Result<AddOutcome, ProblemError> {
    let url = validate::problem_url(&req.leetcode_url)?;

    if let Some(existing) = find_by_url(pool, user_id, &url).await? {
        return Ok(AddOutcome::Existing(record_resolve(pool, existing.id).await?));
    }

    let meta = scrape::problem_metadata(http, &url, scrape_timeout).await?;
    let difficulty = req.difficulty.unwrap_or(meta.difficulty);

    match insert(pool, user_id, &meta.title, &url, difficulty).await? {
        Some(created) => {
            tracing::info!(user_id, problem_id = created.id, "problem added");
            Ok(AddOutcome::Created(created))
        }
        // Lost a race with a concurrent add of the same URL.
        None => {
            let existing = find_by_url(pool, user_id, &url).await?.ok_or(ProblemError::NotFound)?;
            Ok(AddOutcome::Existing(record_resolve(pool, existing.id).await?))
        }
    }
}

/// Apply a partial edit.
///
/// # Errors
///
/// Returns [`ValidationError::TitleTooShort`] or [`ProblemError::NotFound`].
pub async fn update(
    pool: &PgPool,
    user_id: i64,
    id: i64,
    req: &UpdateProblemRequest,
) -> Result<ProblemRecord, ProblemError> {
    let title = req.title.as_deref().map(validate::title).transpose()?;
    let row = sqlx::query(&format!(
        "UPDATE problems
         SET title = COALESCE($3, title), difficulty = COALESCE($4, difficulty)
         WHERE id = $1 AND user_id = $2
         RETURNING {PROBLEM_COLUMNS}"
    ))
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(req.difficulty.map(Difficulty::as_str))
    .fetch_optional(pool)
    .await?
    .ok_or(ProblemError::NotFound)?;
    Ok(ProblemRecord::from_row(&row))
}

/// # Errors
///
/// Returns [`ProblemError::NotFound`] if nothing was deleted.
pub async fn delete(pool: &PgPool, user_id: i64, id: i64) -> Result<(), ProblemError> {
    let result = sqlx::query("DELETE FROM problems WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ProblemError::NotFound);
    }
    tracing::info!(user_id, problem_id = id, "problem deleted");
    Ok(())
}

/// Record a practice session: bump the count and append history.
///
/// # Errors
///
/// Returns [`ProblemError::NotFound`] if the id is missing or not the user's.
pub async fn mark_done(pool: &PgPool, user_id: i64, id: i64) -> Result<ProblemRecord, ProblemError> {
    let mut tx = pool.begin().await?;
    let row = sqlx::query(&format!(
        "UPDATE problems SET last_practiced = now(), practice_count = practice_count + 1
         WHERE id = $1 AND user_id = $2
         RETURNING {PROBLEM_COLUMNS}"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(ProblemError::NotFound)?;
    sqlx::query("INSERT INTO problem_history (problem_id) VALUES ($1)")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(ProblemRecord::from_row(&row))
}

/// Practice timestamps for one problem, newest first.
///
/// # Errors
///
/// Returns [`ProblemError::NotFound`] if the id is missing or not the user's.
pub async fn history(pool: &PgPool, user_id: i64, id: i64) -> Result<ProblemHistory, ProblemError> {
    let record = get(pool, user_id, id).await?;
    let rows = sqlx::query("SELECT practiced_at FROM problem_history WHERE problem_id = $1 ORDER BY practiced_at DESC")
        .bind(id)
        .fetch_all(pool)
        .await?;
    Ok(ProblemHistory {
        problem_id: record.id,
        title: record.title,
        practice_count: record.practice_count,
        history: rows
            .iter()
            .map(|r| format_timestamp(r.get::<OffsetDateTime, _>("practiced_at")))
            .collect(),
    })
}

/// `(problem_id, practiced_at)` for a user's history since `since`.
pub async fn history_since(
    pool: &PgPool,
    user_id: i64,
    since: OffsetDateTime,
) -> Result<Vec<(i64, OffsetDateTime)>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT h.problem_id, h.practiced_at
         FROM problem_history h
         JOIN problems p ON p.id = h.problem_id
         WHERE p.user_id = $1 AND h.practiced_at >= $2",
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(|r| (r.get("problem_id"), r.get("practiced_at"))).collect())
}

#[cfg(test)]
#[path = "problem_test.rs"]
mod tests;
