//! Account registration, login, and password storage.
//!
//! Passwords are hashed with bcrypt on the blocking pool so a burst of logins
//! cannot stall the async executor.

use sqlx::{PgExecutor, PgPool, Row};
use wire::validate::{self, ValidationError};
use wire::{ChangePasswordRequest, LoginRequest, RegisterRequest, User};

use super::session;

pub(crate) const BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Username already exists.")]
    UsernameTaken,
    #[error("Email already exists.")]
    EmailTaken,
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error("Current password is incorrect.")]
    WrongCurrentPassword,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Hash a password with bcrypt.
///
/// # Errors
///
/// Returns [`AccountError::Hash`] if bcrypt fails or the blocking task panics.
pub async fn hash_password(password: String) -> Result<String, AccountError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AccountError::Hash(e.to_string()))?
        .map_err(|e| AccountError::Hash(e.to_string()))
}

/// Check a password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns [`AccountError::Hash`] if the stored hash is malformed.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AccountError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AccountError::Hash(e.to_string()))?
        .map_err(|e| AccountError::Hash(e.to_string()))
}

/// Map a unique-constraint violation on `users` to the matching account error.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<AccountError> {
    let db_err = err.as_database_error()?;
    if db_err.code().as_deref() != Some("23505") {
        return None;
    }
    match db_err.constraint() {
        Some(c) if c.contains("username") => Some(AccountError::UsernameTaken),
        Some(c) if c.contains("email") => Some(AccountError::EmailTaken),
        _ => None,
    }
}

/// Validate and create a new account.
///
/// # Errors
///
/// Returns validation failures, `UsernameTaken`/`EmailTaken`, or database errors.
pub async fn register(pool: &PgPool, req: &RegisterRequest) -> Result<User, AccountError> {
    let req = validate::registration(req)?;

    let taken = sqlx::query(
        "SELECT
             EXISTS (SELECT 1 FROM users WHERE username = $1) AS username_taken,
             EXISTS (SELECT 1 FROM users WHERE email = $2) AS email_taken",
    )
    .bind(&req.username)
    .bind(&req.email)
    .fetch_one(pool)
    .await?;
    if taken.get::<bool, _>("username_taken") {
        return Err(AccountError::UsernameTaken);
    }
    if taken.get::<bool, _>("email_taken") {
        return Err(AccountError::EmailTaken);
    }

    let password_hash = hash_password(req.password.clone()).await?;

    let row = sqlx::query(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3)
         RETURNING id, username, email",
    )
    .bind(&req.username)
    .bind(&req.email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| unique_violation(&e).unwrap_or(AccountError::Db(e)))?;

    Ok(User { id: row.get("id"), username: row.get("username"), email: row.get("email") })
}

/// Check credentials and return the matching account.
///
/// # Errors
///
/// Returns [`AccountError::InvalidCredentials`] for unknown users and wrong
/// passwords alike.
pub async fn login(pool: &PgPool, req: &LoginRequest) -> Result<User, AccountError> {
    let req = validate::credentials(req)?;

    let row = sqlx::query("SELECT id, username, email, password_hash FROM users WHERE username = $1")
        .bind(&req.username)
        .fetch_optional(pool)
        .await?
        .ok_or(AccountError::InvalidCredentials)?;

    let stored: String = row.get("password_hash");
    if !verify_password(req.password, stored).await? {
        return Err(AccountError::InvalidCredentials);
    }

    Ok(User { id: row.get("id"), username: row.get("username"), email: row.get("email") })
}

/// Look up an account by normalized email.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query("SELECT id, username, email FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| User { id: r.get("id"), username: r.get("username"), email: r.get("email") }))
}

/// Write an already-hashed password. Accepts a pool or an open transaction.
pub async fn store_password_hash<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: i64,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
        .bind(password_hash)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Change a signed-in user's password and end every session of the account,
/// the caller's included.
///
/// # Errors
///
/// Returns validation failures, [`AccountError::WrongCurrentPassword`], or
/// hashing and database errors.
pub async fn change_password(pool: &PgPool, user_id: i64, req: &ChangePasswordRequest) -> Result<u64, AccountError> {
    validate::password_change(req)?;

    let stored: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AccountError::InvalidCredentials)?;
    if !verify_password(req.current_password.trim().to_owned(), stored).await? {
        return Err(AccountError::WrongCurrentPassword);
    }
    let password_hash = hash_password(req.new_password.clone()).await?;

    let mut tx = pool.begin().await?;
    store_password_hash(&mut *tx, user_id, &password_hash).await?;
    let revoked = session::delete_user_sessions(&mut *tx, user_id).await?;
    tx.commit().await?;

    tracing::info!(user_id, revoked, "password changed");
    Ok(revoked)
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
