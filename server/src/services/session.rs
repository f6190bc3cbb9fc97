//! Session token management.
//!
//! ARCHITECTURE
//! ============
//! HTTP auth uses opaque random tokens carried by an HttpOnly cookie. The
//! `sessions` table keeps only their SHA-256, so a leaked table dump holds
//! no usable cookies. Validity is always a database lookup by that digest.
//!
//! TRADE-OFFS
//! ==========
//! A password reset deletes every session of the account, so a leaked cookie
//! stops working as soon as the owner resets.

use std::fmt::Write;

use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{PgExecutor, PgPool, Row};
use wire::User;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// SHA-256 hex digest of a token, for tokens that must not be stored raw.
#[must_use]
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    bytes_to_hex(&digest)
}

/// Create a session for the given user, returning the raw token.
pub async fn create_session(pool: &PgPool, user_id: i64, ttl_days: i64) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query(
        "INSERT INTO sessions (token_hash, user_id, expires_at)
         VALUES ($1, $2, now() + make_interval(days => $3::int))",
    )
    .bind(hash_token(&token))
    .bind(user_id)
    .bind(i32::try_from(ttl_days).unwrap_or(i32::MAX))
    .execute(pool)
    .await?;
    Ok(token)
}

/// Validate a session token and return the associated user.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT u.id, u.username, u.email
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          WHERE s.token_hash = $1 AND s.expires_at > now()",
    )
    .bind(hash_token(token))
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| User { id: r.get("id"), username: r.get("username"), email: r.get("email") }))
}

/// Delete a session by token.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
        .bind(hash_token(token))
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete every session belonging to a user. Accepts a pool or an open
/// transaction.
pub async fn delete_user_sessions<'e, E: PgExecutor<'e>>(executor: E, user_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
