//! Password reset by emailed link.
//!
//! Only the SHA-256 of a reset token is stored. The raw token exists in the
//! emailed link and nowhere else, and confirming deletes the row in the same
//! statement that reads it, so a token works once.
//!
//! Confirmation is one transaction: the token is only spent if the new
//! password hash and the session revocation land with it.

use sqlx::{PgConnection, PgPool, Row};
use wire::PasswordResetConfirm;
use wire::endpoints::reset_password_link;
use wire::validate::{self, ValidationError};

use super::account::{self, AccountError};
use super::mailer::{MailError, Mailer, OutgoingEmail};
use super::session::{self, generate_token, hash_token};

pub const RESET_SUBJECT: &str = "Password Reset Request";
const RESET_TEMPLATE: &str = include_str!("../../templates/password_reset.html");

#[derive(Debug, thiserror::Error)]
pub enum ResetError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Token has expired")]
    Expired,
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Mail(#[from] MailError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[must_use]
pub fn render_reset_email(username: &str, link: &str) -> String {
    RESET_TEMPLATE
        .replace("{{USERNAME}}", &escape_html(username))
        .replace("{{LINK}}", &escape_html(link))
}

/// Issue a reset token for `email` and mail the link.
///
/// Unknown addresses succeed silently so the response never reveals which
/// emails have accounts.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`] for malformed input,
/// [`ResetError::Mail`] if delivery fails, or database errors.
pub async fn request_reset(
    pool: &PgPool,
    mailer: &dyn Mailer,
    frontend_url: &str,
    email: &str,
) -> Result<(), ResetError> {
    let email = validate::normalize_email(email).ok_or(ValidationError::InvalidEmail)?;
    let Some(user) = account::find_by_email(pool, &email).await? else {
        tracing::debug!("password reset requested for unknown email");
        return Ok(());
    };

    sqlx::query("DELETE FROM password_reset_tokens WHERE user_id = $1")
        .bind(user.id)
        .execute(pool)
        .await?;

    let token = generate_token();
    let token_hash = hash_token(&token);
    sqlx::query("INSERT INTO password_reset_tokens (token_hash, user_id) VALUES ($1, $2)")
        .bind(&token_hash)
        .bind(user.id)
        .execute(pool)
        .await?;

    let link = reset_password_link(frontend_url, &token);
    let message = OutgoingEmail {
        to: user.email.clone(),
        subject: RESET_SUBJECT.to_owned(),
        html: render_reset_email(&user.username, &link),
    };

    if let Err(e) = mailer.send(&message).await {
        // A token nobody received is useless; drop it.
        sqlx::query("DELETE FROM password_reset_tokens WHERE token_hash = $1")
            .bind(&token_hash)
            .execute(pool)
            .await?;
        return Err(e.into());
    }

    tracing::info!(user_id = user.id, "password reset link sent");
    Ok(())
}

/// Delete the token row and return its owner. Runs inside the caller's
/// transaction, so a rollback restores the token.
pub(crate) async fn consume_token(conn: &mut PgConnection, token: &str) -> Result<i64, ResetError> {
    let row = sqlx::query(
        "DELETE FROM password_reset_tokens WHERE token_hash = $1
         RETURNING user_id, expires_at > now() AS live",
    )
    .bind(hash_token(token))
    .fetch_optional(conn)
    .await?
    .ok_or(ResetError::InvalidToken)?;

    if !row.get::<bool, _>("live") {
        return Err(ResetError::Expired);
    }
    Ok(row.get("user_id"))
}

/// Consume a reset token and set the new password.
///
/// Passwords are checked and hashed before the token is touched, so a typo
/// or a hashing failure does not burn the link. Every session of the account
/// is revoked on success.
///
/// # Errors
///
/// Returns validation failures, [`ResetError::InvalidToken`],
/// [`ResetError::Expired`], or database errors.
pub async fn confirm_reset(pool: &PgPool, req: &PasswordResetConfirm) -> Result<i64, ResetError> {
    let token = req.token.trim();
    if token.is_empty() {
        return Err(ResetError::InvalidToken);
    }
    validate::password_pair(&req.new_password, &req.new_password_confirm)?;
    let password_hash = account::hash_password(req.new_password.clone()).await?;

    let mut tx = pool.begin().await?;
    let user_id = consume_token(&mut *tx, token).await?;
    account::store_password_hash(&mut *tx, user_id, &password_hash).await?;
    let revoked = session::delete_user_sessions(&mut *tx, user_id).await?;
    tx.commit().await?;

    tracing::info!(user_id, revoked, "password reset completed");
    Ok(user_id)
}

#[cfg(test)]
#[path = "password_reset_test.rs"]
mod tests;
