use super::*;
use crate::state::test_helpers;

// =============================================================================
// render_reset_email
// =============================================================================

#[test]
fn reset_email_contains_link_and_name() {
    let html = render_reset_email("ada", "http://localhost:3000/reset-password/abc123");
    assert!(html.contains("Hi ada,"));
    assert!(html.contains("http://localhost:3000/reset-password/abc123"));
    assert!(!html.contains("{{"));
}

#[test]
fn reset_email_escapes_username() {
    let html = render_reset_email("<b>bob</b>", "http://x/reset-password/t");
    assert!(html.contains("&lt;b&gt;bob&lt;/b&gt;"));
    assert!(!html.contains("<b>bob</b>"));
}

#[test]
fn escape_html_leaves_plain_text() {
    assert_eq!(escape_html("plain text"), "plain text");
    assert_eq!(escape_html("a&b\"c'"), "a&amp;b&quot;c&#39;");
}

// =============================================================================
// Input checks that run before any database access
// =============================================================================

#[tokio::test]
async fn request_reset_rejects_malformed_email() {
    let state = test_helpers::test_app_state();
    let err = request_reset(&state.pool, state.mailer.as_ref(), "http://x", "not-an-email")
        .await
        .unwrap_err();
    assert!(matches!(err, ResetError::Invalid(ValidationError::InvalidEmail)));
}

#[tokio::test]
async fn confirm_reset_rejects_blank_token() {
    let state = test_helpers::test_app_state();
    let req = PasswordResetConfirm {
        token: "   ".into(),
        new_password: "password123".into(),
        new_password_confirm: "password123".into(),
    };
    let err = confirm_reset(&state.pool, &req).await.unwrap_err();
    assert!(matches!(err, ResetError::InvalidToken));
}

#[tokio::test]
async fn confirm_reset_checks_passwords_before_token() {
    let state = test_helpers::test_app_state();
    let req = PasswordResetConfirm {
        token: "abc".into(),
        new_password: "password123".into(),
        new_password_confirm: "password124".into(),
    };
    let err = confirm_reset(&state.pool, &req).await.unwrap_err();
    assert_eq!(err.to_string(), "Passwords do not match");
}

#[test]
fn reset_error_messages() {
    assert_eq!(ResetError::InvalidToken.to_string(), "Invalid or expired token");
    assert_eq!(ResetError::Expired.to_string(), "Token has expired");
}

// =============================================================================
// Live database
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;
    use crate::state::test_helpers::{RecordingMailer, live_pool};
    use wire::RegisterRequest;

    #[tokio::test]
    async fn reset_flow_issues_single_use_token_and_revokes_sessions() {
        let pool = live_pool().await;
        let suffix = &generate_token()[..12];
        let user = account::register(
            &pool,
            &RegisterRequest {
                username: format!("reset-{suffix}"),
                email: format!("reset-{suffix}@example.com"),
                password: "password123".into(),
                password_confirm: "password123".into(),
            },
        )
        .await
        .unwrap();
        let session_token = session::create_session(&pool, user.id, 1).await.unwrap();

        let mailer = RecordingMailer::default();
        request_reset(&pool, &mailer, "http://localhost:3000", &user.email).await.unwrap();
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        let html = &sent[0].html;
        let start = html.find("/reset-password/").unwrap() + "/reset-password/".len();
        let token: String = html[start..].chars().take_while(char::is_ascii_hexdigit).collect();
        assert_eq!(token.len(), 64);

        let req = PasswordResetConfirm {
            token: token.clone(),
            new_password: "newpassword1".into(),
            new_password_confirm: "newpassword1".into(),
        };
        assert_eq!(confirm_reset(&pool, &req).await.unwrap(), user.id);
        assert!(session::validate_session(&pool, &session_token).await.unwrap().is_none());

        let again = confirm_reset(&pool, &req).await.unwrap_err();
        assert!(matches!(again, ResetError::InvalidToken));
    }

    #[tokio::test]
    async fn rolled_back_confirmation_keeps_token_usable() {
        let pool = live_pool().await;
        let suffix = &generate_token()[..12];
        let user = account::register(
            &pool,
            &RegisterRequest {
                username: format!("rollback-{suffix}"),
                email: format!("rollback-{suffix}@example.com"),
                password: "password123".into(),
                password_confirm: "password123".into(),
            },
        )
        .await
        .unwrap();

        let token = generate_token();
        sqlx::query("INSERT INTO password_reset_tokens (token_hash, user_id) VALUES ($1, $2)")
            .bind(hash_token(&token))
            .bind(user.id)
            .execute(&pool)
            .await
            .unwrap();

        // A failure after the token is consumed must not spend it.
        let mut tx = pool.begin().await.unwrap();
        assert_eq!(consume_token(&mut *tx, &token).await.unwrap(), user.id);
        tx.rollback().await.unwrap();

        let req = PasswordResetConfirm {
            token,
            new_password: "newpassword1".into(),
            new_password_confirm: "newpassword1".into(),
        };
        assert_eq!(confirm_reset(&pool, &req).await.unwrap(), user.id);

        let login = account::login(
            &pool,
            &wire::LoginRequest { username: user.username.clone(), password: "newpassword1".into() },
        )
        .await
        .unwrap();
        assert_eq!(login.id, user.id);
    }

    #[tokio::test]
    async fn unknown_email_sends_nothing() {
        let pool = live_pool().await;
        let mailer = RecordingMailer::default();
        request_reset(&pool, &mailer, "http://localhost:3000", "nobody-here@example.invalid")
            .await
            .unwrap();
        assert!(mailer.sent().is_empty());
    }
}
