use super::*;

#[tokio::test]
async fn log_mailer_always_succeeds() {
    let email = OutgoingEmail {
        to: "ada@example.com".into(),
        subject: "Password Reset Request".into(),
        html: "<p>hi</p>".into(),
    };
    assert!(LogMailer.send(&email).await.is_ok());
}

#[test]
fn mail_error_message_includes_cause() {
    let err = MailError::Delivery("rate limited".into());
    assert_eq!(err.to_string(), "email delivery failed: rate limited");
}

#[test]
fn resend_mailer_keeps_sender() {
    let mailer = ResendMailer::new(&EmailConfig {
        api_key: "re_test".into(),
        from: "Flashcards <noreply@example.com>".into(),
    });
    assert_eq!(mailer.from, "Flashcards <noreply@example.com>");
}
