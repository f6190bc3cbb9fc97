use super::*;

fn register(username: &str, email: &str, password: &str, confirm: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        password_confirm: confirm.to_owned(),
    }
}

#[test]
fn password_pair_reports_mismatch_before_length() {
    assert_eq!(password_pair("abc", "abd"), Err(ValidationError::PasswordMismatch));
    assert_eq!(password_pair("abc", "abc"), Err(ValidationError::PasswordTooShort));
    assert_eq!(password_pair("longenough", "longenough"), Ok(()));
}

#[test]
fn password_pair_counts_chars_not_bytes() {
    // Seven multi-byte chars stay below the minimum.
    assert_eq!(password_pair("ééééééé", "ééééééé"), Err(ValidationError::PasswordTooShort));
}

#[test]
fn password_mismatch_message_matches_form_text() {
    assert_eq!(ValidationError::PasswordMismatch.to_string(), "Passwords do not match");
}

#[test]
fn normalize_email_accepts_basic_address() {
    assert_eq!(normalize_email("  USER@Example.com "), Some("user@example.com".to_owned()));
}

#[test]
fn normalize_email_rejects_invalid_values() {
    assert_eq!(normalize_email(""), None);
    assert_eq!(normalize_email("user"), None);
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("user@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
}

#[test]
fn registration_requires_all_fields() {
    let err = registration(&register("", "a@b.com", "password1", "password1"));
    assert_eq!(err, Err(ValidationError::MissingFields));
    let err = registration(&register("ada", "  ", "password1", "password1"));
    assert_eq!(err, Err(ValidationError::MissingFields));
}

#[test]
fn registration_normalizes_username_and_email() {
    let ok = registration(&register("  ada ", "Ada@Example.COM", "password1", "password1")).unwrap();
    assert_eq!(ok.username, "ada");
    assert_eq!(ok.email, "ada@example.com");
}

#[test]
fn registration_checks_email_then_passwords() {
    assert_eq!(
        registration(&register("ada", "nope", "password1", "password2")),
        Err(ValidationError::InvalidEmail)
    );
    assert_eq!(
        registration(&register("ada", "a@b.com", "password1", "password2")),
        Err(ValidationError::PasswordMismatch)
    );
}

#[test]
fn credentials_require_both_fields() {
    let blank = LoginRequest { username: " ".to_owned(), password: "x".to_owned() };
    assert_eq!(credentials(&blank), Err(ValidationError::MissingCredentials));
    let ok = LoginRequest { username: " ada ".to_owned(), password: "pw".to_owned() };
    assert_eq!(credentials(&ok).unwrap().username, "ada");
}

#[test]
fn problem_url_trims_and_strips_trailing_slash() {
    assert_eq!(
        problem_url("  https://leetcode.com/problems/four-divisors/description/ "),
        Ok("https://leetcode.com/problems/four-divisors/description".to_owned())
    );
}

#[test]
fn problem_url_rejects_blank_and_non_http() {
    assert_eq!(problem_url("   "), Err(ValidationError::MissingUrl));
    assert_eq!(problem_url("ftp://leetcode.com/x"), Err(ValidationError::InvalidUrl));
    assert_eq!(problem_url("leetcode.com/problems/x"), Err(ValidationError::InvalidUrl));
    assert_eq!(problem_url("https:///problems/x"), Err(ValidationError::InvalidUrl));
    assert_eq!(problem_url("https://leet code.com"), Err(ValidationError::InvalidUrl));
}

#[test]
fn title_enforces_minimum_length() {
    assert_eq!(title(" ab "), Err(ValidationError::TitleTooShort));
    assert_eq!(title(" Two Sum "), Ok("Two Sum".to_owned()));
}

fn change(current: &str, new: &str, confirm: &str) -> ChangePasswordRequest {
    ChangePasswordRequest {
        current_password: current.to_owned(),
        new_password: new.to_owned(),
        new_password_confirm: confirm.to_owned(),
    }
}

#[test]
fn password_change_requires_every_field() {
    assert_eq!(password_change(&change(" ", "password2", "password2")), Err(ValidationError::MissingFields));
    assert_eq!(password_change(&change("password1", "", "password2")), Err(ValidationError::MissingFields));
}

#[test]
fn password_change_checks_pair_then_reuse() {
    assert_eq!(
        password_change(&change("password1", "password2", "password3")),
        Err(ValidationError::PasswordMismatch)
    );
    assert_eq!(password_change(&change("password1", "short", "short")), Err(ValidationError::PasswordTooShort));
    assert_eq!(
        password_change(&change("password1", "password1", "password1")),
        Err(ValidationError::PasswordUnchanged)
    );
    assert_eq!(password_change(&change("password1", "password2", "password2")), Ok(()));
}
