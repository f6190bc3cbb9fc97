use super::*;

#[test]
fn endpoint_prefixes_api() {
    assert_eq!(endpoint(ep::AUTH_LOGIN), "/api/auth/login/");
    assert_eq!(endpoint(&ep::problem_done(7)), "/api/problems/7/done/");
}

#[test]
fn from_response_extracts_server_message() {
    let err = ApiError::from_response(400, r#"{"error":"Username already exists."}"#);
    assert_eq!(err.status, Some(400));
    assert_eq!(err.message.as_deref(), Some("Username already exists."));
    assert_eq!(err.to_string(), "Username already exists.");
}

#[test]
fn from_response_without_json_has_no_message() {
    let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
    assert_eq!(err.message, None);
    assert_eq!(err.to_string(), "request failed: 502");
    assert_eq!(err.message_or("Failed to add problem."), "Failed to add problem.");
}

#[test]
fn unauthorized_only_for_401() {
    assert!(ApiError::from_response(401, "").is_unauthorized());
    assert!(!ApiError::from_response(403, "").is_unauthorized());
    assert!(!ApiError::transport("offline").is_unauthorized());
}

#[test]
fn transport_error_displays_generic_text() {
    let err = ApiError::transport("connection reset");
    assert_eq!(err.status, None);
    assert_eq!(err.to_string(), "request failed");
}

#[test]
fn decode_body_parses_problem_list() {
    let body = r#"[{"id":1,"title":"Two Sum","leetcode_url":"https://leetcode.com/problems/two-sum/","difficulty":"easy","solved_date":"2026-03-01T10:00:00Z"}]"#;
    let problems: Vec<Problem> = decode_body(body).unwrap();
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].difficulty, Difficulty::Easy);
    assert_eq!(problems[0].practice_count, 0);
}

#[test]
fn decode_body_rejects_garbage() {
    let err = decode_body::<User>("not json").unwrap_err();
    assert_eq!(err.status, None);
}

