use super::*;
use axum::body::Body;
use axum::http::{Request, header};
use tower::ServiceExt;

use crate::state::test_helpers::test_app_state;

async fn send(req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
    let resp = app(test_app_state()).oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, headers, json)
}

fn post_json(path: &str, body: &serde_json::Value) -> Request<Body> {
    Request::post(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// Health + auth guard
// =============================================================================

#[tokio::test]
async fn healthz_ok() {
    let (status, _, _) = send(Request::get("/healthz").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn current_user_without_cookie_is_401_json() {
    let (status, _, body) = send(Request::get("/api/auth/user/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, serde_json::json!({"error": "Not authenticated"}));
}

#[tokio::test]
async fn problem_routes_require_session() {
    for path in [
        "/api/problems/",
        "/api/problems/practice/",
        "/api/problems/stats/",
        "/api/problems/stats/difficulty/?period=week",
        "/api/problems/stats/activity/?year=2025",
        "/api/problems/3/",
    ] {
        let (status, _, _) = send(Request::get(path).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{path}");
    }
    let (status, _, _) = send(Request::post("/api/problems/3/done/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unreachable_database_is_opaque_500() {
    let req = Request::get("/api/problems/")
        .header(header::COOKIE, "session_token=abc")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

// =============================================================================
// Validation that runs before the database
// =============================================================================

#[tokio::test]
async fn register_password_mismatch_is_400() {
    let body = serde_json::json!({
        "username": "ada",
        "email": "ada@example.com",
        "password": "password123",
        "password_confirm": "password124",
    });
    let (status, _, json) = send(post_json("/api/auth/register/", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Passwords do not match");
}

#[tokio::test]
async fn register_missing_fields_is_400() {
    let (status, _, json) = send(post_json("/api/auth/register/", &serde_json::json!({"username": "ada"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Please fill in all fields.");
}

#[tokio::test]
async fn login_blank_credentials_is_400() {
    let (status, _, json) = send(post_json("/api/auth/login/", &serde_json::json!({"username": " "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Please provide both username and password.");
}

#[tokio::test]
async fn password_reset_malformed_email_is_400() {
    let (status, _, json) = send(post_json("/api/auth/password-reset/", &serde_json::json!({"email": "nope"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Please enter a valid email address.");
}

#[tokio::test]
async fn password_reset_confirm_short_password_is_400() {
    let body = serde_json::json!({"token": "abc", "new_password": "short", "new_password_confirm": "short"});
    let (status, _, json) = send(post_json("/api/auth/password-reset-confirm/", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Password must be at least 8 characters long.");
}

#[tokio::test]
async fn change_password_requires_session() {
    let body = serde_json::json!({
        "current_password": "password123",
        "new_password": "password456",
        "new_password_confirm": "password456",
    });
    let (status, _, json) = send(post_json("/api/auth/change-password/", &body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Not authenticated");
}

// =============================================================================
// Extractor rejections are JSON too
// =============================================================================

fn error_text(json: &serde_json::Value) -> &str {
    json["error"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn malformed_json_body_is_400_json() {
    let req = Request::post("/api/auth/login/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, json) = send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_text(&json).is_empty(), "{json}");
}

#[tokio::test]
async fn missing_content_type_is_415_json() {
    let req = Request::post("/api/auth/login/").body(Body::from("{}")).unwrap();
    let (status, _, json) = send(req).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(error_text(&json).contains("Content-Type"), "{json}");
}

#[tokio::test]
async fn wrongly_typed_field_is_json_error() {
    let (status, _, json) = send(post_json("/api/auth/login/", &serde_json::json!({"username": 7}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!error_text(&json).is_empty(), "{json}");
}

#[tokio::test]
async fn non_numeric_problem_id_is_400_json() {
    let (status, _, json) = send(Request::get("/api/problems/abc/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_text(&json).is_empty(), "{json}");

    let (status, _, json) = send(Request::post("/api/problems/abc/done/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_text(&json).is_empty(), "{json}");
}

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn logout_without_session_clears_cookie() {
    let (status, headers, json) = send(Request::post("/api/auth/logout/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Logout successful");
    let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("session_token="));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, _, _) = send(Request::get("/api/nope/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
