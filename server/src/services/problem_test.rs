use super::*;
use time::macros::datetime;

fn record() -> ProblemRecord {
    ProblemRecord {
        id: 7,
        title: "Two Sum".into(),
        leetcode_url: "https://leetcode.com/problems/two-sum".into(),
        difficulty: Difficulty::Easy,
        solved_date: datetime!(2026-03-01 09:30:00 UTC),
        created_at: datetime!(2026-03-01 09:30:00 UTC),
        last_practiced: None,
        practice_count: 0,
    }
}

#[test]
fn format_timestamp_is_rfc3339() {
    assert_eq!(format_timestamp(datetime!(2026-03-01 09:30:00 UTC)), "2026-03-01T09:30:00Z");
}

#[test]
fn to_wire_copies_fields() {
    let wire = record().to_wire();
    assert_eq!(wire.id, 7);
    assert_eq!(wire.title, "Two Sum");
    assert_eq!(wire.difficulty, Difficulty::Easy);
    assert_eq!(wire.solved_date, "2026-03-01T09:30:00Z");
    assert_eq!(wire.created_at.as_deref(), Some("2026-03-01T09:30:00Z"));
    assert_eq!(wire.last_practiced, None);
}

#[test]
fn to_wire_formats_last_practiced() {
    let mut r = record();
    r.last_practiced = Some(datetime!(2026-03-04 18:00:00 UTC));
    r.practice_count = 2;
    let wire = r.to_wire();
    assert_eq!(wire.last_practiced.as_deref(), Some("2026-03-04T18:00:00Z"));
    assert_eq!(wire.practice_count, 2);
}

#[test]
fn not_found_message() {
    assert_eq!(ProblemError::NotFound.to_string(), "Problem not found");
}

#[tokio::test]
async fn add_rejects_bad_url_before_database() {
    let state = crate::state::test_helpers::test_app_state();
    let req = AddProblemRequest { leetcode_url: "ftp://leetcode.com/problems/x".into(), difficulty: None };
    let err = add(&state.pool, &state.http, Duration::from_millis(10), 1, &req).await.unwrap_err();
    assert!(matches!(err, ProblemError::Invalid(ValidationError::InvalidUrl)));
}

#[tokio::test]
async fn update_rejects_short_title_before_database() {
    let state = crate::state::test_helpers::test_app_state();
    let req = UpdateProblemRequest { title: Some(" x ".into()), difficulty: None };
    let err = update(&state.pool, 1, 1, &req).await.unwrap_err();
    assert!(matches!(err, ProblemError::Invalid(ValidationError::TitleTooShort)));
}

// =============================================================================
// Live database
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;
    use crate::services::session::generate_token;
    use crate::state::test_helpers::live_pool;

    async fn seed_user(pool: &PgPool) -> i64 {
        let suffix = generate_token();
        sqlx::query_scalar("INSERT INTO users (username, email, password_hash) VALUES ($1, $2, 'x') RETURNING id")
            .bind(format!("prob-{suffix}"))
            .bind(format!("prob-{suffix}@example.com"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn add_duplicate_then_done_then_history() {
        let pool = live_pool().await;
        let user_id = seed_user(&pool).await;
        let http = reqwest::Client::new();
        // Unroutable host: the title comes from the slug.
        let req = AddProblemRequest {
            leetcode_url: "http://127.0.0.1:1/problems/house-robber/".into(),
            difficulty: Some(Difficulty::Hard),
        };

        let AddOutcome::Created(created) = add(&pool, &http, Duration::from_millis(200), user_id, &req).await.unwrap()
        else {
            panic!("expected a new problem");
        };
        assert_eq!(created.title, "House Robber");
        assert_eq!(created.difficulty, Difficulty::Hard);
        assert_eq!(created.leetcode_url, "http://127.0.0.1:1/problems/house-robber");

        let again = add(&pool, &http, Duration::from_millis(200), user_id, &req).await.unwrap();
        assert!(matches!(again, AddOutcome::Existing(ref p) if p.id == created.id));

        let done = mark_done(&pool, user_id, created.id).await.unwrap();
        assert_eq!(done.practice_count, 1);

        let hist = history(&pool, user_id, created.id).await.unwrap();
        assert_eq!(hist.history.len(), 2);

        assert!(matches!(get(&pool, user_id + 1_000_000, created.id).await, Err(ProblemError::NotFound)));
        delete(&pool, user_id, created.id).await.unwrap();
        assert!(matches!(delete(&pool, user_id, created.id).await, Err(ProblemError::NotFound)));
    }
}
