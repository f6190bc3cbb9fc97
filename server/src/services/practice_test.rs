use super::*;
use time::macros::datetime;
use wire::Difficulty;

fn problem(id: i64, solved: OffsetDateTime) -> ProblemRecord {
    ProblemRecord {
        id,
        title: format!("Problem {id}"),
        leetcode_url: format!("https://leetcode.com/problems/p-{id}"),
        difficulty: Difficulty::Medium,
        solved_date: solved,
        created_at: solved,
        last_practiced: None,
        practice_count: 0,
    }
}

// 2026-03-04 is a Wednesday, 2026-03-07 a Saturday.
const WEDNESDAY: OffsetDateTime = datetime!(2026-03-04 12:00:00 UTC);
const SATURDAY: OffsetDateTime = datetime!(2026-03-07 12:00:00 UTC);

#[test]
fn weekday_detection() {
    assert!(!is_weekend(WEDNESDAY.date()));
    assert!(is_weekend(SATURDAY.date()));
    assert!(is_weekend(datetime!(2026-03-08 00:00 UTC).date()));
}

#[test]
fn interval_category_text() {
    assert_eq!(interval_category(5), "Solved 5 days ago");
}

#[test]
fn selects_exact_interval_days_only() {
    let problems = vec![
        problem(1, datetime!(2026-03-02 23:59:00 UTC)), // 2 days
        problem(2, datetime!(2026-02-27 08:00:00 UTC)), // 5 days
        problem(3, datetime!(2026-02-22 08:00:00 UTC)), // 10 days
        problem(4, datetime!(2026-02-02 08:00:00 UTC)), // 30 days
        problem(5, datetime!(2026-03-01 08:00:00 UTC)), // 3 days
        problem(6, datetime!(2026-03-04 08:00:00 UTC)), // today
    ];
    let picked = select(&problems, 1, WEDNESDAY);
    let got: Vec<(i64, &str)> = picked
        .iter()
        .map(|p| (p.problem.id, p.category.as_deref().unwrap_or_default()))
        .collect();
    assert_eq!(
        got,
        vec![
            (1, "Solved 2 days ago"),
            (2, "Solved 5 days ago"),
            (3, "Solved 10 days ago"),
            (4, "Solved 30 days ago"),
        ]
    );
}

#[test]
fn solve_date_uses_utc_calendar_day() {
    // 01:00 on the 3rd at +05:00 is still the 2nd in UTC.
    let problems = vec![problem(1, datetime!(2026-03-03 01:00:00 +05:00))];
    let picked = select(&problems, 1, WEDNESDAY);
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].category.as_deref(), Some("Solved 2 days ago"));
}

#[test]
fn weekday_has_no_random_picks() {
    let problems: Vec<_> = (1..=5).map(|i| problem(i, datetime!(2025-12-01 08:00 UTC))).collect();
    assert!(select(&problems, 1, WEDNESDAY).is_empty());
}

#[test]
fn weekend_adds_two_stable_random_picks() {
    let mut problems: Vec<_> = (1..=6).map(|i| problem(i, datetime!(2025-12-01 08:00 UTC))).collect();
    problems.push(problem(99, datetime!(2026-03-05 08:00 UTC))); // 2 days before Saturday

    let first = select(&problems, 42, SATURDAY);
    assert_eq!(first.len(), 3);
    assert_eq!(first[0].problem.id, 99);
    assert!(first[1..].iter().all(|p| p.category.as_deref() == Some(RANDOM_CATEGORY)));
    assert!(first[1..].iter().all(|p| p.problem.id != 99));
    assert_ne!(first[1].problem.id, first[2].problem.id);

    // Same user, same day, any input order: same picks.
    problems.reverse();
    let second = select(&problems, 42, datetime!(2026-03-07 23:00 UTC));
    let ids = |v: &[PracticeProblem]| v.iter().map(|p| p.problem.id).collect::<Vec<_>>();
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn weekend_with_few_problems_takes_what_exists() {
    let problems = vec![problem(1, datetime!(2025-12-01 08:00 UTC))];
    let picked = select(&problems, 1, SATURDAY);
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].category.as_deref(), Some(RANDOM_CATEGORY));
}

#[test]
fn solved_recently_window() {
    let mut p = problem(1, datetime!(2026-03-04 01:00 UTC));
    assert!(solved_recently(&p, WEDNESDAY));

    p.solved_date = datetime!(2026-03-03 23:00 UTC);
    assert!(!solved_recently(&p, WEDNESDAY));

    p.last_practiced = Some(datetime!(2026-03-04 06:00 UTC));
    assert!(solved_recently(&p, WEDNESDAY));
}

#[test]
fn daily_seed_varies_by_user_and_day() {
    let day = SATURDAY.date();
    assert_ne!(daily_seed(1, day), daily_seed(2, day));
    assert_ne!(daily_seed(1, day), daily_seed(1, WEDNESDAY.date()));
}
