use super::*;
use wire::Problem;

fn practice(id: i64, title: &str, category: Option<&str>, recent: bool) -> PracticeProblem {
    PracticeProblem {
        problem: Problem {
            id,
            title: title.to_owned(),
            leetcode_url: format!("https://leetcode.com/problems/{}", title.to_lowercase().replace(' ', "-")),
            difficulty: Difficulty::Easy,
            solved_date: "2026-03-01T10:00:00Z".to_owned(),
            created_at: None,
            last_practiced: None,
            practice_count: 1,
        },
        category: category.map(ToOwned::to_owned),
        solved_recently: recent,
    }
}

// =============================================================================
// Argument parsing
// =============================================================================

#[test]
fn parses_problem_add_with_difficulty() {
    let cli = Cli::try_parse_from([
        "flashcards",
        "--base-url",
        "http://localhost:4000",
        "problems",
        "add",
        "https://leetcode.com/problems/two-sum",
        "--difficulty",
        "Hard",
    ])
    .unwrap();
    assert_eq!(cli.base_url, "http://localhost:4000");
    match cli.command {
        Command::Problems(ProblemsCommand { command: ProblemsSubcommand::Add { url, difficulty } }) => {
            assert_eq!(url, "https://leetcode.com/problems/two-sum");
            assert_eq!(difficulty, Some(Difficulty::Hard));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn rejects_unknown_difficulty() {
    let result = Cli::try_parse_from(["flashcards", "problems", "add", "https://x", "--difficulty", "extreme"]);
    assert!(result.is_err());
}

#[test]
fn parses_auth_reset_confirm() {
    let cli = Cli::try_parse_from([
        "flashcards",
        "auth",
        "reset-confirm",
        "--token",
        "abc",
        "--password",
        "password123",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Command::Auth(AuthCommand { command: AuthSubcommand::ResetConfirm { password_confirm: None, .. } })
    ));
}

#[test]
fn parses_auth_change_password() {
    let cli = Cli::try_parse_from([
        "flashcards",
        "auth",
        "change-password",
        "--current",
        "password123",
        "--password",
        "password456",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Command::Auth(AuthCommand {
            command: AuthSubcommand::ChangePassword { password_confirm: None, .. }
        })
    ));
}

#[test]
fn parses_problems_difficulty_period() {
    let cli = Cli::try_parse_from(["flashcards", "problems", "difficulty", "--period", "week"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Problems(ProblemsCommand {
            command: ProblemsSubcommand::Difficulty { period: StatsPeriod::Week, json: false }
        })
    ));

    let default = Cli::try_parse_from(["flashcards", "problems", "difficulty"]).unwrap();
    assert!(matches!(
        default.command,
        Command::Problems(ProblemsCommand {
            command: ProblemsSubcommand::Difficulty { period: StatsPeriod::Lifetime, .. }
        })
    ));

    assert!(Cli::try_parse_from(["flashcards", "problems", "difficulty", "--period", "decade"]).is_err());
}

#[test]
fn parses_problems_activity_year() {
    let cli = Cli::try_parse_from(["flashcards", "problems", "activity", "--year", "2025"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Problems(ProblemsCommand { command: ProblemsSubcommand::Activity { year: Some(2025) } })
    ));
}

// =============================================================================
// Session cookie
// =============================================================================

#[test]
fn extracts_session_token_from_set_cookie() {
    let headers = ["other=1; Path=/", "session_token=abc123; HttpOnly; SameSite=Lax; Path=/"];
    assert_eq!(session_token_from_set_cookie(headers), Some("abc123".to_owned()));
}

#[test]
fn cleared_session_cookie_yields_none() {
    assert_eq!(session_token_from_set_cookie(["session_token=; Max-Age=0; Path=/"]), None);
    assert_eq!(session_token_from_set_cookie(Vec::<&str>::new()), None);
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn render_practice_groups_by_category() {
    let items = vec![
        practice(1, "Two Sum", Some("Solved 2 days ago"), false),
        practice(2, "Four Divisors", None, true),
        practice(3, "Valid Anagram", Some("Solved 2 days ago"), false),
    ];
    let rendered = render_practice(&items);
    let expected = "Solved 2 days ago\n  [1] Two Sum (easy) https://leetcode.com/problems/two-sum\n  [3] Valid Anagram (easy) https://leetcode.com/problems/valid-anagram\nOther\n  [2] Four Divisors (easy) https://leetcode.com/problems/four-divisors *\n";
    assert_eq!(rendered, expected);
}

#[test]
fn render_practice_empty_list() {
    assert_eq!(render_practice(&[]), "No problems to practice today!\n");
}

#[test]
fn update_requires_a_field() {
    assert!(matches!(update_request(None, None), Err(CliError::EmptyUpdate)));
    let req = update_request(Some("Two Sum".to_owned()), None).unwrap();
    assert_eq!(req.title.as_deref(), Some("Two Sum"));
    assert_eq!(req.difficulty, None);
}

#[test]
fn render_difficulty_lists_each_tier() {
    let split = DifficultyStats { period: StatsPeriod::Month, easy: 3, medium: 2, hard: 1, total: 6 };
    let expected = "period: month\n  easy   3\n  medium 2\n  hard   1\n  total  6\n";
    assert_eq!(render_difficulty(&split), expected);
}
