//! Spaced-repetition selection.
//!
//! A problem comes up for review when its solve date is exactly one of
//! [`INTERVAL_DAYS`] before today (UTC). Weekends add a couple of random
//! extras; the shuffle is seeded from the user and the date so reloading the
//! page does not reshuffle them.

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use time::{Date, Duration, OffsetDateTime, UtcOffset, Weekday};
use wire::PracticeProblem;

use super::problem::ProblemRecord;

pub const INTERVAL_DAYS: [i64; 4] = [2, 5, 10, 30];
pub const WEEKEND_PICKS: usize = 2;
pub const RANDOM_CATEGORY: &str = "Random Practice";
pub const RECENT_WINDOW: Duration = Duration::hours(12);

#[must_use]
pub fn interval_category(days: i64) -> String {
    format!("Solved {days} days ago")
}

#[must_use]
pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// True if the last touch (practice, or the solve itself) was within
/// [`RECENT_WINDOW`] of `now`.
#[must_use]
pub fn solved_recently(problem: &ProblemRecord, now: OffsetDateTime) -> bool {
    let last = problem.last_practiced.unwrap_or(problem.solved_date);
    now - last <= RECENT_WINDOW
}

fn daily_seed(user_id: i64, today: Date) -> u64 {
    let day = i64::from(today.to_julian_day()).cast_unsigned();
    user_id.cast_unsigned().wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ day
}

fn entry(problem: &ProblemRecord, category: String, now: OffsetDateTime) -> PracticeProblem {
    PracticeProblem {
        problem: problem.to_wire(),
        category: Some(category),
        solved_recently: solved_recently(problem, now),
    }
}

/// Pick today's review list for one user.
#[must_use]
pub fn select(problems: &[ProblemRecord], user_id: i64, now: OffsetDateTime) -> Vec<PracticeProblem> {
    let now = now.to_offset(UtcOffset::UTC);
    let today = now.date();
    let mut used = HashSet::new();
    let mut picked = Vec::new();

    for days in INTERVAL_DAYS {
        let Some(target) = today.checked_sub(Duration::days(days)) else {
            continue;
        };
        for p in problems {
            if p.solved_date.to_offset(UtcOffset::UTC).date() == target && used.insert(p.id) {
                picked.push(entry(p, interval_category(days), now));
            }
        }
    }

    if is_weekend(today) {
        let mut rest: Vec<&ProblemRecord> = problems.iter().filter(|p| !used.contains(&p.id)).collect();
        rest.sort_by_key(|p| p.id);
        rest.shuffle(&mut StdRng::seed_from_u64(daily_seed(user_id, today)));
        picked.extend(
            rest.into_iter()
                .take(WEEKEND_PICKS)
                .map(|p| entry(p, RANDOM_CATEGORY.to_owned(), now)),
        );
    }

    picked
}

#[cfg(test)]
#[path = "practice_test.rs"]
mod tests;
