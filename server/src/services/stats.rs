//! Practice progress counters.
//!
//! Day boundaries are UTC calendar days throughout, matching practice
//! selection. A problem is "active" on a day when it was solved or has a
//! history entry that day; each problem counts once per day.

use std::collections::{BTreeMap, HashSet};

use sqlx::PgPool;
use time::{Date, Duration, Month, OffsetDateTime, UtcOffset};
use wire::{ActivityDay, ActivityHeatmap, Difficulty, DifficultyStats, ProblemStats, StatsPeriod};

use super::problem::{self, ProblemRecord};

fn utc_date(ts: OffsetDateTime) -> Date {
    ts.to_offset(UtcOffset::UTC).date()
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Summarize a user's problems. `history` is `(problem_id, practiced_at)`.
#[must_use]
pub fn summarize(problems: &[ProblemRecord], history: &[(i64, OffsetDateTime)], today: Date) -> ProblemStats {
    let mut stats = ProblemStats { total: count(problems.len()), ..ProblemStats::default() };
    let yesterday = today.previous_day();
    let mut touched_today = HashSet::new();
    let mut touched_yesterday = HashSet::new();

    for p in problems {
        match p.practice_count {
            c if c >= 3 => stats.fully_practiced += 1,
            2 => stats.partially_practiced += 1,
            1 => stats.solved_once += 1,
            _ => stats.not_practiced += 1,
        }

        if utc_date(p.solved_date) == today {
            touched_today.insert(p.id);
        }
        if let Some(last) = p.last_practiced.map(utc_date) {
            if last == today {
                touched_today.insert(p.id);
            } else if Some(last) == yesterday {
                touched_yesterday.insert(p.id);
            }
        }
    }

    for (id, at) in history {
        let day = utc_date(*at);
        if day == today {
            touched_today.insert(*id);
        } else if Some(day) == yesterday {
            touched_yesterday.insert(*id);
        }
    }

    stats.practiced_today = count(touched_today.len());
    stats.practiced_yesterday = count(touched_yesterday.len());
    stats
}

/// Load and summarize stats for one user as of `now`.
pub async fn for_user(pool: &PgPool, user_id: i64, now: OffsetDateTime) -> Result<ProblemStats, sqlx::Error> {
    let today = utc_date(now);
    let problems = problem::list(pool, user_id).await?;
    let since = today
        .previous_day()
        .unwrap_or(today)
        .midnight()
        .assume_utc();
    let history = problem::history_since(pool, user_id, since).await?;
    Ok(summarize(&problems, &history, today))
}

/// Earliest day inside `period`, or `None` for lifetime. Windows are rolling
/// and end today: 1, 7, 30 and 365 days.
#[must_use]
pub fn period_start(period: StatsPeriod, today: Date) -> Option<Date> {
    let days = match period {
        StatsPeriod::Today => 1,
        StatsPeriod::Week => 7,
        StatsPeriod::Month => 30,
        StatsPeriod::Year => 365,
        StatsPeriod::Lifetime => return None,
    };
    Some(today.checked_sub(Duration::days(days - 1)).unwrap_or(Date::MIN))
}

/// Count distinct problems active in `period` by difficulty. Lifetime counts
/// every tracked problem.
#[must_use]
pub fn difficulty_breakdown(
    problems: &[ProblemRecord],
    history: &[(i64, OffsetDateTime)],
    period: StatsPeriod,
    today: Date,
) -> DifficultyStats {
    let active: HashSet<i64> = match period_start(period, today) {
        None => problems.iter().map(|p| p.id).collect(),
        Some(start) => {
            let in_window = |ts: OffsetDateTime| (start..=today).contains(&utc_date(ts));
            problems
                .iter()
                .filter(|p| in_window(p.solved_date))
                .map(|p| p.id)
                .chain(history.iter().filter(|(_, at)| in_window(*at)).map(|(id, _)| *id))
                .collect()
        }
    };

    let mut stats = DifficultyStats { period, ..DifficultyStats::default() };
    for p in problems.iter().filter(|p| active.contains(&p.id)) {
        match p.difficulty {
            Difficulty::Easy => stats.easy += 1,
            Difficulty::Medium => stats.medium += 1,
            Difficulty::Hard => stats.hard += 1,
        }
    }
    stats.total = stats.easy + stats.medium + stats.hard;
    stats
}

/// Distinct active problems per day of `year`, ascending by date.
#[must_use]
pub fn activity_heatmap(problems: &[ProblemRecord], history: &[(i64, OffsetDateTime)], year: i32) -> ActivityHeatmap {
    let touched: HashSet<(Date, i64)> = problems
        .iter()
        .map(|p| (utc_date(p.solved_date), p.id))
        .chain(history.iter().map(|(id, at)| (utc_date(*at), *id)))
        .filter(|(day, _)| day.year() == year)
        .collect();

    let mut per_day: BTreeMap<Date, i64> = BTreeMap::new();
    for (day, _) in touched {
        *per_day.entry(day).or_default() += 1;
    }

    let days: Vec<ActivityDay> = per_day
        .into_iter()
        .map(|(day, count)| ActivityDay { date: day.to_string(), count })
        .collect();
    ActivityHeatmap {
        year,
        total: days.iter().map(|d| d.count).sum(),
        max: days.iter().map(|d| d.count).max().unwrap_or(0),
        days,
    }
}

/// Earliest and latest accepted heatmap years. Out-of-range requests fall
/// back to the current year.
pub const HEATMAP_YEARS: std::ops::RangeInclusive<i32> = 2020..=2100;

#[must_use]
pub fn heatmap_year(requested: Option<i32>, today: Date) -> i32 {
    requested.filter(|y| HEATMAP_YEARS.contains(y)).unwrap_or(today.year())
}

/// Load and break down one user's problems by difficulty for `period`.
pub async fn difficulty_for_user(
    pool: &PgPool,
    user_id: i64,
    period: StatsPeriod,
    now: OffsetDateTime,
) -> Result<DifficultyStats, sqlx::Error> {
    let today = utc_date(now);
    let problems = problem::list(pool, user_id).await?;
    let history = match period_start(period, today) {
        Some(start) => problem::history_since(pool, user_id, start.midnight().assume_utc()).await?,
        None => Vec::new(),
    };
    Ok(difficulty_breakdown(&problems, &history, period, today))
}

/// Load one user's activity heatmap for `year`.
pub async fn heatmap_for_user(pool: &PgPool, user_id: i64, year: i32) -> Result<ActivityHeatmap, sqlx::Error> {
    let problems = problem::list(pool, user_id).await?;
    let since = Date::from_calendar_date(year, Month::January, 1)
        .unwrap_or(Date::MIN)
        .midnight()
        .assume_utc();
    let history = problem::history_since(pool, user_id, since).await?;
    Ok(activity_heatmap(&problems, &history, year))
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
