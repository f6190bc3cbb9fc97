use super::*;

#[test]
fn stats_rows_cover_every_counter() {
    let stats = ProblemStats {
        total: 9,
        fully_practiced: 1,
        partially_practiced: 2,
        solved_once: 3,
        not_practiced: 3,
        practiced_today: 4,
        practiced_yesterday: 5,
    };
    let rows = stats_rows(&stats);
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0], ("Total", 9));
    assert_eq!(rows[6], ("Yesterday", 5));
    let buckets: i64 = rows[1..5].iter().map(|(_, v)| v).sum();
    assert_eq!(buckets, stats.total);
}

#[test]
fn date_part_strips_time() {
    assert_eq!(date_part("2026-03-04T09:15:00Z"), "2026-03-04");
    assert_eq!(date_part("2026-03-04"), "2026-03-04");
}

#[test]
fn period_labels_are_distinct() {
    let labels: std::collections::HashSet<_> = StatsPeriod::ALL.into_iter().map(period_label).collect();
    assert_eq!(labels.len(), StatsPeriod::ALL.len());
    assert_eq!(period_label(StatsPeriod::Lifetime), "All time");
}

#[test]
fn difficulty_rows_sum_to_total() {
    let split = DifficultyStats { period: StatsPeriod::Week, easy: 2, medium: 3, hard: 1, total: 6 };
    let rows = difficulty_rows(&split);
    assert_eq!(rows[0], ("Easy", 2));
    assert_eq!(rows.iter().map(|(_, v)| v).sum::<i64>(), split.total);
}
