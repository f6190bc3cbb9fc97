//! All-problems page state: the full list plus practice counters.

#[cfg(test)]
#[path = "problems_test.rs"]
mod problems_test;

use wire::{DifficultyStats, Problem, ProblemStats, StatsPeriod};

pub const LOAD_FAILED: &str = "Failed to load problems. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete problem. Please try again.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProblemsState {
    pub items: Vec<Problem>,
    pub stats: Option<ProblemStats>,
    /// Difficulty split for the selected period.
    pub difficulty: Option<DifficultyStats>,
    pub period: StatsPeriod,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProblemsState {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn loaded(&mut self, items: Vec<Problem>) {
        self.items = items;
        self.loading = false;
    }

    pub fn load_failed(&mut self) {
        self.loading = false;
        self.error = Some(LOAD_FAILED.to_owned());
    }

    /// Remove a deleted problem and take it out of the total and its
    /// practice-count bucket. Today/yesterday counters need the server, so
    /// the page re-fetches stats after this.
    pub fn deleted(&mut self, id: i64) {
        let Some(pos) = self.items.iter().position(|p| p.id == id) else {
            return;
        };
        let removed = self.items.remove(pos);
        if let Some(stats) = self.stats.as_mut() {
            let bucket = match removed.practice_count {
                c if c >= 3 => &mut stats.fully_practiced,
                2 => &mut stats.partially_practiced,
                1 => &mut stats.solved_once,
                _ => &mut stats.not_practiced,
            };
            *bucket = (*bucket - 1).max(0);
            stats.total = (stats.total - 1).max(0);
        }
        if let Some(split) = self.difficulty.as_mut().filter(|d| d.period == StatsPeriod::Lifetime) {
            let bucket = match removed.difficulty {
                wire::Difficulty::Easy => &mut split.easy,
                wire::Difficulty::Medium => &mut split.medium,
                wire::Difficulty::Hard => &mut split.hard,
            };
            *bucket = (*bucket - 1).max(0);
            split.total = (split.total - 1).max(0);
        }
    }

    /// A period button was pressed; the old split no longer applies.
    pub fn select_period(&mut self, period: StatsPeriod) {
        self.period = period;
        self.difficulty = None;
    }

    /// Keep a difficulty split only if it matches the selected period, so a
    /// slow response for an old selection cannot overwrite a newer one.
    pub fn difficulty_loaded(&mut self, split: DifficultyStats) {
        if split.period == self.period {
            self.difficulty = Some(split);
        }
    }

    pub fn delete_failed(&mut self, message: String) {
        self.error = Some(message);
    }
}

/// Short "practiced N times" label for a list row.
#[must_use]
pub fn practice_label(count: i32) -> String {
    match count {
        0 => "Not practiced yet".to_owned(),
        1 => "Practiced once".to_owned(),
        n => format!("Practiced {n} times"),
    }
}
