//! Dashboard practice-list state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Holds today's due problems as delivered by `GET /problems/practice/`.
//! Marking a problem done removes it locally; the server already decided
//! what is due, so nothing is recomputed here.

#[cfg(test)]
#[path = "practice_test.rs"]
mod practice_test;

use wire::PracticeProblem;

pub const LOAD_FAILED: &str = "Failed to load problems. Please try again.";
pub const MARK_DONE_FAILED: &str = "Failed to mark problem as done. Please try again.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PracticeState {
    pub items: Vec<PracticeProblem>,
    pub loading: bool,
    pub error: Option<String>,
}

impl PracticeState {
    /// A fetch started. Any previous error is cleared.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn loaded(&mut self, items: Vec<PracticeProblem>) {
        self.items = items;
        self.loading = false;
    }

    pub fn load_failed(&mut self) {
        self.loading = false;
        self.error = Some(LOAD_FAILED.to_owned());
    }

    pub fn mark_done_failed(&mut self) {
        self.error = Some(MARK_DONE_FAILED.to_owned());
    }

    /// Drop problem `id` from the list. Returns whether anything was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.problem.id != id);
        self.items.len() != before
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items grouped by category label in first-appearance order.
    #[must_use]
    pub fn grouped(&self) -> Vec<(String, Vec<PracticeProblem>)> {
        wire::group_by_category(&self.items)
    }
}
