//! Card for one practice problem on the dashboard.

#[cfg(test)]
#[path = "problem_card_test.rs"]
mod problem_card_test;

use leptos::prelude::*;
use wire::Problem;

/// Badge colour for a difficulty wire name. Unknown values are grey.
#[must_use]
pub fn difficulty_color(difficulty: &str) -> &'static str {
    match difficulty.to_ascii_lowercase().as_str() {
        "easy" => "#4caf50",
        "medium" => "#ff9800",
        "hard" => "#f44336",
        _ => "#999",
    }
}

/// Shows the title, a difficulty badge, a link to the problem and a Done
/// button that reports `problem.id` through `on_mark_done`.
#[component]
pub fn ProblemCard(
    problem: Problem,
    on_mark_done: Callback<i64>,
    #[prop(optional)] solved_recently: bool,
) -> impl IntoView {
    let id = problem.id;
    let badge_style = format!("background-color: {}", difficulty_color(problem.difficulty.as_str()));

    view! {
        <div class="problem-card" class:problem-card--recent=solved_recently>
            <div class="problem-card__header">
                <h3 class="problem-card__title">{problem.title}</h3>
                <span class="problem-card__badge" style=badge_style>
                    {problem.difficulty.badge()}
                </span>
            </div>
            <div class="problem-card__actions">
                <a
                    class="problem-card__link"
                    href=problem.leetcode_url
                    target="_blank"
                    rel="noopener noreferrer"
                >
                    "View on Leetcode"
                </a>
                <button class="btn btn--primary problem-card__done" on:click=move |_| on_mark_done.run(id)>
                    "Done"
                </button>
            </div>
        </div>
    }
}
