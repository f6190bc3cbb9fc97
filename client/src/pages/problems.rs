//! All-problems page: every tracked problem with practice counters.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loads `GET /problems/`, `GET /problems/stats/` and the difficulty split
//! for the selected period. Deleting goes through a confirmation dialog,
//! drops the row locally on success, then re-reads the counters.

#[cfg(test)]
#[path = "problems_test.rs"]
mod problems_test;

use leptos::prelude::*;
use wire::{DifficultyStats, Problem, ProblemStats, StatsPeriod};

use crate::components::problem_card::difficulty_color;
use crate::state::problems::{DELETE_FAILED, ProblemsState, practice_label};

/// Label/value rows for the stats strip.
#[must_use]
pub fn stats_rows(stats: &ProblemStats) -> Vec<(&'static str, i64)> {
    vec![
        ("Total", stats.total),
        ("Practiced 3+ times", stats.fully_practiced),
        ("Practiced twice", stats.partially_practiced),
        ("Practiced once", stats.solved_once),
        ("Not practiced", stats.not_practiced),
        ("Today", stats.practiced_today),
        ("Yesterday", stats.practiced_yesterday),
    ]
}

/// Button label for a period selector.
#[must_use]
pub fn period_label(period: StatsPeriod) -> &'static str {
    match period {
        StatsPeriod::Today => "Today",
        StatsPeriod::Week => "7 days",
        StatsPeriod::Month => "30 days",
        StatsPeriod::Year => "365 days",
        StatsPeriod::Lifetime => "All time",
    }
}

/// Label/value rows for the difficulty split.
#[must_use]
pub fn difficulty_rows(split: &DifficultyStats) -> Vec<(&'static str, i64)> {
    vec![("Easy", split.easy), ("Medium", split.medium), ("Hard", split.hard)]
}

#[cfg(feature = "hydrate")]
fn refresh_stats(state: RwSignal<ProblemsState>) {
    leptos::task::spawn_local(async move {
        match crate::net::api::get_problem_stats().await {
            Ok(stats) => state.update(|s| s.stats = Some(stats)),
            Err(e) => log::warn!("stats load failed: {e}"),
        }
    });
}

fn load_difficulty(state: RwSignal<ProblemsState>, period: StatsPeriod) {
    state.update(|s| s.select_period(period));
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::get_difficulty_stats(period).await {
            Ok(split) => state.update(|s| s.difficulty_loaded(split)),
            Err(e) => log::warn!("difficulty stats load failed: {e}"),
        }
    });
}

/// Calendar day part of an RFC 3339 timestamp.
#[must_use]
pub fn date_part(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

#[component]
pub fn ProblemsPage() -> impl IntoView {
    let state = RwSignal::new(ProblemsState::default());
    let delete_id = RwSignal::new(None::<i64>);

    state.update(ProblemsState::begin_load);
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::get_all_problems().await {
            Ok(items) => state.update(|s| s.loaded(items)),
            Err(e) => {
                log::warn!("problem list load failed: {e}");
                state.update(ProblemsState::load_failed);
            }
        }
    });
    #[cfg(feature = "hydrate")]
    refresh_stats(state);
    load_difficulty(state, StatsPeriod::Lifetime);

    let on_delete_confirm = Callback::new(move |id: i64| {
        delete_id.set(None);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_problem(id).await {
                Ok(_) => {
                    state.update(|s| s.deleted(id));
                    refresh_stats(state);
                    load_difficulty(state, state.with_untracked(|s| s.period));
                }
                Err(e) => state.update(|s| s.delete_failed(e.message_or(DELETE_FAILED))),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, DELETE_FAILED);
    });
    let on_delete_cancel = Callback::new(move |()| delete_id.set(None));

    view! {
        <div class="problems-page">
            <header class="dashboard__header">
                <h1 class="dashboard__title">"All Problems"</h1>
                <a class="btn" href="/">"Back to Dashboard"</a>
            </header>

            <Show when=move || state.with(|s| s.stats.is_some())>
                <div class="stats-strip">
                    {move || {
                        state
                            .get()
                            .stats
                            .map(|stats| {
                                stats_rows(&stats)
                                    .into_iter()
                                    .map(|(label, value)| {
                                        view! {
                                            <div class="stats-strip__item">
                                                <span class="stats-strip__value">{value}</span>
                                                <span class="stats-strip__label">{label}</span>
                                            </div>
                                        }
                                    })
                                    .collect_view()
                            })
                    }}
                </div>
            </Show>

            <div class="period-picker">
                {StatsPeriod::ALL
                    .into_iter()
                    .map(|period| {
                        view! {
                            <button
                                class=move || {
                                    if state.with(|s| s.period == period) { "btn btn--primary" } else { "btn" }
                                }
                                on:click=move |_| load_difficulty(state, period)
                            >
                                {period_label(period)}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="stats-strip">
                {move || {
                    state
                        .get()
                        .difficulty
                        .map(|split| {
                            difficulty_rows(&split)
                                .into_iter()
                                .map(|(label, value)| {
                                    view! {
                                        <div class="stats-strip__item">
                                            <span class="stats-strip__value">{value}</span>
                                            <span class="stats-strip__label">{label}</span>
                                        </div>
                                    }
                                })
                                .collect_view()
                        })
                }}
            </div>

            <Show when=move || state.with(|s| s.error.is_some())>
                <div class="error-banner">{move || state.get().error.unwrap_or_default()}</div>
            </Show>

            {move || {
                let current = state.get();
                if current.loading {
                    view! { <p class="dashboard__loading">"Loading problems..."</p> }.into_any()
                } else if current.items.is_empty() {
                    view! { <p class="empty-state">"No problems yet."</p> }.into_any()
                } else {
                    view! {
                        <table class="problems-table">
                            <thead>
                                <tr>
                                    <th>"Title"</th>
                                    <th>"Difficulty"</th>
                                    <th>"Solved"</th>
                                    <th>"Practice"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {current
                                    .items
                                    .into_iter()
                                    .map(|problem| view! { <ProblemRow problem=problem delete_id=delete_id/> })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                        .into_any()
                }
            }}

            <Show when=move || delete_id.get().is_some()>
                <DeleteProblemDialog
                    id=delete_id.get().unwrap_or_default()
                    on_confirm=on_delete_confirm
                    on_cancel=on_delete_cancel
                />
            </Show>
        </div>
    }
}

#[component]
fn ProblemRow(problem: Problem, delete_id: RwSignal<Option<i64>>) -> impl IntoView {
    let id = problem.id;
    let badge_style = format!("background-color: {}", difficulty_color(problem.difficulty.as_str()));
    let solved = date_part(&problem.solved_date).to_owned();

    view! {
        <tr>
            <td>
                <a href=problem.leetcode_url target="_blank" rel="noopener noreferrer">
                    {problem.title}
                </a>
            </td>
            <td>
                <span class="problem-card__badge" style=badge_style>
                    {problem.difficulty.badge()}
                </span>
            </td>
            <td>{solved}</td>
            <td>{practice_label(problem.practice_count)}</td>
            <td>
                <button class="btn btn--danger" on:click=move |_| delete_id.set(Some(id))>
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

/// Confirmation dialog for deleting a problem.
#[component]
fn DeleteProblemDialog(id: i64, on_confirm: Callback<i64>, on_cancel: Callback<()>) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Delete Problem"</h2>
                <p class="dialog__danger">"This removes the problem and its practice history."</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--danger" on:click=move |_| on_confirm.run(id)>
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}
