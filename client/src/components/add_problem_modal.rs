//! Modal dialog for adding a problem by URL.
//!
//! DESIGN
//! ======
//! The dialog owns its field, error and loading flag. Closing is refused
//! while a request is in flight so a late response never lands on a
//! dismissed form.

#[cfg(test)]
#[path = "add_problem_modal_test.rs"]
mod add_problem_modal_test;

use leptos::prelude::*;

use crate::net::api::ApiError;
use crate::util::forms::{ADD_FAILED, submit_label};

/// Error text for a failed add.
#[must_use]
pub fn add_error_message(err: &ApiError) -> String {
    err.message_or(ADD_FAILED)
}

/// Local form state. Kept separate from the signals so the close and submit
/// rules can be checked directly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddForm {
    pub url: String,
    pub error: Option<String>,
    pub loading: bool,
}

impl AddForm {
    /// Start a submit. Returns `false` if one is already running.
    pub fn begin_submit(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.error = None;
        self.loading = true;
        true
    }

    pub fn succeeded(&mut self) {
        self.url.clear();
        self.loading = false;
    }

    pub fn failed(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }

    /// Reset for closing. Returns `false`, leaving the form untouched, while
    /// loading.
    pub fn close(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.url.clear();
        self.error = None;
        true
    }
}

#[component]
pub fn AddProblemModal(is_open: RwSignal<bool>, on_close: Callback<()>, on_success: Callback<()>) -> impl IntoView {
    let form = RwSignal::new(AddForm::default());

    let close = Callback::new(move |()| {
        let mut closed = false;
        form.update(|f| closed = f.close());
        if closed {
            on_close.run(());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut started = false;
        form.update(|f| started = f.begin_submit());
        if !started {
            return;
        }
        let url = form.get_untracked().url;

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::add_problem(&url, None).await {
                Ok(problem) => {
                    log::info!("added problem {}", problem.id);
                    form.update(AddForm::succeeded);
                    on_success.run(());
                    on_close.run(());
                }
                Err(e) => form.update(|f| f.failed(add_error_message(&e))),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (url, on_success);
    };

    view! {
        <Show when=move || is_open.get()>
            <div class="dialog-backdrop" on:click=move |_| close.run(())>
                <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                    <div class="dialog__header">
                        <h2>"Add Problem"</h2>
                        <button class="dialog__close" on:click=move |_| close.run(()) aria-label="Close">
                            "×"
                        </button>
                    </div>
                    <form on:submit=on_submit>
                        <label class="dialog__label">
                            "Leetcode URL"
                            <input
                                class="dialog__input"
                                type="url"
                                required
                                placeholder="https://leetcode.com/problems/two-sum/"
                                prop:value=move || form.get().url
                                on:input=move |ev| form.update(|f| f.url = event_target_value(&ev))
                                disabled=move || form.get().loading
                            />
                        </label>
                        <Show when=move || form.get().error.is_some()>
                            <p class="dialog__error">{move || form.get().error.unwrap_or_default()}</p>
                        </Show>
                        <div class="dialog__actions">
                            <button class="btn" type="button" on:click=move |_| close.run(())>
                                "Cancel"
                            </button>
                            <button class="btn btn--primary" type="submit" disabled=move || form.get().loading>
                                {move || submit_label(form.get().loading, "Add Problem", "Adding...")}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
