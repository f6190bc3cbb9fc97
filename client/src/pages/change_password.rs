//! Change-password page for a signed-in user.
//!
//! The server ends every session on success, this one included, so the page
//! signs the local auth state out and returns to `/login` after a short pause.

use leptos::prelude::*;
use wire::ChangePasswordRequest;

use crate::state::auth::AuthState;
use crate::util::forms::{CHANGE_PASSWORD_FAILED, check_password_change, min_password_attr, submit_label};

/// Delay before leaving the page after a successful change.
pub const REDIRECT_DELAY_MS: u32 = 2_000;

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let current = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let message = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        message.set(None);

        let req = ChangePasswordRequest {
            current_password: current.get_untracked(),
            new_password: password.get_untracked(),
            new_password_confirm: confirm.get_untracked(),
        };
        if let Err(msg) = check_password_change(&req) {
            error.set(Some(msg));
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::change_password(&req).await {
                    Ok(resp) => {
                        message.set(Some(resp.message));
                        auth.update(AuthState::signed_out);
                        busy.set(false);
                        gloo_timers::future::TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                        navigate("/login", leptos_router::NavigateOptions::default());
                    }
                    Err(e) => {
                        error.set(Some(e.message_or(CHANGE_PASSWORD_FAILED)));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (req, auth, CHANGE_PASSWORD_FAILED);
    };

    let field = move |value: RwSignal<String>, placeholder: &'static str, minlength: Option<String>| {
        view! {
            <input
                class="auth-input"
                type="password"
                placeholder=placeholder
                required
                minlength=minlength
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                disabled=move || busy.get()
            />
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Change Password"</h1>
                <Show when=move || error.with(Option::is_some)>
                    <p class="auth-card__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || message.with(Option::is_some)>
                    <p class="auth-card__message">{move || message.get().unwrap_or_default()}</p>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    {field(current, "Current password", None)}
                    {field(password, "New password", Some(min_password_attr()))}
                    {field(confirm, "Confirm new password", Some(min_password_attr()))}
                    <button class="btn btn--primary auth-button" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get(), "Change Password", "Saving...")}
                    </button>
                </form>
                <a class="auth-card__link" href="/">"Back to Dashboard"</a>
            </div>
        </div>
    }
}
