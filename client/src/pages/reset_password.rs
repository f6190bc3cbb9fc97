//! Password reset page reached from the emailed link.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token comes from the `/reset-password/:token` route. A matching pair
//! of passwords is sent with it; on success the page waits two seconds and
//! returns to `/login`.

#[cfg(test)]
#[path = "reset_password_test.rs"]
mod reset_password_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::net::api::ApiError;
use crate::util::forms::{RESET_FAILED, RESET_SUCCESS, check_new_password, min_password_attr, submit_label};

/// Delay before leaving the page after a successful reset.
pub const REDIRECT_DELAY_MS: u32 = 2_000;

#[must_use]
pub fn reset_error_message(err: &ApiError) -> String {
    err.message_or(RESET_FAILED)
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let params = use_params_map();
    let token = move || params.read().get("token").unwrap_or_default();

    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let message = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        error.set(None);
        message.set(None);

        let new_password = password.get_untracked();
        let new_confirm = confirm.get_untracked();
        if let Err(msg) = check_new_password(&new_password, &new_confirm) {
            error.set(Some(msg));
            return;
        }
        loading.set(true);
        let token_value = token();

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::confirm_password_reset(&token_value, &new_password, &new_confirm).await {
                    Ok(_) => {
                        message.set(Some(RESET_SUCCESS.to_owned()));
                        loading.set(false);
                        gloo_timers::future::TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                        navigate("/login", leptos_router::NavigateOptions::default());
                    }
                    Err(e) => {
                        error.set(Some(reset_error_message(&e)));
                        loading.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = token_value;
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Reset Password"</h1>
                <Show when=move || error.with(Option::is_some)>
                    <p class="auth-card__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || message.with(Option::is_some)>
                    <p class="auth-card__message">{move || message.get().unwrap_or_default()}</p>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="New password"
                        required
                        minlength=min_password_attr()
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                        disabled=move || loading.get()
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Confirm new password"
                        required
                        minlength=min_password_attr()
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                        disabled=move || loading.get()
                    />
                    <button class="btn btn--primary auth-button" type="submit" disabled=move || loading.get()>
                        {move || submit_label(loading.get(), "Reset Password", "Resetting...")}
                    </button>
                </form>
                <a class="auth-card__link" href="/login">"Back to Login"</a>
            </div>
        </div>
    }
}
