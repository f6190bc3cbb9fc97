//! Login page for username + password accounts.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::net::api::ApiError;
use crate::util::forms::{LOGIN_FAILED, check_login, submit_label};

#[must_use]
pub fn login_error_message(err: &ApiError) -> String {
    err.message_or(LOGIN_FAILED)
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let username_value = username.get().trim().to_owned();
        let password_value = password.get();
        if let Err(msg) = check_login(&username_value, &password_value) {
            error.set(Some(msg));
            return;
        }
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::login(&username_value, &password_value).await {
                Ok(resp) => {
                    log::info!("{}", resp.message);
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/");
                    }
                }
                Err(e) => {
                    error.set(Some(login_error_message(&e)));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"CodingFlashcard"</h1>
                <p class="auth-card__subtitle">"Sign in"</p>
                <Show when=move || error.with(Option::is_some)>
                    <p class="auth-card__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                        disabled=move || busy.get()
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                        disabled=move || busy.get()
                    />
                    <button class="btn btn--primary auth-button" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get(), "Login", "Logging in...")}
                    </button>
                </form>
                <a class="auth-card__link" href="/forgot-password">"Forgot password?"</a>
                <p class="auth-card__footer">
                    "No account? "
                    <a href="/register">"Register"</a>
                </p>
            </div>
        </div>
    }
}
