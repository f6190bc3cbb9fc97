//! Forgot-password page: asks the server to email a reset link.
//!
//! The server answers the same way whether or not the address is known, so
//! the page just echoes its message.

use leptos::prelude::*;

use crate::util::forms::{RESET_REQUEST_FAILED, submit_label};

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let message = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        if email_value.is_empty() {
            error.set(Some("Please enter your email address.".to_owned()));
            return;
        }
        error.set(None);
        message.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::request_password_reset(&email_value).await {
                Ok(resp) => {
                    message.set(Some(resp.message));
                    email.set(String::new());
                }
                Err(e) => error.set(Some(e.message_or(RESET_REQUEST_FAILED))),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (email_value, RESET_REQUEST_FAILED);
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Forgot Password"</h1>
                <p class="auth-card__subtitle">"Enter your email and we'll send you a reset link."</p>
                <Show when=move || error.with(Option::is_some)>
                    <p class="auth-card__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || message.with(Option::is_some)>
                    <p class="auth-card__message">{move || message.get().unwrap_or_default()}</p>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                        disabled=move || busy.get()
                    />
                    <button class="btn btn--primary auth-button" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get(), "Send Reset Link", "Sending...")}
                    </button>
                </form>
                <a class="auth-card__link" href="/login">"Back to Login"</a>
            </div>
        </div>
    }
}
