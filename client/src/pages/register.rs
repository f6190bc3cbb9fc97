//! Registration page. A successful sign-up starts a session immediately.

use leptos::prelude::*;
use wire::RegisterRequest;

use crate::util::forms::{REGISTER_FAILED, check_registration, min_password_attr, submit_label};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let req = RegisterRequest {
            username: username.get().trim().to_owned(),
            email: email.get().trim().to_owned(),
            password: password.get(),
            password_confirm: confirm.get(),
        };
        if let Err(msg) = check_registration(&req) {
            error.set(Some(msg));
            return;
        }
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::register(&req).await {
                Ok(_) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/");
                    }
                }
                Err(e) => {
                    error.set(Some(e.message_or(REGISTER_FAILED)));
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (req, REGISTER_FAILED);
    };

    let field = move |label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <input
                class="auth-input"
                type=kind
                placeholder=label
                required
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                disabled=move || busy.get()
            />
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create Account"</h1>
                <Show when=move || error.with(Option::is_some)>
                    <p class="auth-card__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    {field("Username", "text", username)}
                    {field("Email", "email", email)}
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        required
                        minlength=min_password_attr()
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                        disabled=move || busy.get()
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Confirm password"
                        required
                        minlength=min_password_attr()
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                        disabled=move || busy.get()
                    />
                    <button class="btn btn--primary auth-button" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get(), "Register", "Creating account...")}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Already registered? "
                    <a href="/login">"Login"</a>
                </p>
            </div>
        </div>
    }
}
