//! Route guard for pages that need a session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs `GET /auth/user/` each time a guarded route mounts. Children render
//! only after the server confirms the session; a failed check replaces the
//! current history entry with `/login`.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::get_user_info().await {
            Ok(user) => auth.update(|a| a.signed_in(user)),
            Err(e) => {
                log::info!("session check failed: {e}");
                auth.update(AuthState::signed_out);
            }
        }
    });

    install_unauth_redirect(auth, use_navigate());

    view! {
        <Show
            when=move || auth.with(|a| !a.loading && a.user.is_some())
            fallback=|| view! { <div class="page-loading">"Loading..."</div> }
        >
            {children()}
        </Show>
    }
}
