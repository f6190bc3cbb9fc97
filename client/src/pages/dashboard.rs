//! Dashboard page listing today's practice problems.
//!
//! SYSTEM CONTEXT
//! ==============
//! The authenticated landing route. It loads the user and the practice list
//! on mount, groups entries by the category the server assigned, and removes
//! a card locally once the server accepts "done".

use leptos::prelude::*;

use crate::components::add_problem_modal::AddProblemModal;
use crate::components::problem_card::ProblemCard;
use crate::state::auth::AuthState;
use crate::state::practice::PracticeState;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let practice = RwSignal::new(PracticeState::default());
    let show_add = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        let navigate = leptos_router::hooks::use_navigate();
        leptos::task::spawn_local(async move {
            match crate::net::api::get_user_info().await {
                Ok(user) => auth.update(|a| a.signed_in(user)),
                Err(e) => {
                    log::info!("dashboard user load failed: {e}");
                    auth.update(AuthState::signed_out);
                    navigate("/login", leptos_router::NavigateOptions::default());
                }
            }
        });
    }

    let load = move || {
        practice.update(PracticeState::begin_load);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::get_practice_problems().await {
                Ok(items) => practice.update(|s| s.loaded(items)),
                Err(e) => {
                    log::warn!("practice load failed: {e}");
                    practice.update(PracticeState::load_failed);
                }
            }
        });
    };
    load();

    let on_mark_done = Callback::new(move |id: i64| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::mark_as_done(id).await {
                Ok(_) => practice.update(|s| {
                    s.remove(id);
                }),
                Err(e) => {
                    log::warn!("mark done failed for {id}: {e}");
                    practice.update(PracticeState::mark_done_failed);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    });

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::net::api::logout().await {
                log::warn!("logout failed: {e}");
            }
            auth.update(AuthState::signed_out);
            if let Some(w) = web_sys::window() {
                let _ = w.location().set_href("/login");
            }
        });
    };

    let on_close = Callback::new(move |()| show_add.set(false));
    let on_success = Callback::new(move |()| load());

    let username = move || auth.with(|a| a.username().unwrap_or_default().to_owned());

    view! {
        <Show
            when=move || auth.with(|a| !(a.loading && a.user.is_none()))
            fallback=|| view! { <div class="page-loading">"Loading..."</div> }
        >
            <div class="dashboard">
                <header class="dashboard__header">
                    <h1 class="dashboard__title">"CodingFlashcard"</h1>
                    <div class="dashboard__actions">
                        <button class="btn btn--primary" on:click=move |_| show_add.set(true)>
                            "Add Problem"
                        </button>
                        <a class="btn" href="/problems">"All Problems"</a>
                        <a class="btn" href="/change-password">"Change Password"</a>
                        <span class="dashboard__user">{username}</span>
                        <button class="btn" on:click=on_logout>"Logout"</button>
                    </div>
                </header>

                <Show when=move || practice.with(|s| s.error.is_some())>
                    <div class="error-banner">{move || practice.get().error.unwrap_or_default()}</div>
                </Show>

                {move || {
                    let state = practice.get();
                    if state.loading {
                        view! { <p class="dashboard__loading">"Loading problems..."</p> }.into_any()
                    } else if state.is_empty() {
                        view! {
                            <div class="empty-state">
                                <p>"No problems to practice today!"</p>
                                <button class="btn btn--primary" on:click=move |_| show_add.set(true)>
                                    "Add Your First Problem"
                                </button>
                            </div>
                        }
                            .into_any()
                    } else {
                        state
                            .grouped()
                            .into_iter()
                            .map(|(category, items)| {
                                view! {
                                    <section class="category">
                                        <h2 class="category__title">{category}</h2>
                                        <div class="category__cards">
                                            {items
                                                .into_iter()
                                                .map(|item| {
                                                    view! {
                                                        <ProblemCard
                                                            problem=item.problem
                                                            solved_recently=item.solved_recently
                                                            on_mark_done=on_mark_done
                                                        />
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </section>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                }}

                <AddProblemModal is_open=show_add on_close=on_close on_success=on_success/>
            </div>
        </Show>
    }
}
