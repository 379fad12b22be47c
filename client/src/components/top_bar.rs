//! Site header: brand, navigation menus and the auth-aware account button.

use leptos::prelude::*;

use crate::components::nav_dropdown::{NavDropdown, REGION_MENU, TRAVEL_INFO_MENU};
use crate::state::AppAuth;
use crate::state::auth::AuthState;

#[component]
pub fn TopBar() -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let auth = expect_context::<AppAuth>();
    let signing_out = RwSignal::new(false);

    let on_logout = move |_| {
        if signing_out.get_untracked() {
            return;
        }
        signing_out.set(true);
        let auth = auth.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            auth.logout().await;
            signing_out.set(false);
            crate::util::browser::hard_navigate("/");
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = auth;
    };

    view! {
        <header class="top-bar">
            <a class="top-bar__brand" href="/">
                "EverTrek"
            </a>
            <nav class="top-bar__nav">
                <NavDropdown label="Regions" items=REGION_MENU/>
                <NavDropdown label="Travel Info" items=TRAVEL_INFO_MENU/>
                <a class="top-bar__link" href="/search">
                    "Search"
                </a>
            </nav>
            <div class="top-bar__account">
                {move || {
                    let state = auth_state.get();
                    if state.is_loading {
                        view! { <span class="top-bar__placeholder"></span> }.into_any()
                    } else if state.is_authenticated {
                        view! {
                            <button class="top-bar__button" disabled=move || signing_out.get() on:click=on_logout.clone()>
                                "Log out"
                            </button>
                        }
                            .into_any()
                    } else {
                        view! {
                            <a class="top-bar__button" href="/login">
                                "Log in"
                            </a>
                        }
                            .into_any()
                    }
                }}
            </div>
        </header>
    }
}
