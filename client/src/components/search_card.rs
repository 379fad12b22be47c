//! Search box with live suggestions.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::Trek;
use crate::util::search::{DEFAULT_SUGGESTION_LIMIT, Suggestion, suggestions};

/// Search input over `treks`. Submitting goes to the search page.
#[component]
pub fn SearchCard(#[prop(into)] treks: Signal<Vec<Trek>>, #[prop(optional, into)] initial: String) -> impl IntoView {
    let term = RwSignal::new(initial);
    let focused = RwSignal::new(false);
    let navigate = use_navigate();

    let matches = Memo::new(move |_| suggestions(&treks.get(), &term.get(), DEFAULT_SUGGESTION_LIMIT));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let query = term.get_untracked().trim().to_owned();
        let href = if query.is_empty() { "/search".to_owned() } else { format!("/search?q={}", urlencoding::encode(&query)) };
        focused.set(false);
        navigate(&href, NavigateOptions::default());
    };

    view! {
        <form class="search-card" role="search" on:submit=on_submit>
            <input
                class="search-card__input"
                type="search"
                placeholder="Search treks, regions or difficulty"
                prop:value=move || term.get()
                on:input=move |ev| term.set(event_target_value(&ev))
                on:focus=move |_| focused.set(true)
            />
            <button class="search-card__submit" type="submit">
                "Search"
            </button>
            <Show when=move || focused.get() && !matches.get().is_empty()>
                <ul class="search-card__suggestions">
                    <For
                        each=move || matches.get()
                        key=|s: &Suggestion| s.id.clone()
                        children=move |s: Suggestion| {
                            view! {
                                <li class=format!("search-card__suggestion search-card__suggestion--{}", s.kind.label())>
                                    <a href=s.url on:click=move |_| focused.set(false)>
                                        <span class="search-card__text">{s.text}</span>
                                        <span class="search-card__subtitle">{s.subtitle}</span>
                                    </a>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </form>
    }
}
