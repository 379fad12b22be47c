//! Trek listings: free-text search (`/search?q=&difficulty=`) and per-region
//! pages (`/region/:slug`).

use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};

use crate::components::fetch_status::fetch_view;
use crate::components::search_card::SearchCard;
use crate::hooks::use_treks;
use crate::net::types::Trek;
use crate::util::search::{filter_treks, trek_subtitle, treks_in_region};

#[component]
pub fn SearchPage() -> impl IntoView {
    let query_map = use_query_map();
    let term = Memo::new(move |_| query_map.with(|q| q.get("q").unwrap_or_default()));
    let difficulty = Memo::new(move |_| query_map.with(|q| q.get("difficulty")));
    let treks = use_treks();
    let catalogue = Signal::derive(move || treks.with(|t| t.data.clone().unwrap_or_default()));

    view! {
        <section class="search-page">
            <SearchCard treks=catalogue initial=term.get_untracked()/>
            {move || {
                fetch_view(
                    treks.get(),
                    move |all: Vec<Trek>| {
                        let found: Vec<Trek> =
                            filter_treks(&all, &term.get(), difficulty.get().as_deref()).into_iter().cloned().collect();
                        if found.is_empty() {
                            return view! { <p class="search-page__empty">"No treks match your search."</p> }.into_any();
                        }
                        trek_list(found)
                    },
                )
            }}
        </section>
    }
}

#[component]
pub fn RegionPage() -> impl IntoView {
    let params = use_params_map();
    let slug = Memo::new(move |_| params.with(|p| p.get("slug").unwrap_or_default()));
    let treks = use_treks();

    view! {
        <section class="search-page">
            {move || {
                let slug = slug.get();
                fetch_view(
                    treks.get(),
                    move |all: Vec<Trek>| {
                        let found: Vec<Trek> = treks_in_region(&all, &slug).into_iter().cloned().collect();
                        let title = found
                            .first()
                            .and_then(|t| t.region.clone())
                            .unwrap_or_else(|| "Region".to_owned());
                        view! {
                            <h1>{title}</h1>
                            {if found.is_empty() {
                                view! { <p class="search-page__empty">"No treks listed in this region yet."</p> }.into_any()
                            } else {
                                trek_list(found)
                            }}
                        }
                            .into_any()
                    },
                )
            }}
        </section>
    }
}

fn trek_list(found: Vec<Trek>) -> AnyView {
    view! {
        <p class="search-page__count">{format!("{} treks found", found.len())}</p>
        <ul class="search-page__results">
            {found
                .into_iter()
                .map(|trek| {
                    let subtitle = trek_subtitle(&trek);
                    view! {
                        <li class="search-result">
                            <a href=format!("/trek/{}", trek.slug)>{trek.name}</a>
                            <span class="search-result__meta">{subtitle}</span>
                            {trek.difficulty.map(|d| view! { <span class="search-result__difficulty">{d}</span> })}
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_any()
}
