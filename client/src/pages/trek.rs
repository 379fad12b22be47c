//! Trek overview with its route map (`/trek/:slug`).

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::fetch_status::fetch_view;
use crate::components::route_map::RouteMap;
use crate::hooks::{use_trek_itinerary, use_treks};
use crate::util::search::trek_subtitle;

#[component]
pub fn TrekPage() -> impl IntoView {
    let params = use_params_map();
    let slug = Memo::new(move |_| params.with(|p| p.get("slug").unwrap_or_default()));
    let treks = use_treks();
    let itinerary = use_trek_itinerary(move || slug.get());
    let waypoints = Signal::derive(move || itinerary.with(|i| i.data.as_ref().map(|days| days.waypoints()).unwrap_or_default()));

    view! {
        <section class="trek-page">
            {move || {
                let slug = slug.get();
                fetch_view(
                    treks.get(),
                    move |all| match all.into_iter().find(|t| t.slug == slug) {
                        Some(trek) => {
                            view! {
                                <header class="trek-page__header">
                                    <h1>{trek.name.clone()}</h1>
                                    <p class="trek-page__meta">{trek_subtitle(&trek)}</p>
                                </header>
                            }
                                .into_any()
                        }
                        None => view! { <p class="fetch-error">"We couldn't find that trek."</p> }.into_any(),
                    },
                )
            }}
            {move || {
                fetch_view(
                    itinerary.get(),
                    |days| {
                        view! {
                            <ol class="trek-page__itinerary">
                                {days
                                    .0
                                    .iter()
                                    .enumerate()
                                    .map(|(i, day)| view! { <li>{day.label(i)}</li> })
                                    .collect_view()}
                            </ol>
                        }
                            .into_any()
                    },
                )
            }}
            <RouteMap waypoints=waypoints/>
        </section>
    }
}
