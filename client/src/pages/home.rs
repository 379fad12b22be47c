//! Landing page: hero search and featured treks.

use leptos::prelude::*;

use crate::components::fetch_status::fetch_view;
use crate::components::search_card::SearchCard;
use crate::hooks::use_treks;
use crate::util::search::trek_subtitle;

const FEATURED_COUNT: usize = 6;

#[component]
pub fn HomePage() -> impl IntoView {
    let treks = use_treks();
    let catalogue = Signal::derive(move || treks.with(|t| t.data.clone().unwrap_or_default()));

    view! {
        <section class="home-hero">
            <h1>"Walk the Himalaya with local guides"</h1>
            <p class="home-hero__lead">"Small groups, fair wages, unforgettable trails."</p>
            <SearchCard treks=catalogue/>
        </section>
        <section class="home-featured">
            <h2>"Featured treks"</h2>
            {move || {
                fetch_view(
                    treks.get(),
                    |all| {
                        view! {
                            <div class="home-featured__grid">
                                {all
                                    .into_iter()
                                    .take(FEATURED_COUNT)
                                    .map(|trek| {
                                        let subtitle = trek_subtitle(&trek);
                                        view! {
                                            <a class="trek-card" href=format!("/trek/{}", trek.slug)>
                                                <h3>{trek.name}</h3>
                                                <p>{subtitle}</p>
                                            </a>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                            .into_any()
                    },
                )
            }}
        </section>
    }
}
