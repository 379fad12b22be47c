//! Loading indicators.

use leptos::prelude::*;

/// Inline spinner with an optional caption.
#[component]
pub fn Spinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="spinner" role="status" aria-live="polite">
            <span class="spinner__ring"></span>
            {label.map(|text| view! { <span class="spinner__label">{text}</span> })}
        </div>
    }
}

/// Neutral placeholder shown while the session check is still running.
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <Spinner/>
        </div>
    }
}

/// Full-screen overlay blocking input during sign-in.
#[component]
pub fn LoadingOverlay(#[prop(into)] visible: Signal<bool>, #[prop(into)] message: String) -> impl IntoView {
    view! {
        <Show when=move || visible.get()>
            <div class="loading-overlay" aria-busy="true">
                <div class="loading-overlay__card">
                    <Spinner label=message.clone()/>
                </div>
            </div>
        </Show>
    }
}
