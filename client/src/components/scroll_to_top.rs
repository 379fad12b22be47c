//! Resets the scroll position on every route change.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::util::browser::scroll_to_top;

#[component]
pub fn ScrollToTop() -> impl IntoView {
    let location = use_location();
    Effect::new(move || {
        location.pathname.track();
        scroll_to_top();
    });
}
