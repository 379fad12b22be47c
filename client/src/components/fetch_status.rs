//! Shared rendering of a hook's `FetchState`.

use leptos::prelude::*;

use crate::components::spinner::Spinner;
use crate::state::fetch::FetchState;

/// Spinner while loading, the error message on failure, otherwise `render`.
pub fn fetch_view<T>(state: FetchState<T>, render: impl FnOnce(T) -> AnyView) -> AnyView {
    match state {
        FetchState { loading: true, .. } => view! { <Spinner/> }.into_any(),
        FetchState { error: Some(message), .. } => view! {
            <p class="fetch-error" role="alert">
                {message}
            </p>
        }
        .into_any(),
        FetchState { data: Some(data), .. } => render(data),
        FetchState { .. } => ().into_any(),
    }
}
