//! Parameterised data-fetching hooks.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call one hook per resource and render its `FetchState`. Every hook is
//! `use_fetch` with a different backend call; parameter tracking, stale-result
//! suppression and teardown handling live there once.
//!
//! DESIGN
//! ======
//! Parameters are a reactive closure memoised into a `Memo`, so a hook refetches
//! exactly when its inputs change value. Requests are spawned on the browser
//! event loop; SSR renders the initial loading state and never fetches.

use std::fmt::Display;
use std::future::Future;

use leptos::prelude::*;

use crate::net::api::{ApiClient, BlogQuery};
use crate::net::types::{BlogCategory, BlogPage, BlogPost, BookingDetail, Itinerary, Trek};
use crate::state::AppAuth;
use crate::state::fetch::{FetchGuard, FetchSink, FetchState, FetchTask, run_fetch};

/// Track `params` and expose the latest matching result of `fetcher`.
///
/// `params` returning `None` means "nothing to fetch": the state goes idle and
/// any request still in flight is ignored.
pub fn use_fetch<P, T, E, F, Fut>(
    params: impl Fn() -> Option<P> + Send + Sync + 'static,
    fetcher: F,
) -> ReadSignal<FetchState<T>>
where
    P: Clone + PartialEq + Send + Sync + 'static,
    T: Send + Sync + 'static,
    E: Display + 'static,
    F: Fn(P) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    use_fetch_then(params, fetcher, |_: P, _: &T| {})
}

/// `use_fetch`, plus `on_success` for each result that is actually applied.
/// Results for superseded parameters or a torn-down hook never reach it.
pub fn use_fetch_then<P, T, E, F, Fut, G>(
    params: impl Fn() -> Option<P> + Send + Sync + 'static,
    fetcher: F,
    on_success: G,
) -> ReadSignal<FetchState<T>>
where
    P: Clone + PartialEq + Send + Sync + 'static,
    T: Send + Sync + 'static,
    E: Display + 'static,
    F: Fn(P) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
    G: Fn(P, &T) + Clone + 'static,
{
    let state = RwSignal::new(FetchState::<T>::default());
    let guard = FetchGuard::new();
    let params = Memo::new(move |_| params());

    let teardown = guard.clone();
    on_cleanup(move || teardown.teardown());

    Effect::new(move |_| {
        run_fetch(&guard, state, params.get(), &fetcher, on_success.clone(), spawn_task);
    });

    state.read_only()
}

impl<T: Send + Sync + 'static> FetchSink<T> for RwSignal<FetchState<T>> {
    fn apply(&self, change: impl FnOnce(&mut FetchState<T>)) {
        // The signal may already be disposed when a late result lands.
        self.try_update(change);
    }
}

#[cfg(feature = "hydrate")]
fn spawn_task(task: FetchTask) {
    leptos::task::spawn_local(task);
}

/// SSR renders the loading state and never fetches.
#[cfg(not(feature = "hydrate"))]
fn spawn_task(_task: FetchTask) {}

/// One page of blog posts for a category.
pub fn use_blog_posts(query: impl Fn() -> BlogQuery + Send + Sync + 'static) -> ReadSignal<FetchState<BlogPage>> {
    let api = expect_context::<ApiClient>();
    use_fetch(
        move || Some(query()),
        move |query: BlogQuery| {
            let api = api.clone();
            async move { api.fetch_blog_posts(&query).await }
        },
    )
}

/// A single post; counts a view once it is shown. An empty slug fetches
/// nothing.
pub fn use_blog_post(slug: impl Fn() -> String + Send + Sync + 'static) -> ReadSignal<FetchState<BlogPost>> {
    let api = expect_context::<ApiClient>();
    let counter = api.clone();
    use_fetch_then(
        move || Some(slug()).filter(|s| !s.trim().is_empty()),
        move |slug: String| {
            let api = api.clone();
            async move { api.fetch_blog_post(&slug).await }
        },
        move |slug: String, _: &BlogPost| {
            let api = counter.clone();
            spawn_task(Box::pin(async move { api.increment_post_views(&slug).await }));
        },
    )
}

/// The trek catalogue used by search and preloading.
pub fn use_treks() -> ReadSignal<FetchState<Vec<Trek>>> {
    let api = expect_context::<ApiClient>();
    use_fetch(
        || Some(()),
        move |()| {
            let api = api.clone();
            async move { api.fetch_treks().await }
        },
    )
}

/// Blog categories for the filter bar.
pub fn use_blog_categories() -> ReadSignal<FetchState<Vec<BlogCategory>>> {
    let api = expect_context::<ApiClient>();
    use_fetch(
        || Some(()),
        move |()| {
            let api = api.clone();
            async move { api.fetch_blog_categories().await }
        },
    )
}

/// Day-by-day itinerary of a trek. An empty slug fetches nothing.
pub fn use_trek_itinerary(slug: impl Fn() -> String + Send + Sync + 'static) -> ReadSignal<FetchState<Itinerary>> {
    let api = expect_context::<ApiClient>();
    use_fetch(
        move || Some(slug()).filter(|s| !s.trim().is_empty()),
        move |slug: String| {
            let api = api.clone();
            async move { api.fetch_trek_itinerary(&slug).await }
        },
    )
}

/// Booking detail for the signed-in visitor; refreshes the token once on 401.
pub fn use_booking(booking_ref: impl Fn() -> String + Send + Sync + 'static) -> ReadSignal<FetchState<BookingDetail>> {
    let api = expect_context::<ApiClient>();
    let auth = expect_context::<AppAuth>();
    use_fetch(
        move || Some(booking_ref()).filter(|r| !r.trim().is_empty()),
        move |booking_ref: String| {
            let api = api.clone();
            let auth = auth.clone();
            async move {
                auth.authorized(|token| {
                    let api = api.clone();
                    let booking_ref = booking_ref.clone();
                    async move { api.fetch_booking(&booking_ref, &token).await }
                })
                .await
            }
        },
    )
}
