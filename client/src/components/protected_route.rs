//! Route guard for views that need a signed-in visitor.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps the view of a protected route. While the session check is pending it
//! shows a neutral loading screen; afterwards it either renders its children
//! or replaces the location with the login page, carrying the requested path
//! and query in `next`.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::components::spinner::LoadingScreen;
use crate::state::auth::AuthState;
use crate::util::auth::{GuardDecision, guard_decision, requested_location};

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();

    let decision = Memo::new(move |_| {
        let requested = requested_location(&location.pathname.get(), &location.search.get());
        guard_decision(auth.get(), &requested)
    });

    move || match decision.get() {
        GuardDecision::Pending => view! { <LoadingScreen/> }.into_any(),
        GuardDecision::Redirect(path) => {
            log::debug!("redirecting unauthenticated visitor to {path}");
            let options = NavigateOptions { replace: true, ..NavigateOptions::default() };
            view! { <Redirect path=path options=options/> }.into_any()
        }
        GuardDecision::Allow => children().into_any(),
    }
}
