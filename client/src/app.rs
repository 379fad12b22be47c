//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the one auth context for the page and mirrors its state into
//! an `RwSignal<AuthState>` so views re-render on sign-in and sign-out. The
//! session check runs only in the browser; SSR always renders the loading
//! state, which keeps server output and first hydration identical.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::protected_route::ProtectedRoute;
use crate::components::scroll_to_top::ScrollToTop;
use crate::components::top_bar::TopBar;
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::pages::{
    account::{ForgotPasswordPage, RegisterPage},
    blog::BlogListPage, blog_post::BlogPostPage, booking::BookingPage, home::HomePage, login::LoginPage,
    search::{RegionPage, SearchPage}, trek::TrekPage,
};
use crate::state::AppAuth;
use crate::state::auth::{AuthContext, AuthState};
use crate::state::session::SessionStore;
use crate::util::google::GIS_SCRIPT_URL;
use crate::util::storage::LocalStorage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <script src=GIS_SCRIPT_URL defer></script>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let api = ApiClient::from_config(&config);
    let auth: AppAuth = AuthContext::new(SessionStore::new(LocalStorage), api.clone());

    let auth_state = RwSignal::new(AuthState::default());
    auth.subscribe(move |state| {
        // The signal may already be disposed when a late listener fires.
        auth_state.try_set(state);
    });

    provide_context(config);
    provide_context(api);
    provide_context(auth.clone());
    provide_context(auth_state);

    Effect::new(move || {
        auth_state.set(auth.initialize());
        #[cfg(feature = "hydrate")]
        crate::util::auth::install_storage_sync(auth.clone());
    });

    let protected_booking = || {
        view! {
            <ProtectedRoute>
                <BookingPage/>
            </ProtectedRoute>
        }
    };

    view! {
        <Stylesheet id="leptos" href="/pkg/evertrek.css"/>
        <Title text="EverTrek"/>

        <Router>
            <ScrollToTop/>
            <TopBar/>
            <main class="page">
                <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                    <Route path=StaticSegment("blog") view=BlogListPage/>
                    <Route path=(StaticSegment("blog"), ParamSegment("slug")) view=BlogPostPage/>
                    <Route path=StaticSegment("search") view=SearchPage/>
                    <Route path=(StaticSegment("region"), ParamSegment("slug")) view=RegionPage/>
                    <Route path=(StaticSegment("trek"), ParamSegment("slug")) view=TrekPage/>
                    <Route path=(StaticSegment("booking"), ParamSegment("reference")) view=protected_booking/>
                </Routes>
            </main>
        </Router>
    }
}
