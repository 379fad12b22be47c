//! Login page: email + password, or Google sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached directly or via the route guard with `?next=<path>`. Once the auth
//! context reports a signed-in visitor the page replaces itself with `next`
//! (or `/`), which also covers visitors who arrive already signed in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::spinner::LoadingOverlay;
use crate::config::ClientConfig;
use crate::state::AppAuth;
use crate::state::auth::AuthState;
use crate::util::auth::safe_next_path;
use crate::util::google::GOOGLE_BUTTON_ID;

/// `local@domain.tld` shape check; the backend does the real validation.
pub fn is_valid_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'))
}

/// Check the credential form before any request is made.
///
/// Returns the trimmed email on success.
pub fn validate_credentials(email: &str, password: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Please enter your email address.");
    }
    if !is_valid_email(email) {
        return Err("Please enter a valid email address.");
    }
    if password.is_empty() {
        return Err("Please enter your password.");
    }
    Ok(email.to_owned())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AppAuth>();
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();
    let query = use_query_map();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let next = Memo::new(move |_| query.with(|q| safe_next_path(q.get("next").as_deref())));

    Effect::new(move || {
        let state = auth_state.get();
        if !state.is_loading && state.is_authenticated {
            navigate(&next.get_untracked(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let credentials_auth = auth.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let email_value = match validate_credentials(&email.get_untracked(), &password.get_untracked()) {
            Ok(value) => value,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        let auth = credentials_auth.clone();
        let password_value = password.get_untracked();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Err(e) = auth.login_with_credentials(&email_value, &password_value).await {
                error.set(Some(e.to_string()));
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (auth, email_value, password_value);
    };

    let google_enabled = config.google_client_id.is_some();
    #[cfg(feature = "hydrate")]
    {
        if let Some(client_id) = config.google_client_id {
            install_google_button(client_id, auth, busy, error);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = auth;

    view! {
        <LoadingOverlay visible=busy message="Signing you in…"/>
        <div class="login-page">
            <div class="login-card">
                <h1>"Welcome back"</h1>
                <p class="login-card__subtitle">"Sign in to manage your bookings"</p>
                <form class="login-form" on:submit=on_submit novalidate>
                    <input
                        class="login-input"
                        type="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <p class="login-links">
                    <a href="/forgot-password">"Forgot password?"</a>
                    " · "
                    <a href="/register">"Create an account"</a>
                </p>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error" role="alert">
                        {move || error.get().unwrap_or_default()}
                    </p>
                </Show>
                <Show when=move || google_enabled>
                    <div class="login-divider"></div>
                    <p class="login-card__subtitle">"Or"</p>
                    <div id=GOOGLE_BUTTON_ID class="login-google"></div>
                </Show>
            </div>
        </div>
    }
}

/// Render the Google button once the GIS script has loaded.
#[cfg(feature = "hydrate")]
fn install_google_button(client_id: String, auth: AppAuth, busy: RwSignal<bool>, error: RwSignal<Option<String>>) {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    const ATTEMPTS: u32 = 40;
    const RETRY_MS: u32 = 250;

    let alive = Arc::new(AtomicBool::new(true));
    let alive_task = alive.clone();
    on_cleanup(move || alive.store(false, Ordering::Relaxed));

    leptos::task::spawn_local(async move {
        for _ in 0..ATTEMPTS {
            gloo_timers::future::TimeoutFuture::new(RETRY_MS).await;
            if !alive_task.load(Ordering::Relaxed) {
                return;
            }
            let auth = auth.clone();
            let on_credential = move |token: String| {
                let auth = auth.clone();
                busy.set(true);
                leptos::task::spawn_local(async move {
                    if let Err(e) = auth.login_with_oauth_token(&token).await {
                        error.try_set(Some(e.to_string()));
                    }
                    busy.try_set(false);
                });
            };
            match crate::util::google::render_google_button(&client_id, on_credential) {
                Ok(()) => return,
                Err(reason) => log::debug!("google sign-in not ready: {reason}"),
            }
        }
        log::warn!("Google sign-in unavailable: script never loaded");
    });
}
