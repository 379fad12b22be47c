//! Auth-session state for the current browser visitor.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `AuthContext` exists per application. Route guards and the top bar read
//! `AuthState` through an `RwSignal` kept current by `subscribe`; the login
//! page and logout buttons call the context's operations directly.
//!
//! DESIGN
//! ======
//! Leptos context values must be `Send + Sync`, so the handle is an `Arc`
//! around a small mutex-guarded core. The lock is never held across an
//! `.await`, and listeners run after it is released.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::net::api::AccountsApi;
use crate::net::error::ApiError;
use crate::net::types::{AccountNotice, Credentials, LoginResponse, OtpVerification, PasswordReset, Registration};
use crate::state::session::{Session, SessionStore};
use crate::util::storage::{KeyValueStorage, StorageError};

/// Authentication status as seen by the view tree.
///
/// `is_loading` is true only until the first session check resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { is_authenticated: false, is_loading: true }
    }
}

impl AuthState {
    #[must_use]
    pub const fn resolved(is_authenticated: bool) -> Self {
        Self { is_authenticated, is_loading: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Network failure or backend rejection.
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Authentication failed: No access token received from server.")]
    MissingAccessToken,
    #[error("could not save session: {0}")]
    Storage(#[from] StorageError),
    #[error("Please sign in to continue.")]
    NotAuthenticated,
}

type Listener = Arc<dyn Fn(AuthState) + Send + Sync>;

struct AuthCore {
    state: AuthState,
    initialized: bool,
    listeners: Vec<Listener>,
}

struct AuthInner<S, A> {
    store: SessionStore<S>,
    api: A,
    core: Mutex<AuthCore>,
}

/// Shared handle on the session lifecycle. Clones refer to the same context.
pub struct AuthContext<S, A> {
    inner: Arc<AuthInner<S, A>>,
}

impl<S, A> Clone for AuthContext<S, A> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S: KeyValueStorage, A: AccountsApi> AuthContext<S, A> {
    pub fn new(store: SessionStore<S>, api: A) -> Self {
        let core = AuthCore { state: AuthState::default(), initialized: false, listeners: Vec::new() };
        Self { inner: Arc::new(AuthInner { store, api, core: Mutex::new(core) }) }
    }

    fn core(&self) -> MutexGuard<'_, AuthCore> {
        self.inner.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> AuthState {
        self.core().state
    }

    pub fn is_initialized(&self) -> bool {
        self.core().initialized
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.store.load()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.store.access_token()
    }

    /// Register a listener called with the new state after every change.
    pub fn subscribe(&self, listener: impl Fn(AuthState) + Send + Sync + 'static) {
        self.core().listeners.push(Arc::new(listener));
    }

    /// Apply `update` under the lock, then notify listeners if the state moved.
    fn transition(&self, update: impl FnOnce(&mut AuthCore)) -> AuthState {
        let (state, listeners) = {
            let mut core = self.core();
            let before = core.state;
            update(&mut core);
            let listeners = if core.state == before { Vec::new() } else { core.listeners.clone() };
            (core.state, listeners)
        };
        for listener in &listeners {
            listener(state);
        }
        state
    }

    /// Resolve the initial state from the persisted session.
    ///
    /// Only the first call has any effect; later calls return the current
    /// state unchanged.
    pub fn initialize(&self) -> AuthState {
        let present = self.inner.store.is_present();
        self.transition(|core| {
            if core.initialized {
                log::debug!("auth context already initialized");
                return;
            }
            core.initialized = true;
            core.state = AuthState::resolved(present);
        })
    }

    /// Re-read session presence after another tab changed storage.
    ///
    /// Ignored until `initialize` has run; never touches `is_loading`.
    pub fn sync_from_storage(&self) -> AuthState {
        let present = self.inner.store.is_present();
        self.transition(|core| {
            if core.initialized {
                core.state.is_authenticated = present;
            }
        })
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the user-facing reason when the backend rejects the
    /// credentials or the session cannot be stored. State is left unchanged.
    pub async fn login_with_credentials(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let credentials = Credentials { email: email.trim().to_owned(), password: password.to_owned() };
        let response = self.inner.api.login(&credentials).await;
        self.complete_login("credentials", response)
    }

    /// Sign in with a token issued by the OAuth provider.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login_with_credentials`].
    pub async fn login_with_oauth_token(&self, token: &str) -> Result<Session, AuthError> {
        let response = self.inner.api.google_login(token).await;
        self.complete_login("google", response)
    }

    /// Create an account. The visitor stays signed out until the emailed
    /// code is confirmed with [`Self::verify_otp`].
    ///
    /// # Errors
    ///
    /// Returns the backend's reason when the registration is rejected.
    pub async fn register(&self, registration: &Registration) -> Result<AccountNotice, AuthError> {
        let registration = Registration { email: registration.email.trim().to_owned(), ..registration.clone() };
        let notice = self.inner.api.register(&registration).await.inspect_err(|e| log::warn!("registration failed: {e}"))?;
        log::info!("registered {}, awaiting verification", registration.email);
        Ok(notice)
    }

    /// Confirm a new account and sign in with the session it returns.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login_with_credentials`].
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<Session, AuthError> {
        let verification = OtpVerification { email: email.trim().to_owned(), otp: otp.trim().to_owned() };
        let response = self.inner.api.verify_otp(&verification).await;
        self.complete_login("verification code", response)
    }

    /// Mail a fresh verification code.
    ///
    /// # Errors
    ///
    /// Returns the backend's reason when no code could be sent.
    pub async fn resend_otp(&self, email: &str) -> Result<AccountNotice, AuthError> {
        Ok(self.inner.api.resend_otp(email.trim()).await.inspect_err(|e| log::warn!("code resend failed: {e}"))?)
    }

    /// Mail a password reset code. Session state is untouched.
    ///
    /// # Errors
    ///
    /// Returns the backend's reason when no code could be sent.
    pub async fn request_password_reset(&self, email: &str) -> Result<AccountNotice, AuthError> {
        Ok(self.inner.api.forgot_password(email.trim()).await.inspect_err(|e| log::warn!("reset request failed: {e}"))?)
    }

    /// Set a new password with a reset code and sign in with the session it
    /// returns.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login_with_credentials`].
    pub async fn reset_password(&self, email: &str, otp: &str, new_password: &str) -> Result<Session, AuthError> {
        let reset =
            PasswordReset { email: email.trim().to_owned(), otp: otp.trim().to_owned(), new_password: new_password.to_owned() };
        let response = self.inner.api.reset_password(&reset).await;
        self.complete_login("password reset", response)
    }

    fn complete_login(&self, method: &str, response: Result<LoginResponse, ApiError>) -> Result<Session, AuthError> {
        let result = response
            .map_err(AuthError::from)
            .and_then(|resp| resp.into_session().ok_or(AuthError::MissingAccessToken))
            .and_then(|session| {
                self.inner.store.save(&session)?;
                Ok(session)
            });

        match &result {
            Ok(session) => {
                log::info!("signed in via {method} (role: {})", session.role);
                self.transition(|core| {
                    core.initialized = true;
                    core.state = AuthState::resolved(true);
                });
            }
            Err(AuthError::Storage(e)) => {
                log::error!("{method} sign-in succeeded but session was not stored: {e}");
                // A failed save wipes the keys; keep state honest about that.
                self.sync_from_storage();
            }
            Err(e) => log::warn!("{method} sign-in failed: {e}"),
        }
        result
    }

    /// Clear the session, then revoke the refresh token server-side.
    ///
    /// Revocation is best-effort: failures are logged and swallowed.
    pub async fn logout(&self) {
        let refresh = self.inner.store.refresh_token();
        self.end_session();
        log::info!("signed out");

        if let Some(refresh) = refresh {
            if let Err(e) = self.inner.api.logout(&refresh).await {
                log::warn!("server-side logout failed: {e}");
            }
        }
    }

    fn end_session(&self) {
        self.inner.store.clear();
        self.transition(|core| {
            core.initialized = true;
            core.state = AuthState::resolved(false);
        });
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Any failure forces re-authentication: the session is cleared and the
    /// visitor is signed out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` when there is no refresh token
    /// or the backend refuses it.
    pub async fn refresh_access(&self) -> Result<String, AuthError> {
        let Some(refresh) = self.inner.store.refresh_token() else {
            self.force_reauth("no refresh token");
            return Err(AuthError::NotAuthenticated);
        };

        match self.inner.api.refresh(&refresh).await {
            Ok(access) => {
                if let Err(e) = self.inner.store.replace_access_token(&access) {
                    self.force_reauth(&e.to_string());
                    return Err(e.into());
                }
                log::debug!("access token refreshed");
                Ok(access)
            }
            Err(e) => {
                self.force_reauth(&e.to_string());
                Err(AuthError::NotAuthenticated)
            }
        }
    }

    fn force_reauth(&self, reason: &str) {
        log::warn!("session expired, signing out: {reason}");
        self.end_session();
    }

    /// Run `call` with the current access token, refreshing once on 401.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` without a session, the refresh
    /// failure if the token cannot be renewed, or the call's own error.
    pub async fn authorized<T, F, Fut>(&self, call: F) -> Result<T, AuthError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let token = self.access_token().ok_or(AuthError::NotAuthenticated)?;
        match call(token).await {
            Err(e) if e.is_unauthorized() => {
                let fresh = self.refresh_access().await?;
                Ok(call(fresh).await?)
            }
            other => Ok(other?),
        }
    }
}
