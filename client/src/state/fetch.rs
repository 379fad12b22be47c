//! Parameter-keyed async fetch state.
//!
//! DESIGN
//! ======
//! Every fetch is stamped with a `FetchTicket` from its hook's `FetchGuard`.
//! Starting a new fetch or tearing the hook down invalidates older tickets,
//! and results are applied only while their ticket is still current. The
//! network call itself is never cancelled; its result is simply dropped.
//!
//! `run_fetch` is the whole per-parameter cycle of a hook. It writes through a
//! `FetchSink` and hands its task to a caller-supplied spawner, so the hooks
//! run it on the browser event loop and tests run it on a local executor.

#[cfg(test)]
#[path = "fetch_test.rs"]
mod fetch_test;

use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Observable state of one hook instance.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    /// A hook starts out loading, before its first request is even issued.
    fn default() -> Self {
        Self { data: None, loading: true, error: None }
    }
}

impl<T> FetchState<T> {
    /// Nothing requested and nothing to show.
    #[must_use]
    pub fn idle() -> Self {
        Self { data: None, loading: false, error: None }
    }

    /// Enter loading for a new parameter set; old data and errors go away.
    pub fn start(&mut self) {
        self.data = None;
        self.error = None;
        self.loading = true;
    }

    pub fn settle(&mut self, outcome: Result<T, String>) {
        match outcome {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(message) => {
                self.data = None;
                self.error = Some(message);
            }
        }
        self.loading = false;
    }
}

/// Identifies one fetch issued by a `FetchGuard`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Generation counter plus liveness flag for one hook instance.
#[derive(Clone, Debug)]
pub struct FetchGuard {
    generation: Arc<AtomicU64>,
    alive: Arc<AtomicBool>,
}

impl Default for FetchGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchGuard {
    #[must_use]
    pub fn new() -> Self {
        Self { generation: Arc::new(AtomicU64::new(0)), alive: Arc::new(AtomicBool::new(true)) }
    }

    /// Issue a ticket for a new fetch, invalidating every earlier ticket.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.is_alive() && self.generation.load(Ordering::SeqCst) == ticket.0
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// The consumer is gone; no ticket is current from now on.
    pub fn teardown(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

/// Await `request` and pass its outcome to `apply` only if `ticket` is still
/// current. Returns whether the outcome was applied.
pub async fn settle_if_current<T, E, Fut>(
    guard: &FetchGuard,
    ticket: FetchTicket,
    request: Fut,
    apply: impl FnOnce(Result<T, String>),
) -> bool
where
    E: Display,
    Fut: Future<Output = Result<T, E>>,
{
    let outcome = request.await.map_err(|e| e.to_string());
    if !guard.is_current(ticket) {
        log::debug!("discarding stale fetch result");
        return false;
    }
    apply(outcome);
    true
}

/// Where a hook's `FetchState` lives.
pub trait FetchSink<T>: Clone + 'static {
    /// Mutate the state; a sink whose owner is gone ignores the call.
    fn apply(&self, change: impl FnOnce(&mut FetchState<T>));
}

/// Task handed to the spawner by `run_fetch`.
pub type FetchTask = Pin<Box<dyn Future<Output = ()>>>;

/// Run one fetch cycle for `params`.
///
/// `None` sets the state idle and invalidates any request in flight.
/// Otherwise the state enters loading and the request is spawned; its outcome
/// is applied, and `on_success` called, only while the ticket is current.
pub fn run_fetch<P, T, E, Fut, S>(
    guard: &FetchGuard,
    sink: S,
    params: Option<P>,
    fetcher: impl FnOnce(P) -> Fut,
    on_success: impl FnOnce(P, &T) + 'static,
    spawn: impl FnOnce(FetchTask),
) where
    P: Clone + 'static,
    T: 'static,
    E: Display + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
    S: FetchSink<T>,
{
    let ticket = guard.begin();
    let Some(params) = params else {
        sink.apply(|state| *state = FetchState::idle());
        return;
    };
    sink.apply(FetchState::start);

    let request = fetcher(params.clone());
    let guard = guard.clone();
    spawn(Box::pin(async move {
        settle_if_current(&guard, ticket, request, move |outcome| {
            if let Ok(data) = &outcome {
                on_success(params, data);
            }
            sink.apply(|state| state.settle(outcome));
        })
        .await;
    }));
}
