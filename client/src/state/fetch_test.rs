use std::sync::Mutex;

use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

use super::*;
use crate::net::api::BlogQuery;

type Reply = Result<String, String>;

/// Shared state standing in for the hook's signal.
#[derive(Clone, Default)]
struct SharedState(Arc<Mutex<FetchState<String>>>);

impl FetchSink<String> for SharedState {
    fn apply(&self, change: impl FnOnce(&mut FetchState<String>)) {
        change(&mut self.0.lock().unwrap());
    }
}

/// Drives `run_fetch` the way the hook does, on a local executor, with
/// replies resolved by hand.
struct Harness {
    pool: LocalPool,
    guard: FetchGuard,
    state: SharedState,
    successes: Arc<Mutex<Vec<String>>>,
}

impl Harness {
    fn new() -> Self {
        Self {
            pool: LocalPool::new(),
            guard: FetchGuard::new(),
            state: SharedState::default(),
            successes: Arc::default(),
        }
    }

    /// Run one fetch cycle for `params`; the returned sender resolves it.
    fn request(&mut self, params: &BlogQuery) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel::<Reply>();
        self.run(Some(params.clone()), rx);
        tx
    }

    /// Run a cycle with no parameters.
    fn clear(&mut self) {
        let (_tx, rx) = oneshot::channel::<Reply>();
        self.run(None, rx);
    }

    fn run(&mut self, params: Option<BlogQuery>, rx: oneshot::Receiver<Reply>) {
        let spawner = self.pool.spawner();
        let successes = Arc::clone(&self.successes);
        run_fetch(
            &self.guard,
            self.state.clone(),
            params,
            move |query: BlogQuery| async move {
                let reply = rx.await.unwrap_or_else(|_| Err("dropped".to_owned()));
                reply.map(|body| format!("{}:{}={body}", query.category, query.page))
            },
            move |query: BlogQuery, _: &String| successes.lock().unwrap().push(format!("{}:{}", query.category, query.page)),
            |task| spawner.spawn_local(task).unwrap(),
        );
        self.pool.run_until_stalled();
    }

    fn resolve(&mut self, tx: oneshot::Sender<Reply>, reply: Reply) {
        tx.send(reply).unwrap();
        self.pool.run_until_stalled();
    }

    fn snapshot(&self) -> FetchState<String> {
        self.state.0.lock().unwrap().clone()
    }

    fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }
}

#[test]
fn default_state_is_loading() {
    let state = FetchState::<u8>::default();
    assert!(state.loading);
    assert_eq!(state.data, None);
    assert_eq!(state.error, None);
}

#[test]
fn settle_sets_exactly_one_terminal_condition() {
    let mut state = FetchState::default();
    state.settle(Ok(5));
    assert_eq!(state, FetchState { data: Some(5), loading: false, error: None });

    state.start();
    assert_eq!(state, FetchState { data: None, loading: true, error: None });

    state.settle(Err("boom".to_owned()));
    assert_eq!(state, FetchState { data: None, loading: false, error: Some("boom".to_owned()) });
}

#[test]
fn newer_ticket_invalidates_older() {
    let guard = FetchGuard::new();
    let first = guard.begin();
    assert!(guard.is_current(first));
    let second = guard.begin();
    assert!(!guard.is_current(first));
    assert!(guard.is_current(second));
}

#[test]
fn teardown_invalidates_current_ticket() {
    let guard = FetchGuard::new();
    let ticket = guard.begin();
    guard.clone().teardown();
    assert!(!guard.is_alive());
    assert!(!guard.is_current(ticket));
}

#[test]
fn success_is_applied_for_current_params() {
    let mut h = Harness::new();
    let tx = h.request(&BlogQuery::new("all", 1));
    assert!(h.snapshot().loading);

    h.resolve(tx, Ok("posts".to_owned()));
    assert_eq!(h.snapshot(), FetchState { data: Some("all:1=posts".to_owned()), loading: false, error: None });
}

#[test]
fn failure_sets_error_message() {
    let mut h = Harness::new();
    let tx = h.request(&BlogQuery::new("all", 1));
    h.resolve(tx, Err("Failed to load blog posts".to_owned()));
    assert_eq!(
        h.snapshot(),
        FetchState { data: None, loading: false, error: Some("Failed to load blog posts".to_owned()) }
    );
}

#[test]
fn category_switch_before_first_resolves_keeps_only_latest() {
    let mut h = Harness::new();
    let all = h.request(&BlogQuery::new("all", 1));
    let gear = h.request(&BlogQuery::new("gear", 1));

    h.resolve(gear, Ok("gear-posts".to_owned()));
    h.resolve(all, Ok("all-posts".to_owned()));

    assert_eq!(h.snapshot().data.as_deref(), Some("gear:1=gear-posts"));
    assert!(!h.snapshot().loading);
}

#[test]
fn stale_result_arriving_first_is_ignored() {
    let mut h = Harness::new();
    let all = h.request(&BlogQuery::new("all", 1));
    let gear = h.request(&BlogQuery::new("gear", 1));

    h.resolve(all, Ok("all-posts".to_owned()));
    assert_eq!(h.snapshot(), FetchState { data: None, loading: true, error: None });

    h.resolve(gear, Err("offline".to_owned()));
    assert_eq!(h.snapshot().error.as_deref(), Some("offline"));
    assert_eq!(h.snapshot().data, None);
}

#[test]
fn only_latest_of_many_param_changes_is_observable() {
    let mut h = Harness::new();
    let pending: Vec<_> = (1..=5).map(|page| h.request(&BlogQuery::new("all", page))).collect();

    // Resolve in reverse, so every stale reply lands after the current one.
    for (i, tx) in pending.into_iter().enumerate().rev() {
        h.resolve(tx, Ok(format!("reply-{i}")));
        assert_eq!(h.snapshot().data.as_deref(), Some("all:5=reply-4"));
    }
}

#[test]
fn no_update_after_teardown() {
    let mut h = Harness::new();
    let tx = h.request(&BlogQuery::new("all", 1));
    h.guard.teardown();
    h.resolve(tx, Ok("late".to_owned()));
    assert_eq!(h.snapshot(), FetchState { data: None, loading: true, error: None });
}

#[test]
fn settle_if_current_reports_whether_applied() {
    let guard = FetchGuard::new();
    let stale = guard.begin();
    let current = guard.begin();

    let applied = futures::executor::block_on(settle_if_current(
        &guard,
        stale,
        async { Ok::<_, String>(1) },
        |_| panic!("stale outcome applied"),
    ));
    assert!(!applied);

    let mut seen = None;
    let applied = futures::executor::block_on(settle_if_current(
        &guard,
        current,
        async { Err::<u8, _>("nope") },
        |outcome| seen = Some(outcome),
    ));
    assert!(applied);
    assert_eq!(seen, Some(Err("nope".to_owned())));
}

#[test]
fn no_params_goes_idle_and_drops_in_flight_result() {
    let mut h = Harness::new();
    let tx = h.request(&BlogQuery::new("all", 1));
    h.clear();
    assert_eq!(h.snapshot(), FetchState::idle());

    h.resolve(tx, Ok("late".to_owned()));
    assert_eq!(h.snapshot(), FetchState::idle());
    assert!(h.successes().is_empty());
}

#[test]
fn params_after_idle_fetch_again() {
    let mut h = Harness::new();
    h.clear();
    let tx = h.request(&BlogQuery::new("gear", 2));
    assert!(h.snapshot().loading);
    h.resolve(tx, Ok("posts".to_owned()));
    assert_eq!(h.snapshot().data.as_deref(), Some("gear:2=posts"));
}

#[test]
fn success_hook_fires_only_for_applied_results() {
    let mut h = Harness::new();
    let first = h.request(&BlogQuery::new("a", 1));
    let second = h.request(&BlogQuery::new("b", 1));

    h.resolve(first, Ok("stale".to_owned()));
    assert!(h.successes().is_empty());

    h.resolve(second, Ok("fresh".to_owned()));
    assert_eq!(h.successes(), vec!["b:1".to_owned()]);
}

#[test]
fn success_hook_skips_failures_and_teardown() {
    let mut h = Harness::new();
    let failed = h.request(&BlogQuery::new("a", 1));
    h.resolve(failed, Err("404".to_owned()));
    assert!(h.successes().is_empty());

    let late = h.request(&BlogQuery::new("a", 1));
    h.guard.teardown();
    h.resolve(late, Ok("post".to_owned()));
    assert!(h.successes().is_empty());
}
