//! Integration tests for the todo reducer running inside a Store
//!
//! These cover the full loop: command → reducer → seed effect → feedback.

use futures::future::BoxFuture;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use venus_runtime::Store;
use venus_todo::{
    HttpSeedSource, ItemId, SeedError, SeedRecord, SeedSource, SeedStatus, TodoAction,
    TodoEnvironment, TodoReducer, TodoState, TodoStore,
};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

fn records(n: u64) -> Vec<SeedRecord> {
    (1..=n)
        .map(|id| SeedRecord {
            id,
            name: format!("comment {id}"),
        })
        .collect()
}

/// Answers immediately with fixed records, or with a transport failure
struct ReadySeed(Option<Vec<SeedRecord>>);

impl SeedSource for ReadySeed {
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<SeedRecord>, SeedError>> {
        let result = self
            .0
            .clone()
            .ok_or_else(|| SeedError::Transport("network unreachable".to_string()));
        Box::pin(async move { result })
    }
}

/// Holds the response until the test releases it
struct GatedSeed {
    gate: Mutex<Option<oneshot::Receiver<Vec<SeedRecord>>>>,
}

impl GatedSeed {
    fn new() -> (Self, oneshot::Sender<Vec<SeedRecord>>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                gate: Mutex::new(Some(rx)),
            },
            tx,
        )
    }
}

impl SeedSource for GatedSeed {
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<SeedRecord>, SeedError>> {
        let rx = self.gate.lock().unwrap().take();
        Box::pin(async move {
            match rx {
                Some(rx) => rx
                    .await
                    .map_err(|_| SeedError::Transport("gate dropped".to_string())),
                None => Err(SeedError::Transport("fetched twice".to_string())),
            }
        })
    }
}

fn store_with(source: impl SeedSource + 'static) -> TodoStore {
    venus_testing::init_test_tracing();
    let env = TodoEnvironment::new(Arc::new(source));
    Store::new(TodoState::new(), TodoReducer::new(), env)
}

fn add(text: &str) -> TodoAction {
    TodoAction::AddItem {
        text: text.to_string(),
    }
}

#[tokio::test]
async fn test_manual_flow_without_seed() {
    let store = store_with(ReadySeed(Some(Vec::new())));

    store.send(add("Buy milk")).await.unwrap();
    store.send(add("   ")).await.unwrap();
    store.send(add("Walk dog")).await.unwrap();
    store
        .send(TodoAction::ToggleItem { id: ItemId::new(1) })
        .await
        .unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.seed, SeedStatus::Idle);

    let counts = state.counts();
    assert_eq!(counts.total, 2);
    assert_eq!(counts.active, 1);
    assert_eq!(counts.completed, 1);
}

#[tokio::test]
async fn test_seed_success_populates_list() {
    let store = store_with(ReadySeed(Some(records(5))));

    let mut handle = store.send(TodoAction::StartSeed).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.seed, SeedStatus::Populated);
    assert_eq!(state.items.len(), 5);
    assert!(state.items.iter().all(|i| !i.completed));
    assert_eq!(state.items[4].text, "comment 5");
}

#[tokio::test]
async fn test_seed_failure_keeps_list_and_reports() {
    let store = store_with(ReadySeed(None));

    store.send(add("Buy milk")).await.unwrap();
    let mut handle = store.send(TodoAction::StartSeed).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.items.len(), 1);
    assert_eq!(
        state.seed.error(),
        Some("Failed to load todos: request failed: network unreachable")
    );

    // Still fully usable afterwards
    store.send(add("Walk dog")).await.unwrap();
    assert_eq!(store.state(|s| s.items.len()).await, 2);
}

#[tokio::test]
async fn test_commands_during_loading_are_replaced_by_seed() {
    let (source, release) = GatedSeed::new();
    let store = store_with(source);

    let mut handle = store.send(TodoAction::StartSeed).await.unwrap();
    assert!(store.state(|s| s.seed.is_loading()).await);

    // Manual use is not blocked while the fetch is in flight
    store.send(add("typed while loading")).await.unwrap();
    assert_eq!(store.state(|s| s.items.len()).await, 1);

    release.send(records(3)).unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.seed, SeedStatus::Populated);
    assert_eq!(state.items.len(), 3);
    assert!(state.items.iter().all(|i| i.text != "typed while loading"));
}

#[tokio::test]
async fn test_seed_ids_never_collide_with_user_ids() {
    let (source, release) = GatedSeed::new();
    let store = store_with(source);

    let mut handle = store.send(TodoAction::StartSeed).await.unwrap();
    store.send(add("first")).await.unwrap();
    release.send(records(3)).unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    store.send(add("after seed")).await.unwrap();

    let state = store.state(Clone::clone).await;
    let mut ids: Vec<u64> = state.items.iter().map(|i| i.id.value()).collect();
    let len = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), len);

    // Acting on the user item touches only that item
    let id = state.items.last().unwrap().id;
    store.send(TodoAction::ToggleItem { id }).await.unwrap();
    let completed = store
        .state(|s| s.items.iter().filter(|i| i.completed).count())
        .await;
    assert_eq!(completed, 1);
}

#[tokio::test]
async fn test_start_seed_twice_fetches_once() {
    let (source, release) = GatedSeed::new();
    let store = store_with(source);

    let mut first = store.send(TodoAction::StartSeed).await.unwrap();
    let second = store.send(TodoAction::StartSeed).await.unwrap();
    assert_eq!(second.pending(), 0);

    release.send(records(2)).unwrap();
    first.wait_with_timeout(WAIT).await.unwrap();

    // A second fetch would have failed with "fetched twice"
    assert_eq!(store.state(|s| s.seed.clone()).await, SeedStatus::Populated);
}

#[tokio::test]
async fn test_seed_result_is_broadcast_after_apply() {
    let store = store_with(ReadySeed(Some(records(2))));
    let mut rx = store.subscribe_actions();

    store.send(TodoAction::StartSeed).await.unwrap();
    let action = tokio::time::timeout(WAIT, rx.recv()).await.unwrap().unwrap();

    assert!(matches!(action, TodoAction::SeedLoaded { .. }));
    assert_eq!(store.state(|s| s.items.len()).await, 2);
}

#[tokio::test]
async fn test_http_seed_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"postId": 1, "id": 1, "name": "alpha", "email": "a@example.com", "body": "..."},
            {"postId": 1, "id": 2, "name": "beta", "email": "b@example.com", "body": "..."}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_with(HttpSeedSource::new(format!("{}/comments", server.uri())));
    let mut handle = store.send(TodoAction::StartSeed).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let texts = store
        .state(|s| s.items.iter().map(|i| i.text.clone()).collect::<Vec<_>>())
        .await;
    assert_eq!(texts, vec!["alpha", "beta"]);
}

#[tokio::test]
async fn test_http_seed_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = store_with(HttpSeedSource::new(server.uri()));
    let mut handle = store.send(TodoAction::StartSeed).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let seed = store.state(|s| s.seed.clone()).await;
    assert_eq!(
        seed.error(),
        Some("Failed to load todos: unexpected response status 503")
    );
}
