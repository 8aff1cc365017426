use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use people_directory::notifications::{messages, RecordingNotifier, Severity};
use people_directory::providers::{Provider, ProviderError, ProviderResult};
use people_directory::storage::{FileStore, KeyValueStore, MemoryStore};
use people_directory::{
    Directory, DirectoryStore, Entry, EntryId, HydrationSource, SyncController, SyncState,
};

// ── Helpers ─────────────────────────────────────────────────────

struct StubProvider {
    people: Option<Vec<Entry>>,
    calls: AtomicUsize,
}

impl StubProvider {
    fn returning(people: Vec<Entry>) -> Arc<Self> {
        Arc::new(Self {
            people: Some(people),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            people: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_people(&self) -> ProviderResult<Vec<Entry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.people
            .clone()
            .ok_or_else(|| ProviderError::Network("connection refused".into()))
    }
}

fn leanne() -> Entry {
    Entry {
        id: "1".into(),
        name: "Leanne Graham".into(),
        email: "Sincere@april.biz".into(),
    }
}

fn controller(
    storage: Arc<MemoryStore>,
    provider: Arc<StubProvider>,
    notifier: Arc<RecordingNotifier>,
) -> SyncController {
    let store = DirectoryStore::new(storage, provider, "users");
    SyncController::new(store, notifier)
}

fn stored(storage: &MemoryStore) -> Directory {
    let raw = storage.get("users").unwrap().expect("users key present");
    serde_json::from_str(&raw).unwrap()
}

// ── Hydration paths ─────────────────────────────────────────────

#[tokio::test]
async fn fresh_start_fetches_and_caches() {
    let storage = Arc::new(MemoryStore::new());
    let provider = StubProvider::returning(vec![leanne()]);
    let notifier = Arc::new(RecordingNotifier::new());

    let controller = controller(storage.clone(), provider.clone(), notifier.clone());
    let loading = controller.loading();
    assert!(*loading.borrow());

    let session = controller.initialize().await;

    assert_eq!(session.source(), HydrationSource::Network);
    assert_eq!(session.entries(), [leanne()]);
    assert_eq!(stored(&storage), Directory::from_entries(vec![leanne()]));
    assert!(!*loading.borrow());
    assert_eq!(provider.calls(), 1);
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn cached_entries_skip_the_network() {
    let storage = Arc::new(MemoryStore::with_value(
        "users",
        r#"[{"id":"x","name":"Bob","email":"bob@example.com"}]"#,
    ));
    let provider = StubProvider::returning(vec![leanne()]);
    let notifier = Arc::new(RecordingNotifier::new());

    let session = controller(storage.clone(), provider.clone(), notifier)
        .initialize()
        .await;

    assert_eq!(session.source(), HydrationSource::Cache);
    assert_eq!(session.entries().len(), 1);
    assert_eq!(session.entries()[0].name, "Bob");
    assert_eq!(provider.calls(), 0);
    assert_eq!(storage.writes(), 0);
}

#[tokio::test]
async fn empty_cache_falls_back_to_network_once() {
    let storage = Arc::new(MemoryStore::with_value("users", "[]"));
    let provider = StubProvider::returning(vec![leanne()]);
    let notifier = Arc::new(RecordingNotifier::new());

    let mut controller = controller(storage.clone(), provider.clone(), notifier);
    assert_eq!(controller.step().await, SyncState::ReadingCache);
    assert_eq!(controller.step().await, SyncState::Fetching);
    assert_eq!(
        controller.step().await,
        SyncState::Ready(HydrationSource::Network)
    );
    // Ready is terminal.
    assert_eq!(
        controller.step().await,
        SyncState::Ready(HydrationSource::Network)
    );

    let loading = controller.loading();
    let session = controller.initialize().await;
    assert!(!*loading.borrow());
    assert_eq!(provider.calls(), 1);
    assert_eq!(session.entries(), [leanne()]);
    assert_eq!(stored(&storage).len(), 1);
}

#[tokio::test]
async fn malformed_cache_falls_back_to_network() {
    let storage = Arc::new(MemoryStore::with_value("users", "{ definitely not a list"));
    let provider = StubProvider::returning(vec![leanne()]);

    let session = controller(storage, provider.clone(), Arc::new(RecordingNotifier::new()))
        .initialize()
        .await;

    assert_eq!(provider.calls(), 1);
    assert_eq!(session.source(), HydrationSource::Network);
}

#[tokio::test]
async fn network_failure_degrades_to_empty() {
    let storage = Arc::new(MemoryStore::new());
    let provider = StubProvider::failing();
    let notifier = Arc::new(RecordingNotifier::new());

    let controller = controller(storage.clone(), provider.clone(), notifier.clone());
    let loading = controller.loading();
    let session = controller.initialize().await;

    assert_eq!(session.source(), HydrationSource::Degraded);
    assert!(session.entries().is_empty());
    assert!(!*loading.borrow());
    assert_eq!(provider.calls(), 1);
    assert_eq!(storage.writes(), 0);

    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
    assert_eq!(notices[0].message, messages::SERVER_UNREACHABLE);
}

#[tokio::test]
async fn failed_cache_write_still_serves_fetched_entries() {
    let storage = Arc::new(MemoryStore::new());
    storage.set_fail_writes(true);
    let notifier = Arc::new(RecordingNotifier::new());

    let session = controller(
        storage.clone(),
        StubProvider::returning(vec![leanne()]),
        notifier.clone(),
    )
    .initialize()
    .await;

    assert_eq!(session.entries(), [leanne()]);
    assert!(!storage.contains("users").unwrap());
    assert_eq!(notifier.count(Severity::Error), 1);
}

// ── Intents ─────────────────────────────────────────────────────

#[tokio::test]
async fn add_then_remove_round_trips_through_storage() {
    let storage = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let mut session = controller(
        storage.clone(),
        StubProvider::returning(vec![]),
        notifier.clone(),
    )
    .initialize()
    .await;
    assert!(session.entries().is_empty());

    let ada = session.request_add("Ada").unwrap();
    assert_eq!(ada.name, "Ada");
    assert_eq!(ada.email, "ada@example.com");
    assert_eq!(stored(&storage).entries(), [ada.clone()]);

    let removed = session.request_remove(&ada.id).unwrap();
    assert_eq!(removed, ada);
    assert!(session.entries().is_empty());
    assert!(stored(&storage).is_empty());

    let notices = notifier.notices();
    assert_eq!(notices.last().unwrap().message, "Ada removed");
    assert_eq!(notices.last().unwrap().severity, Severity::Info);
}

#[tokio::test]
async fn blank_name_is_rejected_without_writing() {
    let storage = Arc::new(MemoryStore::with_value(
        "users",
        r#"[{"id":"x","name":"Bob","email":"bob@example.com"}]"#,
    ));
    let notifier = Arc::new(RecordingNotifier::new());
    let mut session = controller(
        storage.clone(),
        StubProvider::failing(),
        notifier.clone(),
    )
    .initialize()
    .await;

    assert!(session.request_add("").is_none());
    assert!(session.request_add("   ").is_none());
    assert_eq!(session.entries().len(), 1);
    assert_eq!(storage.writes(), 0);
    assert_eq!(notifier.count(Severity::Error), 2);
    assert_eq!(notifier.notices()[0].message, messages::EMPTY_NAME);
}

#[tokio::test]
async fn removing_unknown_id_is_quiet() {
    let storage = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let mut session = controller(
        storage,
        StubProvider::returning(vec![leanne()]),
        notifier.clone(),
    )
    .initialize()
    .await;

    assert!(session.request_remove(&EntryId::new("missing")).is_none());
    assert_eq!(session.entries().len(), 1);
    assert!(notifier.notices().is_empty());
}

// ── File store end to end ───────────────────────────────────────

#[tokio::test]
async fn second_run_reads_what_the_first_wrote() {
    let dir = tempfile::tempdir().unwrap();

    let first = StubProvider::returning(vec![leanne()]);
    let store = DirectoryStore::new(Arc::new(FileStore::new(dir.path())), first, "users");
    let mut session = SyncController::new(store, Arc::new(RecordingNotifier::new()))
        .initialize()
        .await;
    let ada = session.request_add("Ada").unwrap();

    let second = StubProvider::failing();
    let store = DirectoryStore::new(
        Arc::new(FileStore::new(dir.path())),
        second.clone(),
        "users",
    );
    let session = SyncController::new(store, Arc::new(RecordingNotifier::new()))
        .initialize()
        .await;

    assert_eq!(session.source(), HydrationSource::Cache);
    assert_eq!(second.calls(), 0);
    assert_eq!(session.entries(), [leanne(), ada]);
}
