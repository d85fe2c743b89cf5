//! Shared world state for draft reconciliation BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskdesk::{
    draft::{
        adapters::memory::{InMemoryDraftService, InMemoryLocalDraftStore},
        ports::{DiscardPrompt, PromptKind},
        services::{DraftReconciler, LoadSource},
    },
    task::{
        adapters::memory::InMemoryTaskGateway, domain::CreatedTask, services::TaskServiceError,
    },
};

/// Reconciler type used by the BDD world.
pub type TestReconciler =
    DraftReconciler<InMemoryLocalDraftStore, InMemoryDraftService, InMemoryTaskGateway, DefaultClock>;

/// Prompt answering with a fixed reply and counting how often it was asked.
#[derive(Debug, Default)]
pub struct CountingPrompt {
    pub answer: bool,
    pub asked: std::sync::atomic::AtomicUsize,
}

impl DiscardPrompt for CountingPrompt {
    fn confirm(&self, _kind: PromptKind) -> bool {
        self.asked
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.answer
    }
}

/// Scenario world for draft reconciliation behaviour tests.
pub struct DraftWorld {
    pub store: Arc<InMemoryLocalDraftStore>,
    pub drafts: Arc<InMemoryDraftService>,
    pub tasks: Arc<InMemoryTaskGateway>,
    pub reconciler: TestReconciler,
    pub prompt: Option<CountingPrompt>,
    pub last_create_result: Option<Result<CreatedTask, TaskServiceError>>,
    pub last_load_source: Option<LoadSource>,
}

impl DraftWorld {
    /// Creates a world over fresh in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryLocalDraftStore::new());
        let drafts = Arc::new(InMemoryDraftService::new());
        let tasks = Arc::new(InMemoryTaskGateway::new());
        let reconciler = Self::open(&store, &drafts, &tasks);
        Self {
            store,
            drafts,
            tasks,
            reconciler,
            prompt: None,
            last_create_result: None,
            last_load_source: None,
        }
    }

    /// Builds a reconciler over the given adapters.
    pub fn open(
        store: &Arc<InMemoryLocalDraftStore>,
        drafts: &Arc<InMemoryDraftService>,
        tasks: &Arc<InMemoryTaskGateway>,
    ) -> TestReconciler {
        DraftReconciler::new(
            Arc::clone(store),
            Arc::clone(drafts),
            Arc::clone(tasks),
            Arc::new(DefaultClock),
        )
    }
}

impl Default for DraftWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DraftWorld {
    DraftWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
