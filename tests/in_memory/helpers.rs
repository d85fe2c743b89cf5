//! Shared helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskdesk::{
    draft::{
        adapters::memory::{InMemoryDraftService, InMemoryLocalDraftStore},
        domain::{DraftForm, TextField},
        ports::{DiscardPrompt, PromptKind},
        services::DraftReconciler,
    },
    task::adapters::memory::InMemoryTaskGateway,
};

/// Reconciler wired to in-memory adapters.
pub type TestReconciler =
    DraftReconciler<InMemoryLocalDraftStore, InMemoryDraftService, InMemoryTaskGateway, DefaultClock>;

/// A reconciler together with the adapters behind it.
pub struct Workspace {
    pub store: Arc<InMemoryLocalDraftStore>,
    pub drafts: Arc<InMemoryDraftService>,
    pub tasks: Arc<InMemoryTaskGateway>,
    pub reconciler: Arc<TestReconciler>,
}

impl Workspace {
    /// Opens a second view on the same adapters, as a reload would.
    #[must_use]
    pub fn reopen(&self) -> TestReconciler {
        DraftReconciler::new(
            Arc::clone(&self.store),
            Arc::clone(&self.drafts),
            Arc::clone(&self.tasks),
            Arc::new(DefaultClock),
        )
    }

    /// Fills both required fields.
    pub fn fill(&self, project: &str, task: &str) {
        self.reconciler.edit(|form| {
            form.set_text(TextField::ProjectName, project);
            form.set_text(TextField::TaskName, task);
        });
    }
}

/// Provides a fresh workspace for each test.
#[fixture]
pub fn workspace() -> Workspace {
    let store = Arc::new(InMemoryLocalDraftStore::new());
    let drafts = Arc::new(InMemoryDraftService::new());
    let tasks = Arc::new(InMemoryTaskGateway::new());
    let reconciler = Arc::new(DraftReconciler::new(
        Arc::clone(&store),
        Arc::clone(&drafts),
        Arc::clone(&tasks),
        Arc::new(DefaultClock),
    ));
    Workspace {
        store,
        drafts,
        tasks,
        reconciler,
    }
}

/// Builds a form with the required fields set.
#[must_use]
pub fn complete_form(project: &str, task: &str) -> DraftForm {
    DraftForm::new()
        .with_text(TextField::ProjectName, project)
        .with_text(TextField::TaskName, task)
}

/// Prompt answering every question the same way and recording what it was
/// asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answer: bool,
    asked: std::sync::Mutex<Vec<PromptKind>>,
}

impl ScriptedPrompt {
    /// Creates a prompt that always answers `answer`.
    #[must_use]
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: std::sync::Mutex::default(),
        }
    }

    /// Returns the questions asked so far.
    #[must_use]
    pub fn asked(&self) -> Vec<PromptKind> {
        self.asked
            .lock()
            .map(|asked| asked.clone())
            .unwrap_or_default()
    }
}

impl DiscardPrompt for ScriptedPrompt {
    fn confirm(&self, kind: PromptKind) -> bool {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(kind);
        }
        self.answer
    }
}
