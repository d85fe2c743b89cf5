//! Async orchestration of the draft lifecycle.

use super::{AssignTaskSession, DraftState, DraftSyncClient, SaveApplied, SaveTicket, SyncOutcome};
use crate::{
    draft::{
        domain::{DraftForm, DraftId},
        ports::{DiscardPrompt, DraftService, DraftServiceError, LocalDraftStore, PromptKind},
    },
    task::{
        domain::CreatedTask,
        ports::TaskGateway,
        services::{TaskServiceResult, TaskSubmissionService},
    },
};
use mockable::Clock;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Where the draft shown on mount came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// The remote service's latest draft.
    Remote(DraftId),
    /// The local snapshot, used when the service had nothing or failed.
    Local,
    /// Nothing was stored anywhere.
    Empty,
}

impl LoadSource {
    /// Returns the notice shown after loading, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Remote(_) => Some("Draft loaded from server"),
            Self::Local => Some("Local draft loaded"),
            Self::Empty => None,
        }
    }
}

/// Result of a timer-driven save. Failures are never surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutosaveOutcome {
    /// Nothing needed pushing.
    Idle,
    /// The form reached the remote service.
    Saved(SyncOutcome),
    /// A newer save or a reset overtook this one.
    Superseded,
    /// The remote push failed; the form is kept locally.
    Deferred,
}

/// Result of an explicit "save as draft".
#[derive(Debug, Clone)]
pub enum DraftSaveOutcome {
    /// The form reached the remote service.
    Saved(SyncOutcome),
    /// The form only holds defaults.
    NothingToSave,
    /// This save reached the service, but a newer save or a reset
    /// overtook it.
    Superseded,
    /// This save's own remote push failed; the form is kept locally.
    SavedLocally(DraftServiceError),
}

impl DraftSaveOutcome {
    /// Produces the message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Saved(_) | Self::Superseded => "Draft saved successfully".to_owned(),
            Self::NothingToSave => "Nothing to save".to_owned(),
            Self::SavedLocally(err) => err.user_message(),
        }
    }
}

/// Result of "clear form".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The form was reset.
    Cleared,
    /// The user declined to discard the form.
    Cancelled,
}

/// Result of closing the assign-task view.
#[derive(Debug, Clone)]
pub enum CloseOutcome {
    /// Nothing was unsaved; the local snapshot was flushed.
    Closed,
    /// The user chose to save first.
    SavedAndClosed(DraftSaveOutcome),
    /// The user chose not to save; unsaved changes were dropped.
    Discarded,
}

/// Drives an [`AssignTaskSession`] against the remote services.
///
/// The session sits behind a mutex that is never held across an await, so
/// autosave ticks and user actions interleave freely; save tokens keep the
/// outcome ordered.
pub struct DraftReconciler<L, D, G, C>
where
    L: LocalDraftStore,
    D: DraftService,
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    session: Mutex<AssignTaskSession<L, C>>,
    drafts: DraftSyncClient<D>,
    tasks: TaskSubmissionService<G>,
}

impl<L, D, G, C> DraftReconciler<L, D, G, C>
where
    L: LocalDraftStore,
    D: DraftService,
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    /// Creates a reconciler with an empty session.
    #[must_use]
    pub fn new(store: Arc<L>, drafts: Arc<D>, tasks: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            session: Mutex::new(AssignTaskSession::new(store, clock)),
            drafts: DraftSyncClient::new(drafts),
            tasks: TaskSubmissionService::new(tasks),
        }
    }

    fn session(&self) -> MutexGuard<'_, AssignTaskSession<L, C>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the persistence state.
    #[must_use]
    pub fn state(&self) -> DraftState {
        self.session().state()
    }

    /// Returns a copy of the current form.
    #[must_use]
    pub fn form(&self) -> DraftForm {
        self.session().form().clone()
    }

    /// Returns the tracked remote draft id.
    #[must_use]
    pub fn draft_id(&self) -> Option<DraftId> {
        self.session().draft_id().cloned()
    }

    /// Applies a form change.
    pub fn edit<R>(&self, change: impl FnOnce(&mut DraftForm) -> R) -> R {
        self.session().edit(change)
    }

    /// Loads the draft to show when the view opens.
    ///
    /// The remote latest draft wins; the local snapshot is used only when
    /// the service has none or cannot be reached.
    pub async fn load_on_mount(&self) -> LoadSource {
        match self.drafts.fetch_latest().await {
            Ok(Some(remote)) if remote.form.is_meaningful() => {
                let id = remote.id.clone();
                self.session().restore_remote(remote);
                info!(draft_id = %id, "draft loaded from server");
                return LoadSource::Remote(id);
            }
            Ok(_) => debug!("no remote draft"),
            Err(err) => warn!(error = %err, "remote draft unavailable, falling back to local"),
        }

        let stored = self.session().load_local();
        match stored {
            Some(snapshot) if snapshot.form().is_meaningful() => {
                self.session().restore_local(snapshot);
                info!("local draft loaded");
                LoadSource::Local
            }
            _ => LoadSource::Empty,
        }
    }

    /// Timer-driven save: writes local, then pushes a dirty form silently.
    pub async fn autosave_tick(&self) -> AutosaveOutcome {
        let Some(ticket) = self.session().begin_save(false) else {
            return AutosaveOutcome::Idle;
        };
        match self.push(&ticket).await {
            SaveApplied::Applied { outcome, .. } => AutosaveOutcome::Saved(outcome),
            SaveApplied::Stale { .. } => AutosaveOutcome::Superseded,
            SaveApplied::Overtaken(err) => {
                debug!(error = %err, "overtaken autosave failed");
                AutosaveOutcome::Superseded
            }
            SaveApplied::Failed(err) => {
                warn!(error = %err, "autosave failed, draft kept locally");
                AutosaveOutcome::Deferred
            }
        }
    }

    /// Explicit "save as draft": like autosave, but any meaningful form is
    /// pushed and failures are reported.
    pub async fn save_as_draft(&self) -> DraftSaveOutcome {
        let Some(ticket) = self.session().begin_save(true) else {
            return DraftSaveOutcome::NothingToSave;
        };
        match self.push(&ticket).await {
            SaveApplied::Applied { outcome, .. } => DraftSaveOutcome::Saved(outcome),
            SaveApplied::Stale { .. } => DraftSaveOutcome::Superseded,
            SaveApplied::Overtaken(err) | SaveApplied::Failed(err) => {
                DraftSaveOutcome::SavedLocally(err)
            }
        }
    }

    async fn push(&self, ticket: &SaveTicket) -> SaveApplied {
        let result = self.drafts.save(ticket.draft_id(), ticket.form()).await;
        let applied = self.session().apply_save_result(ticket, result);
        if let Some(orphan) = applied.orphan() {
            self.drafts.discard(orphan).await;
        }
        applied
    }

    /// Submits the form as a task.
    ///
    /// On success the remote draft is deleted (failures ignored), the local
    /// snapshot is cleared and the session resets to empty. On failure the
    /// session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the validation or gateway error to surface to the user.
    pub async fn create_task(&self) -> TaskServiceResult<CreatedTask> {
        let form = self.form();
        let created = self.tasks.create_task(&form).await?;
        let tracked = self.session().reset();
        if let Some(id) = tracked {
            self.drafts.discard(&id).await;
        }
        Ok(created)
    }

    /// Clears the form, asking first when it holds anything.
    ///
    /// A tracked remote draft is deleted best-effort.
    pub async fn clear_form(&self, prompt: &dyn DiscardPrompt) -> ClearOutcome {
        let meaningful = self.session().is_meaningful();
        if meaningful && !prompt.confirm(PromptKind::ClearForm) {
            return ClearOutcome::Cancelled;
        }
        let tracked = self.session().reset();
        if let Some(id) = tracked {
            self.drafts.discard(&id).await;
        }
        ClearOutcome::Cleared
    }

    /// Closes the view, offering to save unsaved changes first.
    ///
    /// Declining drops the unsaved changes locally; the remote draft, if
    /// any, is left as last synced.
    pub async fn close(&self, prompt: &dyn DiscardPrompt) -> CloseOutcome {
        let unsaved = self.session().has_unsaved_changes();
        if !unsaved {
            self.session().flush_local();
            return CloseOutcome::Closed;
        }
        if prompt.confirm(PromptKind::SaveBeforeClose) {
            return CloseOutcome::SavedAndClosed(self.save_as_draft().await);
        }
        let tracked = self.session().reset();
        debug!(draft_id = ?tracked, "unsaved changes discarded on close");
        CloseOutcome::Discarded
    }
}
