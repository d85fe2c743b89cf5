//! The assign-task draft state machine.
//!
//! A session owns the in-memory form, the tracked remote draft id and the
//! local store. It never awaits: a save is split into [`begin_save`], which
//! writes the local snapshot and issues a [`SaveTicket`], and
//! [`apply_save_result`], which folds the remote outcome back in. Each
//! ticket carries a monotonic token and the session's reset generation, so
//! an outcome that arrives after a newer save was issued, or after the form
//! was cleared or submitted, cannot overwrite newer state.
//!
//! [`begin_save`]: AssignTaskSession::begin_save
//! [`apply_save_result`]: AssignTaskSession::apply_save_result

use super::SyncOutcome;
use crate::draft::{
    domain::{DraftForm, DraftId, DraftSnapshot, FormFingerprint, RemoteDraft},
    ports::{DraftServiceError, DraftServiceResult, LocalDraftStore},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

/// Persistence state of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftState {
    /// Every field holds its default value.
    Empty,
    /// The form differs from the last remote copy.
    DirtyUnsaved,
    /// The remote draft matches the form.
    Synced,
}

/// A save attempt issued by [`AssignTaskSession::begin_save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTicket {
    token: u64,
    generation: u64,
    draft_id: Option<DraftId>,
    form: DraftForm,
    fingerprint: FormFingerprint,
}

impl SaveTicket {
    /// Returns the monotonic save token.
    #[must_use]
    pub const fn token(&self) -> u64 {
        self.token
    }

    /// Returns the reset generation the save belongs to.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the draft id known when the save was issued.
    #[must_use]
    pub const fn draft_id(&self) -> Option<&DraftId> {
        self.draft_id.as_ref()
    }

    /// Returns the form snapshot to push.
    #[must_use]
    pub const fn form(&self) -> &DraftForm {
        &self.form
    }
}

/// Result of folding a remote outcome into the session.
#[derive(Debug, Clone)]
pub enum SaveApplied {
    /// The outcome belonged to the latest save and was applied.
    Applied {
        /// How the draft reached the service.
        outcome: SyncOutcome,
        /// A remote draft no longer tracked by the session.
        orphan: Option<DraftId>,
    },
    /// A newer save or a reset superseded this one.
    Stale {
        /// A remote draft created by the superseded save that nothing
        /// tracks any more.
        orphan: Option<DraftId>,
    },
    /// A newer save was issued before this one failed. The newer save
    /// decides the session state, but this attempt never reached the
    /// service.
    Overtaken(DraftServiceError),
    /// The latest save failed; the local snapshot still holds the form.
    Failed(DraftServiceError),
}

impl SaveApplied {
    /// Returns the untracked remote draft to delete, if any.
    #[must_use]
    pub const fn orphan(&self) -> Option<&DraftId> {
        match self {
            Self::Applied { orphan, .. } | Self::Stale { orphan } => orphan.as_ref(),
            Self::Overtaken(_) | Self::Failed(_) => None,
        }
    }
}

/// In-memory form state bound to a local draft store.
pub struct AssignTaskSession<L, C>
where
    L: LocalDraftStore,
    C: Clock + Send + Sync,
{
    store: Arc<L>,
    clock: Arc<C>,
    form: DraftForm,
    draft_id: Option<DraftId>,
    state: DraftState,
    synced: Option<FormFingerprint>,
    last_token: u64,
    generation: u64,
}

impl<L, C> AssignTaskSession<L, C>
where
    L: LocalDraftStore,
    C: Clock + Send + Sync,
{
    /// Creates an empty session.
    #[must_use]
    pub fn new(store: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            form: DraftForm::default(),
            draft_id: None,
            state: DraftState::Empty,
            synced: None,
            last_token: 0,
            generation: 0,
        }
    }

    /// Returns the persistence state.
    #[must_use]
    pub const fn state(&self) -> DraftState {
        self.state
    }

    /// Returns the current form.
    #[must_use]
    pub const fn form(&self) -> &DraftForm {
        &self.form
    }

    /// Returns the tracked remote draft id.
    #[must_use]
    pub const fn draft_id(&self) -> Option<&DraftId> {
        self.draft_id.as_ref()
    }

    /// Returns the reset generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Adopts a draft loaded from the remote service as already synced.
    pub fn restore_remote(&mut self, remote: RemoteDraft) {
        self.synced = Some(FormFingerprint::of(&remote.form));
        self.draft_id = Some(remote.id);
        self.form = remote.form;
        self.refresh_state();
        self.write_local();
    }

    /// Adopts a locally stored snapshot; it still needs a remote push.
    pub fn restore_local(&mut self, snapshot: DraftSnapshot) {
        let (draft_id, form) = snapshot.into_parts();
        self.draft_id = draft_id;
        self.form = form;
        self.synced = None;
        self.refresh_state();
    }

    /// Applies a change to the form and writes the result through to the
    /// local store.
    pub fn edit<R>(&mut self, change: impl FnOnce(&mut DraftForm) -> R) -> R {
        let result = change(&mut self.form);
        self.refresh_state();
        self.write_local();
        result
    }

    /// Writes the local snapshot and, when a remote push is due, issues a
    /// ticket for it.
    ///
    /// An `explicit` save pushes any meaningful form; an autosave pushes
    /// only a [`DraftState::DirtyUnsaved`] one. An empty form clears the
    /// local store and is never pushed.
    pub fn begin_save(&mut self, explicit: bool) -> Option<SaveTicket> {
        self.write_local();
        if !self.form.is_meaningful() {
            return None;
        }
        if !explicit && self.state != DraftState::DirtyUnsaved {
            return None;
        }
        self.last_token += 1;
        Some(SaveTicket {
            token: self.last_token,
            generation: self.generation,
            draft_id: self.draft_id.clone(),
            form: self.form.clone(),
            fingerprint: FormFingerprint::of(&self.form),
        })
    }

    /// Folds the remote outcome of `ticket` into the session.
    pub fn apply_save_result(
        &mut self,
        ticket: &SaveTicket,
        result: DraftServiceResult<SyncOutcome>,
    ) -> SaveApplied {
        if ticket.generation != self.generation {
            let orphan = match result {
                Ok(outcome) if outcome.created_new() => Some(outcome.id().clone()),
                _ => None,
            };
            debug!(token = ticket.token, "discarding save from a reset session");
            return SaveApplied::Stale { orphan };
        }

        let is_latest = ticket.token == self.last_token;
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) if is_latest => return SaveApplied::Failed(err),
            Err(err) => {
                debug!(token = ticket.token, latest = self.last_token, "overtaken save failed");
                return SaveApplied::Overtaken(err);
            }
        };

        if !is_latest {
            return self.apply_superseded(ticket, &outcome);
        }

        let id = outcome.id().clone();
        let previous = self.draft_id.replace(id.clone());
        let orphan = previous.filter(|prev| *prev != id && Some(prev) != ticket.draft_id.as_ref());
        self.synced = Some(ticket.fingerprint);
        self.refresh_state();
        self.write_local();
        SaveApplied::Applied { outcome, orphan }
    }

    fn apply_superseded(&mut self, ticket: &SaveTicket, outcome: &SyncOutcome) -> SaveApplied {
        let id = outcome.id();
        debug!(
            token = ticket.token,
            latest = self.last_token,
            draft_id = %id,
            "superseded save answered"
        );
        if self.draft_id.is_none() {
            self.draft_id = Some(id.clone());
            self.write_local();
            return SaveApplied::Stale { orphan: None };
        }
        if self.draft_id.as_ref() == Some(id) {
            // The older payload may have landed after the newer one.
            if self.form.is_meaningful() {
                self.state = DraftState::DirtyUnsaved;
            }
            return SaveApplied::Stale { orphan: None };
        }
        SaveApplied::Stale {
            orphan: outcome.created_new().then(|| id.clone()),
        }
    }

    /// Returns `true` when the form holds anything worth confirming before
    /// it is cleared.
    #[must_use]
    pub fn is_meaningful(&self) -> bool {
        self.form.is_meaningful()
    }

    /// Returns `true` when closing now would lose unsaved changes.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.state == DraftState::DirtyUnsaved
    }

    /// Resets to an empty form, clears the local store and invalidates every
    /// outstanding ticket. Returns the remote draft id that was tracked.
    pub fn reset(&mut self) -> Option<DraftId> {
        self.generation += 1;
        self.store.clear();
        self.form = DraftForm::default();
        self.synced = None;
        self.state = DraftState::Empty;
        self.draft_id.take()
    }

    /// Reads the snapshot held by the local store.
    #[must_use]
    pub fn load_local(&self) -> Option<DraftSnapshot> {
        self.store.load()
    }

    /// Writes the current form to the local store.
    pub fn flush_local(&self) {
        self.write_local();
    }

    fn refresh_state(&mut self) {
        self.state = if !self.form.is_meaningful() {
            DraftState::Empty
        } else if self.draft_id.is_some() && self.synced == Some(FormFingerprint::of(&self.form)) {
            DraftState::Synced
        } else {
            DraftState::DirtyUnsaved
        };
    }

    fn write_local(&self) {
        if self.form.is_meaningful() {
            let snapshot =
                DraftSnapshot::capture(self.draft_id.clone(), self.form.clone(), &*self.clock);
            self.store.save(&snapshot);
        } else {
            self.store.clear();
        }
    }
}
