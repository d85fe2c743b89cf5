//! Draft synchronisation and reconciliation services.

pub mod autosave;
pub mod reconciler;
pub mod session;
pub mod sync;

pub use autosave::{AutosaveHandle, spawn_autosave};
pub use reconciler::{
    AutosaveOutcome, ClearOutcome, CloseOutcome, DraftReconciler, DraftSaveOutcome, LoadSource,
};
pub use session::{AssignTaskSession, DraftState, SaveApplied, SaveTicket};
pub use sync::{DraftSyncClient, SyncOutcome};
