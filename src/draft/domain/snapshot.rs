//! Persisted draft snapshots and content fingerprints.

use super::{DraftForm, DraftId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Snapshot written to the local draft store.
///
/// Snapshots are full copies of the form; saving replaces any prior
/// snapshot rather than merging with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    draft_id: Option<DraftId>,
    form: DraftForm,
    saved_at: DateTime<Utc>,
}

impl DraftSnapshot {
    /// Captures the current form state.
    #[must_use]
    pub fn capture(draft_id: Option<DraftId>, form: DraftForm, clock: &impl Clock) -> Self {
        Self {
            draft_id,
            form,
            saved_at: clock.utc(),
        }
    }

    /// Returns the remote draft identifier known when the snapshot was taken.
    #[must_use]
    pub const fn draft_id(&self) -> Option<&DraftId> {
        self.draft_id.as_ref()
    }

    /// Returns the captured form.
    #[must_use]
    pub const fn form(&self) -> &DraftForm {
        &self.form
    }

    /// Returns the capture time.
    #[must_use]
    pub const fn saved_at(&self) -> DateTime<Utc> {
        self.saved_at
    }

    /// Splits the snapshot into its identifier and form.
    #[must_use]
    pub fn into_parts(self) -> (Option<DraftId>, DraftForm) {
        (self.draft_id, self.form)
    }
}

/// Draft as returned by the remote drafts service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDraft {
    /// Server-assigned identifier.
    pub id: DraftId,
    /// Stored form contents.
    pub form: DraftForm,
}

/// SHA-256 digest of a form's canonical JSON encoding.
///
/// Two forms with equal fingerprints carry identical content, which lets
/// the reconciler tell whether the remote copy still matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormFingerprint([u8; 32]);

impl FormFingerprint {
    /// Fingerprints a form.
    #[must_use]
    pub fn of(form: &DraftForm) -> Self {
        let encoded = serde_json::to_vec(form).unwrap_or_default();
        Self(Sha256::digest(&encoded).into())
    }
}
