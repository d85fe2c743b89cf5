//! Update-or-create client over the remote drafts service.

use crate::draft::{
    domain::{DraftForm, DraftId, RemoteDraft},
    ports::{DraftService, DraftServiceError, DraftServiceResult},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// How a draft reached the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The known draft was updated in place.
    Updated(DraftId),
    /// No draft was known, so a new one was created.
    Created(DraftId),
    /// The known draft had disappeared server-side and was replaced.
    Recreated {
        /// Identifier the server no longer recognised.
        stale: DraftId,
        /// Identifier of the replacement draft.
        id: DraftId,
    },
}

impl SyncOutcome {
    /// Returns the identifier now holding the draft.
    #[must_use]
    pub const fn id(&self) -> &DraftId {
        match self {
            Self::Updated(id) | Self::Created(id) | Self::Recreated { id, .. } => id,
        }
    }

    /// Returns `true` when the save produced a new remote draft.
    #[must_use]
    pub const fn created_new(&self) -> bool {
        matches!(self, Self::Created(_) | Self::Recreated { .. })
    }
}

/// Remote drafts client with not-found recovery.
#[derive(Clone)]
pub struct DraftSyncClient<D>
where
    D: DraftService,
{
    service: Arc<D>,
}

impl<D> DraftSyncClient<D>
where
    D: DraftService,
{
    /// Creates a client over a drafts service.
    #[must_use]
    pub const fn new(service: Arc<D>) -> Self {
        Self { service }
    }

    /// Pushes a full snapshot of `form`.
    ///
    /// With a known `id` the draft is updated. When the service reports the
    /// id as unknown, exactly one `create` follows and the outcome carries
    /// the new id; the not-found error itself is never returned.
    ///
    /// # Errors
    ///
    /// Returns [`DraftServiceError`] for any other failure.
    pub async fn save(
        &self,
        id: Option<&DraftId>,
        form: &DraftForm,
    ) -> DraftServiceResult<SyncOutcome> {
        let Some(known) = id else {
            let created = self.service.create(form).await?;
            debug!(draft_id = %created, "created remote draft");
            return Ok(SyncOutcome::Created(created));
        };

        match self.service.update(known, form).await {
            Ok(stored) => Ok(SyncOutcome::Updated(stored.id)),
            Err(DraftServiceError::NotFound(_)) => {
                let created = self.service.create(form).await?;
                debug!(stale = %known, draft_id = %created, "remote draft vanished, recreated");
                Ok(SyncOutcome::Recreated {
                    stale: known.clone(),
                    id: created,
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Returns the user's most recent remote draft.
    ///
    /// # Errors
    ///
    /// Returns [`DraftServiceError`] when the service cannot be queried.
    pub async fn fetch_latest(&self) -> DraftServiceResult<Option<RemoteDraft>> {
        self.service.fetch_latest().await
    }

    /// Lists the user's saved drafts, most recently saved first.
    ///
    /// # Errors
    ///
    /// Returns [`DraftServiceError`] when the service cannot be queried.
    pub async fn list(&self) -> DraftServiceResult<Vec<RemoteDraft>> {
        self.service.list().await
    }

    /// Deletes a remote draft, logging and ignoring any failure.
    ///
    /// A draft that is already gone counts as deleted.
    pub async fn discard(&self, id: &DraftId) {
        match self.service.delete(id).await {
            Ok(()) | Err(DraftServiceError::NotFound(_)) => {
                debug!(draft_id = %id, "remote draft discarded");
            }
            Err(err) => warn!(draft_id = %id, error = %err, "failed to delete remote draft"),
        }
    }
}
