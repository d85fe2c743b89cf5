//! Remote drafts service contract.

use crate::draft::domain::{DraftForm, DraftId, RemoteDraft};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote draft operations.
pub type DraftServiceResult<T> = Result<T, DraftServiceError>;

/// Remote draft persistence contract.
///
/// Every call sends the full form; the service stores snapshots, never
/// deltas, so repeating a call is harmless.
#[async_trait]
pub trait DraftService: Send + Sync {
    /// Stores a new draft and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DraftServiceError`] when the service is unreachable or
    /// rejects the payload.
    async fn create(&self, form: &DraftForm) -> DraftServiceResult<DraftId>;

    /// Replaces the contents of an existing draft.
    ///
    /// # Errors
    ///
    /// Returns [`DraftServiceError::NotFound`] when the service does not know
    /// the identifier.
    async fn update(&self, id: &DraftId, form: &DraftForm) -> DraftServiceResult<RemoteDraft>;

    /// Returns the most recently saved draft of the current user.
    ///
    /// Returns `Ok(None)` when the user has no draft.
    async fn fetch_latest(&self) -> DraftServiceResult<Option<RemoteDraft>>;

    /// Returns every saved draft of the current user, most recently saved
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`DraftServiceError`] when the service cannot be queried.
    async fn list(&self) -> DraftServiceResult<Vec<RemoteDraft>>;

    /// Deletes a draft.
    ///
    /// # Errors
    ///
    /// Returns [`DraftServiceError::NotFound`] when the draft is already gone.
    async fn delete(&self, id: &DraftId) -> DraftServiceResult<()>;
}

/// Errors returned by draft service implementations.
#[derive(Debug, Clone, Error)]
pub enum DraftServiceError {
    /// The draft does not exist on the server.
    #[error("draft not found: {0}")]
    NotFound(DraftId),

    /// The server rejected the payload.
    #[error("draft rejected: {0}")]
    Rejected(String),

    /// The session is not authenticated.
    #[error("not authenticated")]
    Unauthenticated,

    /// Network or server failure.
    #[error("draft service unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl DraftServiceError {
    /// Wraps a transport or server failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Produces the message shown to the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            Self::Unauthenticated => "Please log in to save drafts".to_owned(),
            Self::NotFound(_) | Self::Unavailable(_) => "Draft saved locally (server error)".to_owned(),
        }
    }
}
