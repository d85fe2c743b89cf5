//! Port contracts for draft persistence and user confirmation.
//!
//! Ports define infrastructure-agnostic interfaces used by draft services.

pub mod local_store;
pub mod prompt;
pub mod remote;

pub use local_store::LocalDraftStore;
pub use prompt::{DiscardPrompt, PromptKind};
pub use remote::{DraftService, DraftServiceError, DraftServiceResult};

#[cfg(test)]
pub use prompt::MockDiscardPrompt;
