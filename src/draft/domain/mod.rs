//! Domain model for task-form drafts.
//!
//! Drafts are plain value snapshots of the assign-task form. A draft whose
//! fields all hold their defaults is empty and is never persisted.

mod attachment;
mod error;
mod form;
mod ids;
mod link;
mod snapshot;

pub use attachment::{Attachment, AttachmentId};
pub use error::{DraftDomainError, ParsePriorityError};
pub use form::{DEFAULT_TASK_TAG, DEFAULT_TO_DEPARTMENT, DraftForm, Priority, TextField};
pub use ids::DraftId;
pub use link::Link;
pub use snapshot::{DraftSnapshot, FormFingerprint, RemoteDraft};
