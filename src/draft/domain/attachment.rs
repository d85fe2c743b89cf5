//! File attachments accumulated on a form before upload.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::DraftDomainError;

/// Client-side identifier for a pending attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(Uuid);

impl AttachmentId {
    /// Creates a new random attachment identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for AttachmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A file selected for upload, described by name and size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAttachment")]
pub struct Attachment {
    id: AttachmentId,
    name: String,
    size: u64,
}

impl Attachment {
    /// Creates an attachment entry.
    ///
    /// # Errors
    ///
    /// Returns [`DraftDomainError::EmptyAttachmentName`] for a blank name.
    pub fn new(name: impl Into<String>, size: u64) -> Result<Self, DraftDomainError> {
        let label = name.into();
        if label.trim().is_empty() {
            return Err(DraftDomainError::EmptyAttachmentName);
        }
        Ok(Self {
            id: AttachmentId::new(),
            name: label,
            size,
        })
    }

    /// Returns the client-side identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }
}

/// Attachment payload as stored locally or echoed by the backend, which
/// names files `originalName` or `filename`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAttachment {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    original_name: Option<String>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    size: Option<u64>,
}

impl From<RawAttachment> for Attachment {
    fn from(raw: RawAttachment) -> Self {
        Self {
            id: raw
                .id
                .and_then(|value| serde_json::from_value(value).ok())
                .unwrap_or_default(),
            name: raw
                .name
                .or(raw.original_name)
                .or(raw.filename)
                .unwrap_or_default(),
            size: raw.size.unwrap_or_default(),
        }
    }
}
