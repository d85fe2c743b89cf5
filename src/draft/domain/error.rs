//! Error types for draft form validation and parsing.

use thiserror::Error;

/// Errors returned while editing or constructing draft values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftDomainError {
    /// A draft identifier was empty.
    #[error("draft identifier must not be empty")]
    EmptyDraftId,

    /// The link input was blank.
    #[error("please enter a valid link")]
    EmptyLink,

    /// The link input is not an absolute http(s) URL.
    #[error("'{value}' is not a valid URL starting with http:// or https://")]
    InvalidLink {
        /// Rejected input.
        value: String,
    },

    /// An attachment was added without a file name.
    #[error("attachment name must not be empty")]
    EmptyAttachmentName,
}

/// Error returned while parsing a priority label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
