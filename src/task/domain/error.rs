//! Error types for task validation and parsing.

use thiserror::Error;

/// Form field required before a task can be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// Project name.
    ProjectName,
    /// Task name.
    TaskName,
}

impl RequiredField {
    /// Returns the field label shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProjectName => "Project Name",
            Self::TaskName => "Task Name",
        }
    }
}

/// Client-side validation failures; raised before any request is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Required form fields are blank.
    #[error("please fill required fields ({})", join_labels(.0))]
    MissingRequiredFields(Vec<RequiredField>),

    /// A rejection was attempted without a reason.
    #[error("rejection reason is required")]
    MissingRejectionReason,

    /// A submission was attempted without result details.
    #[error("please provide result details")]
    MissingResultDetails,
}

fn join_labels(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(" & ")
}

/// Error returned while parsing a task action name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task action: {0}")]
pub struct ParseTaskActionError(pub String);
