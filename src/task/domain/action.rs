//! Workflow actions a task participant can request.

use super::{ParseTaskActionError, TaskValidationError};
use crate::draft::domain::{Attachment, Link};
use serde::Serialize;
use serde_json::{Value, json};

/// Action endpoint on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskAction {
    /// Receiver starts working.
    StartWork,
    /// Reviewer approves the result.
    Approve,
    /// Reviewer sends the task back for revision.
    Reject,
    /// Receiver submits a result.
    Submit,
}

impl TaskAction {
    /// Returns the endpoint segment under `/api/tasks/{id}/`.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::StartWork => "start-work",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Submit => "submit",
        }
    }
}

impl TryFrom<&str> for TaskAction {
    type Error = ParseTaskActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "start_work" | "startwork" => Ok(Self::StartWork),
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            "submit" => Ok(Self::Submit),
            _ => Err(ParseTaskActionError(value.to_owned())),
        }
    }
}

/// Result report sent with a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReport {
    /// Description of the delivered result.
    pub result_details: String,
    /// Files delivered with the result.
    pub attachments: Vec<Attachment>,
    /// Links delivered with the result.
    pub links: Vec<Link>,
}

impl SubmissionReport {
    /// Creates a report with result details only.
    #[must_use]
    pub fn new(result_details: impl Into<String>) -> Self {
        Self {
            result_details: result_details.into(),
            ..Self::default()
        }
    }
}

/// A validated action request with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    /// Start work; no payload.
    StartWork,
    /// Approve, optionally with comments.
    Approve {
        /// Reviewer comments.
        comments: Option<String>,
    },
    /// Reject with a mandatory reason.
    Reject {
        /// Why the task is sent back.
        reason: String,
    },
    /// Submit a result.
    Submit(SubmissionReport),
}

impl ActionRequest {
    /// Builds an approval.
    #[must_use]
    pub fn approve(comments: Option<String>) -> Self {
        Self::Approve {
            comments: comments.filter(|text| !text.trim().is_empty()),
        }
    }

    /// Builds a rejection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::MissingRejectionReason`] for a blank
    /// reason.
    pub fn reject(reason: impl Into<String>) -> Result<Self, TaskValidationError> {
        let text = reason.into();
        if text.trim().is_empty() {
            return Err(TaskValidationError::MissingRejectionReason);
        }
        Ok(Self::Reject { reason: text })
    }

    /// Builds a submission.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::MissingResultDetails`] when the report
    /// has no result details.
    pub fn submit(report: SubmissionReport) -> Result<Self, TaskValidationError> {
        if report.result_details.trim().is_empty() {
            return Err(TaskValidationError::MissingResultDetails);
        }
        Ok(Self::Submit(report))
    }

    /// Returns the targeted action endpoint.
    #[must_use]
    pub const fn action(&self) -> TaskAction {
        match self {
            Self::StartWork => TaskAction::StartWork,
            Self::Approve { .. } => TaskAction::Approve,
            Self::Reject { .. } => TaskAction::Reject,
            Self::Submit(_) => TaskAction::Submit,
        }
    }

    /// Returns the JSON request body.
    #[must_use]
    pub fn body(&self) -> Value {
        match self {
            Self::StartWork => json!({}),
            Self::Approve { comments } => json!({ "comments": comments }),
            Self::Reject { reason } => json!({ "reason": reason, "revisionRequired": true }),
            Self::Submit(report) => serde_json::to_value(report).unwrap_or_else(|_| json!({})),
        }
    }
}
