//! Decoding of the backend's `detail` error payload.

use serde::Deserialize;
use std::fmt;

/// One segment of a validation error location (`loc`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LocSegment {
    /// Object key, such as `body` or `projectName`.
    Name(String),
    /// Array index.
    Index(u64),
}

impl fmt::Display for LocSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    /// Path to the offending field, outermost first.
    #[serde(default)]
    pub loc: Vec<LocSegment>,
    /// Human-readable failure description.
    pub msg: String,
}

impl FieldError {
    /// Returns the innermost location segment, which names the field.
    #[must_use]
    pub fn leaf(&self) -> Option<&LocSegment> {
        self.loc.last()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.leaf() {
            Some(leaf) => write!(f, "{leaf}: {}", self.msg),
            None => f.write_str(&self.msg),
        }
    }
}

/// Error detail returned by the backend: either a plain message or a list
/// of field validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Plain message.
    Message(String),
    /// Field validation failures.
    Fields(Vec<FieldError>),
}

impl ErrorDetail {
    /// Collapses the detail into one user-facing string.
    ///
    /// Field failures render as `"<field>: <message>"` joined with `"; "`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use taskdesk::api::ErrorDetail;
    ///
    /// let detail: ErrorDetail = serde_json::from_str(
    ///     r#"[{"loc":["body","title"],"msg":"field required"},
    ///         {"loc":["body","priority"],"msg":"invalid value"}]"#,
    /// )
    /// .unwrap();
    /// assert_eq!(
    ///     detail.user_message(),
    ///     "title: field required; priority: invalid value"
    /// );
    /// ```
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Message(message) => message.clone(),
            Self::Fields(fields) => fields
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

/// Body shape of a failed request.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub(super) detail: Option<ErrorDetail>,
}
