//! Journey (audit trail) entries.

use super::timestamp;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One recorded action in a task's journey.
///
/// Entries are kept in the order the backend returns them; no sorting or
/// ordering checks happen on the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyEntry {
    /// Action name, such as `created`, `sent` or `rejected`.
    #[serde(default)]
    pub action: String,
    /// When the action happened.
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Acting user's name.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Acting user's position.
    #[serde(default)]
    pub user_position: Option<String>,
    /// Acting user's department.
    #[serde(default)]
    pub user_department: Option<String>,
    /// Status before the action.
    #[serde(default)]
    pub status_before: Option<String>,
    /// Status after the action.
    #[serde(default)]
    pub status_after: Option<String>,
    /// Department the task moved from.
    #[serde(default)]
    pub from_department: Option<String>,
    /// Department the task moved to.
    #[serde(default)]
    pub to_department: Option<String>,
    /// Free-text comment.
    #[serde(default, alias = "comment")]
    pub comments: Option<String>,
}

impl JourneyEntry {
    /// Creates an entry for `action` with no other detail.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }

    /// Returns the actor label, falling back to `System`.
    #[must_use]
    pub fn actor(&self) -> &str {
        self.user_name.as_deref().unwrap_or("System")
    }
}
