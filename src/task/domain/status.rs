//! Task status, workflow stage and kind.
//!
//! These values are display buckets only. Legal transitions between them
//! are decided by the backend; nothing here validates a transition.

/// Status of a task as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Waiting for the receiving department.
    Pending,
    /// Work has started. Also reported as `in_progress`.
    Working,
    /// Result submitted for review.
    Submitted,
    /// Result approved.
    Approved,
    /// Sent back for revision. Also reported as `cancelled` or
    /// `needs_improvement` by the outbox listing.
    RevisionRequired,
    /// Workflow finished.
    Completed,
}

impl TaskStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Working,
        Self::Submitted,
        Self::Approved,
        Self::RevisionRequired,
        Self::Completed,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Working => "working",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::RevisionRequired => "revision_required",
            Self::Completed => "completed",
        }
    }

    /// Parses a status, ignoring case and treating `-` or spaces as `_`.
    ///
    /// Returns `None` for values outside the known set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use taskdesk::task::domain::TaskStatus;
    ///
    /// assert_eq!(
    ///     TaskStatus::parse("Revision_Required"),
    ///     Some(TaskStatus::RevisionRequired)
    /// );
    /// assert_eq!(TaskStatus::parse("in_progress"), Some(TaskStatus::Working));
    /// assert_eq!(TaskStatus::parse("archived"), None);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize(raw).as_str() {
            "pending" => Some(Self::Pending),
            "working" | "in_progress" => Some(Self::Working),
            "submitted" => Some(Self::Submitted),
            "approved" => Some(Self::Approved),
            "revision_required" | "cancelled" | "needs_improvement" => {
                Some(Self::RevisionRequired)
            }
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Coarse workflow position of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowStage {
    /// Dispatched by the sender.
    Sent,
    /// Picked up by the receiving department.
    Received,
    /// Being worked on.
    InProgress,
    /// Awaiting review.
    UnderReview,
    /// Finished.
    Completed,
}

impl WorkflowStage {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Received => "received",
            Self::InProgress => "in_progress",
            Self::UnderReview => "under_review",
            Self::Completed => "completed",
        }
    }

    /// Parses a stage, ignoring case and treating `-` or spaces as `_`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize(raw).as_str() {
            "sent" => Some(Self::Sent),
            "received" => Some(Self::Received),
            "in_progress" => Some(Self::InProgress),
            "under_review" => Some(Self::UnderReview),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Whether a task is an ordinary assignment or a result sent back by the
/// receiving department.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Ordinary assignment.
    #[default]
    Regular,
    /// Result of a previously assigned task.
    Result,
}

impl TaskKind {
    /// Derives the kind from the backend's `isResult` flag and `taskType`.
    #[must_use]
    pub fn from_wire(is_result: Option<bool>, task_type: Option<&str>) -> Self {
        let typed_result = task_type.is_some_and(|kind| normalize(kind) == "result");
        if is_result.unwrap_or(false) || typed_result {
            Self::Result
        } else {
            Self::Regular
        }
    }
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .replace(['-', ' '], "_")
}
