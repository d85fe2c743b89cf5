//! Status, stage, priority and action badges.

use crate::task::domain::{TaskStatus, WorkflowStage};

/// Coloured status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    /// CSS hex colour.
    pub color: &'static str,
    /// Leading icon.
    pub icon: &'static str,
    /// Short label.
    pub label: &'static str,
}

/// Workflow stage badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageBadge {
    /// Leading icon.
    pub icon: &'static str,
    /// Stage text with underscores shown as spaces.
    pub label: String,
}

/// Maps a raw status to its badge.
///
/// Matching ignores case; aliases such as `in_progress` and `cancelled`
/// share their bucket's badge. Unknown or absent values get the pending
/// badge.
///
/// # Examples
///
/// ```rust
/// use taskdesk::presenter::status_badge;
///
/// assert_eq!(status_badge(Some("REVISION_REQUIRED")).label, "Revision");
/// assert_eq!(status_badge(None).label, "Pending");
/// ```
#[must_use]
pub fn status_badge(raw: Option<&str>) -> StatusBadge {
    let status = raw.and_then(TaskStatus::parse).unwrap_or(TaskStatus::Pending);
    let (color, icon, label) = match status {
        TaskStatus::Pending => ("#fbbf24", "⏳", "Pending"),
        TaskStatus::Working => ("#3b82f6", "⚙️", "Working"),
        TaskStatus::Submitted => ("#8b5cf6", "📤", "Submitted"),
        TaskStatus::Approved => ("#22c55e", "✓", "Approved"),
        TaskStatus::RevisionRequired => ("#ef4444", "↩️", "Revision"),
        TaskStatus::Completed => ("#10b981", "✓✓", "Completed"),
    };
    StatusBadge { color, icon, label }
}

/// Maps a raw workflow stage to its badge.
///
/// Unknown stages keep their own text with the default icon; an absent
/// stage renders as `pending`.
#[must_use]
pub fn stage_badge(raw: Option<&str>) -> StageBadge {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return StageBadge {
            icon: DEFAULT_ICON,
            label: "pending".to_owned(),
        };
    };
    WorkflowStage::parse(text).map_or_else(
        || StageBadge {
            icon: DEFAULT_ICON,
            label: text.replace('_', " "),
        },
        |stage| StageBadge {
            icon: stage_icon(stage),
            label: stage.as_str().replace('_', " "),
        },
    )
}

const DEFAULT_ICON: &str = "📌";

const fn stage_icon(stage: WorkflowStage) -> &'static str {
    match stage {
        WorkflowStage::Sent => "📤",
        WorkflowStage::Received => "✅",
        WorkflowStage::InProgress => "🔄",
        WorkflowStage::UnderReview => "👁️",
        WorkflowStage::Completed => "🎉",
    }
}

/// Returns the icon for a priority label; unknown labels get `⚪`.
#[must_use]
pub fn priority_icon(priority: Option<&str>) -> &'static str {
    match priority.map(|label| label.trim().to_ascii_lowercase()).as_deref() {
        Some("high") => "🔴",
        Some("medium") => "🟡",
        Some("low") => "🟢",
        _ => "⚪",
    }
}

/// Returns the colour for a priority label; unknown labels get the medium
/// colour.
#[must_use]
pub fn priority_color(priority: Option<&str>) -> &'static str {
    match priority.map(|label| label.trim().to_ascii_lowercase()).as_deref() {
        Some("high") => "#ef4444",
        Some("low") => "#22c55e",
        _ => "#f59e0b",
    }
}

/// Returns the icon for a journey action.
#[must_use]
pub fn action_icon(action: &str) -> &'static str {
    match action.trim().to_ascii_lowercase().as_str() {
        "created" => "✨",
        "sent" => "📤",
        "received" => "✅",
        "started" => "🚀",
        "paused" => "⏸️",
        "completed" => "🎉",
        "forwarded" => "➡️",
        "rejected" => "❌",
        "under_review" => "👁️",
        _ => DEFAULT_ICON,
    }
}
