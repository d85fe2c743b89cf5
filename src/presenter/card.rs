//! Card and journey view models.

use super::{
    StageBadge, StatusBadge, action_icon, entries_label, excerpt, priority_color, priority_icon,
    relative_time, stage_badge, status_badge, truncate_link,
};
use crate::task::domain::{JourneyEntry, TaskKind, TaskRecord};
use mockable::Clock;

/// Everything an inbox or outbox card displays for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    /// Task name.
    pub title: String,
    /// Human-facing task number.
    pub task_number: Option<String>,
    /// Project name.
    pub project: Option<String>,
    /// Badge marking a returned result; `None` for ordinary assignments.
    pub kind_badge: Option<&'static str>,
    /// Status badge.
    pub status: StatusBadge,
    /// Workflow stage badge.
    pub stage: StageBadge,
    /// Journey length label, shown only when the backend count is positive.
    pub entries: Option<String>,
    /// Priority text as sent by the backend.
    pub priority: Option<String>,
    /// Priority icon.
    pub priority_icon: &'static str,
    /// Priority colour.
    pub priority_color: &'static str,
    /// Sender name with department, such as `Dana (Design)`.
    pub sender: String,
    /// First 100 characters of the details.
    pub excerpt: Option<String>,
    /// Relative receipt time.
    pub received: Option<String>,
    /// Whether the task is shown as unread.
    pub unread: bool,
    /// Display labels for the attachments.
    pub attachments: Vec<String>,
    /// Shortened links.
    pub links: Vec<String>,
}

/// One rendered journey entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyLine {
    /// Action icon.
    pub icon: &'static str,
    /// Action name.
    pub action: String,
    /// Relative time of the action.
    pub when: Option<String>,
    /// Acting user, or `System`.
    pub actor: String,
    /// Acting user's position.
    pub position: Option<String>,
    /// Acting user's department.
    pub department: Option<String>,
    /// `from → to` department route.
    pub route: Option<String>,
    /// `before → after` status change.
    pub status_change: Option<String>,
    /// Free-text comment.
    pub comments: Option<String>,
}

const fn kind_badge(kind: TaskKind) -> Option<&'static str> {
    match kind {
        TaskKind::Regular => None,
        TaskKind::Result => Some("📊 Result"),
    }
}

fn sender_label(record: &TaskRecord) -> String {
    let name = record
        .sender
        .as_ref()
        .and_then(|sender| sender.display_name())
        .map(ToOwned::to_owned)
        .or_else(|| record.created_by.as_ref().map(|by| by.display_name()))
        .unwrap_or_else(|| "Unknown".to_owned());
    let department = record
        .sender
        .as_ref()
        .and_then(|sender| sender.department.as_deref())
        .or(record.from_department.as_deref());
    department.map_or_else(|| name.clone(), |dept| format!("{name} ({dept})"))
}

fn arrow(from: Option<&str>, to: Option<&str>) -> Option<String> {
    if from.is_none() && to.is_none() {
        return None;
    }
    Some(format!("{} → {}", from.unwrap_or("?"), to.unwrap_or("?")))
}

/// Builds the card for a task record.
#[must_use]
pub fn present_task(record: &TaskRecord, clock: &impl Clock) -> TaskCard {
    let priority = record.priority.as_deref();
    let received = record
        .timeline
        .received_at
        .or(record.timeline.sent_at)
        .or(record.timeline.created_at);
    TaskCard {
        title: record.task_name.clone(),
        task_number: record.task_number.clone(),
        project: record.project_name.clone(),
        kind_badge: kind_badge(record.kind),
        status: status_badge(record.raw_status.as_deref()),
        stage: stage_badge(record.raw_workflow_stage.as_deref()),
        entries: entries_label(record.journey_count),
        priority: record.priority.clone(),
        priority_icon: priority_icon(priority),
        priority_color: priority_color(priority),
        sender: sender_label(record),
        excerpt: record
            .task_details
            .as_deref()
            .filter(|details| !details.is_empty())
            .map(excerpt),
        received: received.map(|at| relative_time(at, clock)),
        unread: record.is_read == Some(false),
        attachments: record
            .attachments
            .iter()
            .enumerate()
            .map(|(index, attachment)| attachment.label(index))
            .collect(),
        links: record.links.iter().map(|link| truncate_link(link)).collect(),
    }
}

/// Renders journey entries in the order given.
#[must_use]
pub fn present_journey(entries: &[JourneyEntry], clock: &impl Clock) -> Vec<JourneyLine> {
    entries
        .iter()
        .map(|entry| JourneyLine {
            icon: action_icon(&entry.action),
            action: entry.action.replace('_', " "),
            when: entry.timestamp.map(|at| relative_time(at, clock)),
            actor: entry.actor().to_owned(),
            position: entry.user_position.clone(),
            department: entry.user_department.clone(),
            route: arrow(
                entry.from_department.as_deref(),
                entry.to_department.as_deref(),
            ),
            status_change: arrow(
                entry.status_before.as_deref(),
                entry.status_after.as_deref(),
            ),
            comments: entry.comments.clone(),
        })
        .collect()
}
