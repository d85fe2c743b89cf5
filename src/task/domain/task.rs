//! Task records as listed by the inbox and outbox endpoints.

use super::{TaskAction, TaskId, TaskKind, TaskStatus, WorkflowStage, timestamp};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Short description of a user attached to a task or listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// User identifier.
    #[serde(default)]
    pub id: Option<u64>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// E-mail address.
    #[serde(default)]
    pub email: Option<String>,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Position or title.
    #[serde(default)]
    pub position: Option<String>,
}

impl UserSummary {
    /// Returns the best available label for the user.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.email.as_deref())
    }
}

/// Reference to a task participant; the backend sends either a bare name,
/// a bare user id, or a user object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ParticipantRef {
    /// Bare display name.
    Name(String),
    /// Bare user identifier.
    Id(u64),
    /// Full user summary.
    User(UserSummary),
}

impl ParticipantRef {
    /// Returns a label suitable for display.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Name(name) => name.clone(),
            Self::Id(id) => format!("User #{id}"),
            Self::User(user) => user
                .display_name()
                .map_or_else(|| "Unknown".to_owned(), ToOwned::to_owned),
        }
    }
}

/// Uploaded file referenced by a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAttachment {
    /// Download location.
    #[serde(default)]
    pub url: Option<String>,
    /// Name the file was uploaded with.
    #[serde(default)]
    pub original_name: Option<String>,
    /// Stored file name.
    #[serde(default)]
    pub filename: Option<String>,
}

impl TaskAttachment {
    /// Returns the label shown for the attachment at `index` (zero-based).
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        self.original_name
            .as_deref()
            .or(self.filename.as_deref())
            .map_or_else(|| format!("Attachment {}", index + 1), ToOwned::to_owned)
    }
}

/// Workflow timestamps reported for a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskTimeline {
    /// Record creation.
    pub created_at: Option<DateTime<Utc>>,
    /// Dispatch to the receiving department.
    pub sent_at: Option<DateTime<Utc>>,
    /// Receipt by the receiving department.
    pub received_at: Option<DateTime<Utc>>,
    /// Start of work.
    pub started_at: Option<DateTime<Utc>>,
    /// Completion.
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskTimeline {
    /// Returns `true` when any workflow timestamp is present.
    #[must_use]
    pub const fn has_progress(&self) -> bool {
        self.sent_at.is_some()
            || self.received_at.is_some()
            || self.started_at.is_some()
            || self.completed_at.is_some()
    }
}

/// A task as reported by the backend.
///
/// Records are read-only on the client: they are redisplayed, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawTaskRecord")]
pub struct TaskRecord {
    /// Task identifier.
    pub id: TaskId,
    /// Human-facing task number, such as `TSK-2025-0001`.
    pub task_number: Option<String>,
    /// Project name.
    pub project_name: Option<String>,
    /// Task name.
    pub task_name: String,
    /// Reference / related identifier.
    pub reference: Option<String>,
    /// Sending department.
    pub from_department: Option<String>,
    /// Receiving department.
    pub to_department: Option<String>,
    /// Priority label as sent by the backend.
    pub priority: Option<String>,
    /// Long-form details.
    pub task_details: Option<String>,
    /// Task tag.
    pub task_tag: Option<String>,
    /// Deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Raw status text.
    pub raw_status: Option<String>,
    /// Raw workflow stage text.
    pub raw_workflow_stage: Option<String>,
    /// Regular assignment or returned result.
    pub kind: TaskKind,
    /// Workflow timestamps.
    pub timeline: TaskTimeline,
    /// Participant who created the task.
    pub created_by: Option<ParticipantRef>,
    /// Participant currently holding the task.
    pub current_holder: Option<ParticipantRef>,
    /// Participant who completed the task.
    pub completed_by: Option<ParticipantRef>,
    /// Sender summary (inbox listings only).
    pub sender: Option<UserSummary>,
    /// Journey length as counted by the backend.
    pub journey_count: Option<u32>,
    /// Whether the current user has read the task (inbox listings only).
    pub is_read: Option<bool>,
    /// Actions the backend currently permits, as raw names.
    pub raw_available_actions: Vec<String>,
    /// Uploaded attachments.
    pub attachments: Vec<TaskAttachment>,
    /// Related links.
    pub links: Vec<String>,
}

impl TaskRecord {
    /// Creates a record with only an identifier and name set.
    #[must_use]
    pub fn new(id: TaskId, task_name: impl Into<String>) -> Self {
        Self {
            id,
            task_number: None,
            project_name: None,
            task_name: task_name.into(),
            reference: None,
            from_department: None,
            to_department: None,
            priority: None,
            task_details: None,
            task_tag: None,
            deadline: None,
            raw_status: None,
            raw_workflow_stage: None,
            kind: TaskKind::Regular,
            timeline: TaskTimeline::default(),
            created_by: None,
            current_holder: None,
            completed_by: None,
            sender: None,
            journey_count: None,
            is_read: None,
            raw_available_actions: Vec::new(),
            attachments: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Returns a copy with the raw status set.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.raw_status = Some(status.into());
        self
    }

    /// Returns the parsed status, or `None` when absent or unknown.
    #[must_use]
    pub fn status(&self) -> Option<TaskStatus> {
        self.raw_status.as_deref().and_then(TaskStatus::parse)
    }

    /// Returns the parsed workflow stage, or `None` when absent or unknown.
    #[must_use]
    pub fn workflow_stage(&self) -> Option<WorkflowStage> {
        self.raw_workflow_stage
            .as_deref()
            .and_then(WorkflowStage::parse)
    }

    /// Returns the recognised actions the backend currently permits.
    #[must_use]
    pub fn available_actions(&self) -> Vec<TaskAction> {
        self.raw_available_actions
            .iter()
            .filter_map(|name| TaskAction::try_from(name.as_str()).ok())
            .collect()
    }

    /// Returns `true` when the backend lists `action` as permitted.
    #[must_use]
    pub fn permits(&self, action: TaskAction) -> bool {
        self.available_actions().contains(&action)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTaskRecord {
    id: TaskId,
    #[serde(default)]
    task_number: Option<String>,
    #[serde(default)]
    project_name: Option<String>,
    #[serde(default)]
    task_name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    from_department: Option<String>,
    #[serde(default)]
    to_department: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    task_details: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    task_tag: Option<String>,
    #[serde(default)]
    task_type: Option<String>,
    #[serde(default)]
    is_result: Option<bool>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    workflow_stage: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    sent_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    received_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    created_by: Option<ParticipantRef>,
    #[serde(default)]
    current_holder: Option<ParticipantRef>,
    #[serde(default)]
    completed_by: Option<ParticipantRef>,
    #[serde(default)]
    sender: Option<UserSummary>,
    #[serde(default)]
    journey_count: Option<u32>,
    #[serde(default)]
    is_read: Option<bool>,
    #[serde(default)]
    available_actions: Option<Vec<String>>,
    #[serde(default)]
    attachments: Option<Vec<TaskAttachment>>,
    #[serde(default)]
    links: Option<Vec<String>>,
}

impl From<RawTaskRecord> for TaskRecord {
    fn from(raw: RawTaskRecord) -> Self {
        let kind = TaskKind::from_wire(raw.is_result, raw.task_type.as_deref());
        Self {
            id: raw.id,
            task_number: raw.task_number,
            project_name: raw.project_name,
            task_name: raw.task_name.or(raw.title).unwrap_or_default(),
            reference: raw.reference,
            from_department: raw.from_department,
            to_department: raw.to_department,
            priority: raw.priority,
            task_details: raw.task_details.or(raw.description),
            task_tag: raw.task_tag,
            deadline: raw.deadline,
            raw_status: raw.status,
            raw_workflow_stage: raw.workflow_stage,
            kind,
            timeline: TaskTimeline {
                created_at: raw.created_at,
                sent_at: raw.sent_at,
                received_at: raw.received_at,
                started_at: raw.started_at,
                completed_at: raw.completed_at,
            },
            created_by: raw.created_by,
            current_holder: raw.current_holder,
            completed_by: raw.completed_by,
            sender: raw.sender,
            journey_count: raw.journey_count,
            is_read: raw.is_read,
            raw_available_actions: raw.available_actions.unwrap_or_default(),
            attachments: raw.attachments.unwrap_or_default(),
            links: raw.links.unwrap_or_default(),
        }
    }
}
