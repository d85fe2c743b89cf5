//! The assign-task form and its field defaults.

use super::{Attachment, AttachmentId, DraftDomainError, Link, ParsePriorityError};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Department preselected in the "to department" picker.
pub const DEFAULT_TO_DEPARTMENT: &str = "Gen Ai";

/// Tag preselected in the task tag picker.
pub const DEFAULT_TASK_TAG: &str = "Audio";

/// Task priority as offered by the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Priority {
    /// Preselected priority.
    #[default]
    High,
    /// Medium priority.
    Medium,
    /// Low priority.
    Low,
    /// Urgent priority, only ever set by the backend.
    Urgent,
}

impl Priority {
    /// Returns the label used in request bodies.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Urgent => "Urgent",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

/// Free-text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    /// Project name (required for task creation).
    ProjectName,
    /// Task name (required for task creation).
    TaskName,
    /// Reference / related identifier.
    Reference,
    /// Sender's department or team members.
    MyDepartment,
    /// Receiving department.
    ToDepartment,
    /// Deadline as entered (`datetime-local` text).
    Deadline,
    /// Long-form task details.
    TaskDetails,
    /// Task tag.
    TaskTag,
}

/// In-progress contents of the assign-task form.
///
/// A form is *meaningful* when any field differs from its default; only
/// meaningful forms are persisted as drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawDraftForm")]
pub struct DraftForm {
    project_name: String,
    task_name: String,
    reference: String,
    my_department: String,
    to_department: String,
    deadline: String,
    priority: Priority,
    task_details: String,
    task_tag: String,
    attachments: Vec<Attachment>,
    links: Vec<Link>,
}

impl Default for DraftForm {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            task_name: String::new(),
            reference: String::new(),
            my_department: String::new(),
            to_department: DEFAULT_TO_DEPARTMENT.to_owned(),
            deadline: String::new(),
            priority: Priority::default(),
            task_details: String::new(),
            task_tag: DEFAULT_TASK_TAG.to_owned(),
            attachments: Vec::new(),
            links: Vec::new(),
        }
    }
}

impl DraftForm {
    /// Creates a form holding only default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when any field differs from its default.
    #[must_use]
    pub fn is_meaningful(&self) -> bool {
        !self.project_name.is_empty()
            || !self.task_name.is_empty()
            || !self.reference.is_empty()
            || !self.my_department.is_empty()
            || self.to_department != DEFAULT_TO_DEPARTMENT
            || !self.deadline.is_empty()
            || self.priority != Priority::default()
            || !self.task_details.is_empty()
            || self.task_tag != DEFAULT_TASK_TAG
            || !self.attachments.is_empty()
            || !self.links.is_empty()
    }

    /// Returns the value of a text field.
    #[must_use]
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::ProjectName => &self.project_name,
            TextField::TaskName => &self.task_name,
            TextField::Reference => &self.reference,
            TextField::MyDepartment => &self.my_department,
            TextField::ToDepartment => &self.to_department,
            TextField::Deadline => &self.deadline,
            TextField::TaskDetails => &self.task_details,
            TextField::TaskTag => &self.task_tag,
        }
    }

    /// Overwrites a text field.
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let slot = match field {
            TextField::ProjectName => &mut self.project_name,
            TextField::TaskName => &mut self.task_name,
            TextField::Reference => &mut self.reference,
            TextField::MyDepartment => &mut self.my_department,
            TextField::ToDepartment => &mut self.to_department,
            TextField::Deadline => &mut self.deadline,
            TextField::TaskDetails => &mut self.task_details,
            TextField::TaskTag => &mut self.task_tag,
        };
        *slot = value.into();
    }

    /// Returns a copy with a text field set.
    #[must_use]
    pub fn with_text(mut self, field: TextField, value: impl Into<String>) -> Self {
        self.set_text(field, value);
        self
    }

    /// Returns the project name.
    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Returns the task name.
    #[must_use]
    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    /// Returns the selected priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Sets the priority.
    pub const fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Returns the pending attachments in selection order.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Adds a selected file and returns its client-side identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DraftDomainError::EmptyAttachmentName`] for a blank name.
    pub fn add_attachment(
        &mut self,
        name: impl Into<String>,
        size: u64,
    ) -> Result<AttachmentId, DraftDomainError> {
        let attachment = Attachment::new(name, size)?;
        let id = attachment.id();
        self.attachments.push(attachment);
        Ok(id)
    }

    /// Removes a pending attachment, returning it when it was present.
    pub fn remove_attachment(&mut self, id: AttachmentId) -> Option<Attachment> {
        let position = self.attachments.iter().position(|item| item.id() == id)?;
        Some(self.attachments.remove(position))
    }

    /// Returns the related links in insertion order.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Validates and appends a related link.
    ///
    /// # Errors
    ///
    /// Returns [`DraftDomainError::EmptyLink`] or
    /// [`DraftDomainError::InvalidLink`] when the input is rejected.
    pub fn add_link(&mut self, raw: &str) -> Result<(), DraftDomainError> {
        self.links.push(Link::parse(raw)?);
        Ok(())
    }

    /// Removes the link at `index`, returning it when the index was valid.
    pub fn remove_link(&mut self, index: usize) -> Option<Link> {
        (index < self.links.len()).then(|| self.links.remove(index))
    }
}

/// Lenient decoding shape: tolerates `null` fields, the backend's
/// `title`/`description` naming, lower-case priorities and stale links.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDraftForm {
    #[serde(default)]
    project_name: Option<String>,
    #[serde(default)]
    task_name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    my_department: Option<String>,
    #[serde(default)]
    to_department: Option<String>,
    #[serde(default)]
    deadline: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    task_details: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    task_tag: Option<String>,
    #[serde(default)]
    attachments: Option<Vec<Attachment>>,
    #[serde(default)]
    links: Option<Vec<String>>,
}

impl From<RawDraftForm> for DraftForm {
    fn from(raw: RawDraftForm) -> Self {
        let defaults = Self::default();
        let priority = raw
            .priority
            .and_then(|label| Priority::try_from(label.as_str()).ok())
            .unwrap_or(defaults.priority);
        let links = raw
            .links
            .unwrap_or_default()
            .into_iter()
            .filter_map(|raw_link| match Link::parse(&raw_link) {
                Ok(link) => Some(link),
                Err(err) => {
                    warn!(link = %raw_link, error = %err, "dropping invalid stored link");
                    None
                }
            })
            .collect();

        Self {
            project_name: raw.project_name.unwrap_or_default(),
            task_name: raw.task_name.or(raw.title).unwrap_or_default(),
            reference: raw.reference.unwrap_or_default(),
            my_department: raw.my_department.unwrap_or_default(),
            to_department: raw.to_department.unwrap_or(defaults.to_department),
            deadline: raw.deadline.unwrap_or_default(),
            priority,
            task_details: raw.task_details.or(raw.description).unwrap_or_default(),
            task_tag: raw.task_tag.unwrap_or(defaults.task_tag),
            attachments: raw.attachments.unwrap_or_default(),
            links,
        }
    }
}
