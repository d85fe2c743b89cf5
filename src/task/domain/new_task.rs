//! Validated task-creation payloads.

use super::{RequiredField, TaskId, TaskValidationError};
use crate::draft::domain::DraftForm;
use serde::Serialize;

/// Task-creation request built from a completed form.
///
/// The body carries the form fields plus `title`/`description` copies of
/// the task name and details, which the backend requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    #[serde(flatten)]
    form: DraftForm,
    title: String,
    description: String,
}

impl NewTask {
    /// Validates a form for submission.
    ///
    /// Only the project and task names are checked here; every other rule
    /// is enforced by the backend.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::MissingRequiredFields`] listing each
    /// blank required field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use taskdesk::draft::domain::{DraftForm, TextField};
    /// use taskdesk::task::domain::{NewTask, RequiredField, TaskValidationError};
    ///
    /// let form = DraftForm::new().with_text(TextField::ProjectName, "Alpha");
    /// assert_eq!(
    ///     NewTask::from_form(&form),
    ///     Err(TaskValidationError::MissingRequiredFields(vec![RequiredField::TaskName]))
    /// );
    /// ```
    pub fn from_form(form: &DraftForm) -> Result<Self, TaskValidationError> {
        let missing: Vec<RequiredField> = [
            (RequiredField::ProjectName, form.project_name()),
            (RequiredField::TaskName, form.task_name()),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(TaskValidationError::MissingRequiredFields(missing));
        }

        Ok(Self {
            title: form.task_name().trim().to_owned(),
            description: form
                .text(crate::draft::domain::TextField::TaskDetails)
                .to_owned(),
            form: form.clone(),
        })
    }

    /// Returns the submitted form.
    #[must_use]
    pub const fn form(&self) -> &DraftForm {
        &self.form
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Acknowledgement of a created task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTask {
    /// New task identifier.
    pub id: TaskId,
    /// Human-facing task number, when assigned.
    pub task_number: Option<String>,
}
