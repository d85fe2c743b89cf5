//! Validated task creation.

use crate::{
    draft::domain::DraftForm,
    task::{
        domain::{CreatedTask, NewTask, TaskValidationError},
        ports::{TaskGateway, TaskGatewayError},
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for task operations.
#[derive(Debug, Clone, Error)]
pub enum TaskServiceError {
    /// Client-side validation failed; nothing was sent.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    /// The gateway call failed.
    #[error(transparent)]
    Gateway(#[from] TaskGatewayError),
}

impl TaskServiceError {
    /// Produces the message shown to the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => capitalise(&err.to_string()),
            Self::Gateway(err) => err.user_message(),
        }
    }
}

fn capitalise(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Submits completed forms as tasks.
#[derive(Clone)]
pub struct TaskSubmissionService<G>
where
    G: TaskGateway,
{
    gateway: Arc<G>,
}

impl<G> TaskSubmissionService<G>
where
    G: TaskGateway,
{
    /// Creates a submission service.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Validates a form and creates a task from it.
    ///
    /// Validation happens before any request; a form with a blank project
    /// or task name never reaches the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for missing required fields
    /// and [`TaskServiceError::Gateway`] when the backend refuses or cannot
    /// be reached.
    pub async fn create_task(&self, form: &DraftForm) -> TaskServiceResult<CreatedTask> {
        let task = NewTask::from_form(form)?;
        let created = self.gateway.create(&task).await?;
        info!(
            task_id = %created.id,
            task_number = created.task_number.as_deref().unwrap_or_default(),
            "task created"
        );
        Ok(created)
    }
}
