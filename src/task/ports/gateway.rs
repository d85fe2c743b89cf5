//! Gateway port for task creation, listings and workflow actions.

use crate::api::Ack;
use crate::task::domain::{
    ActionRequest, CreatedTask, InboxListing, JourneyEntry, NewTask, OutboxListing, TaskId,
    TaskRecord,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task gateway operations.
pub type TaskGatewayResult<T> = Result<T, TaskGatewayError>;

/// Task backend contract.
///
/// The backend owns every state transition; implementations forward the
/// request and report the outcome without interpreting it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Creates a task from a validated payload.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::Validation`] when the backend rejects
    /// individual fields.
    async fn create(&self, task: &NewTask) -> TaskGatewayResult<CreatedTask>;

    /// Lists tasks received by the current user.
    async fn inbox(&self) -> TaskGatewayResult<InboxListing>;

    /// Lists tasks sent by the current user.
    async fn outbox(&self) -> TaskGatewayResult<OutboxListing>;

    /// Returns the number of unread inbox tasks.
    async fn unread_count(&self) -> TaskGatewayResult<u32>;

    /// Returns the full record of a received task, including the actions
    /// the backend currently permits on it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::NotFound`] when the task is not in the
    /// current user's inbox.
    async fn task_detail(&self, id: TaskId) -> TaskGatewayResult<TaskRecord>;

    /// Returns a task's journey, in the order the backend records it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::NotFound`] for an unknown task.
    async fn journey(&self, id: TaskId) -> TaskGatewayResult<Vec<JourneyEntry>>;

    /// Performs a workflow action.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::Rejected`] when the backend refuses the
    /// action, for example because the task is in the wrong state.
    async fn perform(&self, id: TaskId, request: &ActionRequest) -> TaskGatewayResult<Ack>;
}

/// Errors returned by task gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskGatewayError {
    /// The backend rejected one or more fields.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The session is not authenticated.
    #[error("not authenticated")]
    Unauthenticated,

    /// The backend refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Network or server failure.
    #[error("task service unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskGatewayError {
    /// Wraps a transport or server failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Produces the message shown to the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) | Self::Rejected(message) => message.clone(),
            Self::NotFound(id) => format!("Task {id} no longer exists"),
            Self::Unauthenticated => "Not authenticated. Please log in.".to_owned(),
            Self::Unavailable(err) => format!("Error: {err}"),
        }
    }
}
