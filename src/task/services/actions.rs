//! Workflow actions and read-only task queries.

use super::TaskServiceResult;
use crate::{
    api::Ack,
    task::{
        domain::{
            ActionRequest, InboxListing, JourneyEntry, OutboxListing, SubmissionReport, TaskId,
            TaskRecord,
        },
        ports::TaskGateway,
    },
};
use std::sync::Arc;
use tracing::info;

/// Forwards workflow actions to the backend.
///
/// The service does not check whether an action is legal for the task's
/// current status; the backend decides and its answer is returned as is.
#[derive(Clone)]
pub struct TaskActionService<G>
where
    G: TaskGateway,
{
    gateway: Arc<G>,
}

impl<G> TaskActionService<G>
where
    G: TaskGateway,
{
    /// Creates an action service.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Starts work on a received task.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Gateway`] when the backend refuses.
    pub async fn start_work(&self, id: TaskId) -> TaskServiceResult<Ack> {
        self.perform(id, &ActionRequest::StartWork).await
    }

    /// Approves a submitted result.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Gateway`] when the backend refuses.
    pub async fn approve(&self, id: TaskId, comments: Option<String>) -> TaskServiceResult<Ack> {
        self.perform(id, &ActionRequest::approve(comments)).await
    }

    /// Sends a submitted result back for revision.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Validation`] for a blank reason,
    /// without contacting the backend.
    pub async fn reject(&self, id: TaskId, reason: &str) -> TaskServiceResult<Ack> {
        let request = ActionRequest::reject(reason)?;
        self.perform(id, &request).await
    }

    /// Submits a result for review.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Validation`] when the report has
    /// no result details, without contacting the backend.
    pub async fn submit(&self, id: TaskId, report: SubmissionReport) -> TaskServiceResult<Ack> {
        let request = ActionRequest::submit(report)?;
        self.perform(id, &request).await
    }

    /// Fetches a received task's full record; its available actions decide
    /// which action buttons are offered.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Gateway`] when the lookup fails.
    pub async fn task_detail(&self, id: TaskId) -> TaskServiceResult<TaskRecord> {
        Ok(self.gateway.task_detail(id).await?)
    }

    /// Returns a task's journey in backend order.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Gateway`] when the lookup fails.
    pub async fn journey(&self, id: TaskId) -> TaskServiceResult<Vec<JourneyEntry>> {
        Ok(self.gateway.journey(id).await?)
    }

    /// Lists received tasks.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Gateway`] when the listing fails.
    pub async fn inbox(&self) -> TaskServiceResult<InboxListing> {
        Ok(self.gateway.inbox().await?)
    }

    /// Lists sent tasks.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Gateway`] when the listing fails.
    pub async fn outbox(&self) -> TaskServiceResult<OutboxListing> {
        Ok(self.gateway.outbox().await?)
    }

    async fn perform(&self, id: TaskId, request: &ActionRequest) -> TaskServiceResult<Ack> {
        let ack = self.gateway.perform(id, request).await?;
        info!(task_id = %id, action = request.action().path_segment(), "task action performed");
        Ok(ack)
    }
}
