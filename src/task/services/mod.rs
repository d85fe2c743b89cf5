//! Orchestration services for task submission, actions and polling.

pub mod actions;
pub mod polling;
pub mod submission;

pub use actions::TaskActionService;
pub use polling::{PollerHandle, spawn_outbox_refresher, spawn_unread_poller};
pub use submission::{TaskServiceError, TaskServiceResult, TaskSubmissionService};
