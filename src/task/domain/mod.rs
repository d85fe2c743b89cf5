//! Domain model for submitted tasks.
//!
//! Tasks are created once by this client and mutated only by the backend
//! afterwards. Status and workflow-stage values are decoded leniently: the
//! raw server text is kept and parsed on demand, so an unknown value never
//! fails a listing.

mod action;
mod error;
mod ids;
mod journey;
mod listing;
mod new_task;
mod status;
mod task;
mod timestamp;

pub use action::{ActionRequest, SubmissionReport, TaskAction};
pub use error::{ParseTaskActionError, RequiredField, TaskValidationError};
pub use ids::TaskId;
pub use journey::JourneyEntry;
pub use listing::{InboxFilter, InboxListing, OutboxFilter, OutboxListing, StatusCounts};
pub use new_task::{CreatedTask, NewTask};
pub use status::{TaskKind, TaskStatus, WorkflowStage};
pub use task::{ParticipantRef, TaskAttachment, TaskRecord, TaskTimeline, UserSummary};
