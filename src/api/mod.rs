//! Shared HTTP plumbing for the dashboard backend.
//!
//! Every request carries the session credentials held by the underlying
//! cookie store. Non-success responses are decoded into [`ApiError::Status`]
//! with the backend's `detail` payload preserved, so callers can surface a
//! single user-facing message.

mod client;
mod detail;
mod error;

pub use client::{Ack, ApiClient};
pub use detail::{ErrorDetail, FieldError, LocSegment};
pub use error::{ApiError, ApiResult};
