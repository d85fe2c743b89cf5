//! Taskdesk: draft synchronisation and task workflow client.
//!
//! This crate provides the client side of a departmental task dashboard:
//! an assign-task form whose drafts survive reloads and network failures,
//! task submission with client-side validation, workflow actions, inbox and
//! outbox polling, and display metadata for task cards and journeys.
//!
//! # Architecture
//!
//! Taskdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure value types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage, the backend and user
//!   prompts
//! - **Adapters**: In-memory, file-backed and HTTP implementations of ports
//!
//! # Modules
//!
//! - [`config`]: Client configuration and environment loading
//! - [`api`]: Shared HTTP client and backend error decoding
//! - [`draft`]: Local and remote draft persistence and reconciliation
//! - [`task`]: Task creation, listings, journeys and workflow actions
//! - [`presenter`]: Status, stage and journey display metadata

pub mod api;
pub mod config;
pub mod draft;
pub mod presenter;
pub mod task;
