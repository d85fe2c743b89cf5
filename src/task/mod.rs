//! Tasks: creation, listings, journeys and workflow actions.
//!
//! A task is created once from a completed assign-task form and is mutated
//! only by the backend afterwards. The client reads tasks back for the
//! inbox and outbox, forwards workflow actions, and polls for changes. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
