//! Assign-task drafts: local/remote persistence and reconciliation.
//!
//! An in-progress task form is a draft. It is written to a local store on
//! every autosave tick or explicit save, pushed to the remote drafts service
//! with update-or-create semantics, and cleared from both places once the
//! task has been created. The module follows hexagonal architecture:
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
