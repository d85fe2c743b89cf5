//! In-memory adapters for draft persistence.

mod draft_service;
mod local_store;

pub use draft_service::{DraftServiceCalls, InMemoryDraftService};
pub use local_store::InMemoryLocalDraftStore;
