//! Filesystem-backed adapters for draft persistence.

mod local_store;

pub use local_store::FileLocalDraftStore;
