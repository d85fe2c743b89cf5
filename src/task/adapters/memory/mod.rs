//! In-memory task backend.

mod gateway;

pub use gateway::{InMemoryTaskGateway, TaskGatewayCalls};
