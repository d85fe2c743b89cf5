//! HTTP adapter for the task backend.

mod gateway;

pub use gateway::HttpTaskGateway;
