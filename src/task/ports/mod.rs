//! Port contracts for the task backend.

pub mod gateway;

pub use gateway::{TaskGateway, TaskGatewayError, TaskGatewayResult};

#[cfg(test)]
pub use gateway::MockTaskGateway;
