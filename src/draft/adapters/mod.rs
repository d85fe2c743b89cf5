//! Adapter implementations for draft ports.

pub mod file;
pub mod http;
pub mod memory;
