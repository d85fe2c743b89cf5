//! Unit tests for the draft module.
