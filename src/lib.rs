//! Umbrella package for the workspace's integration tests.
//!
//! Re-exports the core crate so `tests/` can drive whole sessions.
pub use mbed_runner_core::*;
