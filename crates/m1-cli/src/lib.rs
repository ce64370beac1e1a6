//! Shared CLI infrastructure.
//!
//! The binary keeps its command plumbing private; logging lives here so
//! integration tests can initialize the same subscriber stack.

pub mod logging;
