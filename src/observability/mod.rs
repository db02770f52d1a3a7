//! Observability
//!
//! Structured logging setup and the log helpers used by the animator.

pub mod telemetry;
