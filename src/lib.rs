//! typist - Typing-Text Animation
//!
//! Types a phrase one character at a time, holds it, deletes it, and moves
//! on to the next phrase, forever. The engine is split in two:
//!
//! - **Typewriter**: a clock-free state machine that yields one frame per tick
//! - **TypingAnimator**: runs a typewriter on a tokio task and writes every
//!   frame to a [`Sink`](sink::Sink), with idempotent start/stop and resume
//!
//! # Quick Start
//!
//! ```ignore
//! use typist::{config::TypingConfig, sink::RecordingSink, TypingAnimator};
//!
//! let sink = RecordingSink::new();
//! let mut animator = TypingAnimator::new(TypingConfig::with_phrases(["Hi"]), sink.clone())?;
//! animator.start()?;
//! // ... later
//! animator.stop();
//! ```

pub mod animator;
pub mod cli;
pub mod config;
pub mod errors;
pub mod observability;
pub mod sink;

pub use animator::{Frame, Mode, Snapshot, Typewriter, TypingAnimator};
pub use errors::{ConfigError, SinkError, TypistError};
