//! Telemetry
//!
//! Provides structured logging for animator runs.
//! Features:
//! - Run spans carrying the animator's generation
//! - Typing/deleting transition logging at debug level
//! - Sink failure reporting with escaped text
//! - Configurable log levels via RUST_LOG

use tracing::{debug, info_span, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::animator::{Mode, Snapshot};

/// Sanitize a string for safe log output by escaping control characters.
/// Phrases and sink errors are host-supplied text; escaping keeps one
/// event on one line.
pub fn sanitize_for_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x1b' => out.push_str("\\e"),
            '\x00' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(c),
        }
    }
    out
}

/// Initialize global tracing subscriber.
/// Only enables output if RUST_LOG is explicitly set, so the animated line
/// is not interleaved with log noise.
pub fn init_tracing() {
    if let Ok(filter) = std::env::var("RUST_LOG") {
        init_tracing_with_filter(&filter);
    }
}

/// Initialize tracing for verbose mode
pub fn init_tracing_verbose() {
    init_tracing_with_filter("info")
}

/// Initialize with custom filter string
pub fn init_tracing_with_filter(filter: &str) {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_level(true)
            .compact()
            .with_writer(std::io::stderr); // stdout belongs to the animation

        let filter_layer = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}

/// Span covering one start..stop run of an animator
pub fn run_span(generation: u64, phrases: usize) -> Span {
    info_span!("animator.run", generation = generation, phrases = phrases)
}

/// Log a typing/deleting flip between two consecutive ticks
pub fn record_transition(before: &Snapshot, after: &Snapshot) {
    if before.mode == after.mode {
        return;
    }
    match after.mode {
        Mode::Deleting => debug!(
            phrase_index = after.phrase_index,
            "Phrase fully typed, holding before delete"
        ),
        Mode::Typing => debug!(
            from = before.phrase_index,
            to = after.phrase_index,
            "Phrase deleted, advancing"
        ),
    }
}

/// Initialize tracing for tests with a simple subscriber
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
