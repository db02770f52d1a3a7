//! Display Sinks
//!
//! A sink receives every intermediate string the animator produces. The
//! terminal sink redraws the current line using `\r` + ANSI line clearing,
//! the same way a spinner does; when ANSI is not available it falls back to
//! one line per frame.
//!
//! Terminal capability detection: Respects `TERM=dumb` and unset `TERM`.

use parking_lot::Mutex;
use std::io::{self, IsTerminal, Stdout, Write};
use std::sync::Arc;

use crate::config::DisplayConfig;
use crate::errors::SinkError;

/// Target for the animator's output
pub trait Sink: Send + 'static {
    fn display(&mut self, text: &str) -> Result<(), SinkError>;
}

impl Sink for Box<dyn Sink> {
    fn display(&mut self, text: &str) -> Result<(), SinkError> {
        (**self).display(text)
    }
}

/// Check if the terminal supports ANSI escape sequences.
///
/// Returns `false` if:
/// - The `TERM` env var is `"dumb"` or unset/empty
/// - Stdout is not a terminal (piped to a file, etc.)
pub fn supports_ansi() -> bool {
    if !io::stdout().is_terminal() {
        return false;
    }
    match std::env::var("TERM") {
        Ok(term) => !term.is_empty() && term != "dumb",
        Err(_) => false,
    }
}

/// Writes each frame to a terminal-like writer
pub struct TerminalSink<W: Write + Send + 'static = Stdout> {
    out: W,
    prefix: String,
    cursor: Option<String>,
    redraw: bool,
}

impl TerminalSink<Stdout> {
    /// Sink on stdout; redraws in place unless `plain` is set or the
    /// terminal lacks ANSI support
    pub fn stdout(display: &DisplayConfig, plain: bool) -> Self {
        Self::new(io::stdout(), display, !plain && supports_ansi())
    }
}

impl<W: Write + Send + 'static> TerminalSink<W> {
    /// `redraw = false` prints one line per frame and never emits escapes.
    pub fn new(out: W, display: &DisplayConfig, redraw: bool) -> Self {
        Self {
            out,
            prefix: display.prefix.clone(),
            cursor: display.cursor.clone(),
            redraw,
        }
    }

    pub fn is_redrawing(&self) -> bool {
        self.redraw
    }

    /// Clear the animated line (or nothing, in line mode)
    pub fn clear(&mut self) -> Result<(), SinkError> {
        if self.redraw {
            write!(self.out, "\r\x1b[2K")?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + 'static> Sink for TerminalSink<W> {
    fn display(&mut self, text: &str) -> Result<(), SinkError> {
        if self.redraw {
            let cursor = self.cursor.as_deref().unwrap_or("");
            write!(self.out, "\r\x1b[2K{}{}{}", self.prefix, text, cursor)?;
        } else {
            writeln!(self.out, "{}{}", self.prefix, text)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps every frame in memory; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    frames: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<String> {
        self.frames.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }

    pub fn last(&self) -> Option<String> {
        self.frames.lock().last().cloned()
    }
}

impl Sink for RecordingSink {
    fn display(&mut self, text: &str) -> Result<(), SinkError> {
        self.frames.lock().push(text.to_string());
        Ok(())
    }
}

/// Adapts a closure into a sink
pub struct FnSink<F>(F);

pub fn from_fn<F>(f: F) -> FnSink<F>
where
    F: FnMut(&str) -> Result<(), SinkError> + Send + 'static,
{
    FnSink(f)
}

impl<F> Sink for FnSink<F>
where
    F: FnMut(&str) -> Result<(), SinkError> + Send + 'static,
{
    fn display(&mut self, text: &str) -> Result<(), SinkError> {
        (self.0)(text)
    }
}
