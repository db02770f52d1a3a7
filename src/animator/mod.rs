//! Typing Animator
//!
//! Drives a [`Typewriter`] on a tokio task: every tick writes the current
//! prefix to a [`Sink`] and sleeps for the delay the typewriter asks for.
//! The loop never ends on its own; it runs until [`TypingAnimator::stop`]
//! or until the animator is dropped.
//!
//! Cancellation is generation based. Each `start()` bumps the generation and
//! hands it to the new task; `stop()` bumps it again under the same lock the
//! tick runs under. A task whose generation is stale exits before touching
//! the sink, so once `stop()` returns nothing is written, even if a tick was
//! already scheduled.

pub mod state;

pub use state::{Frame, Mode, Snapshot, Typewriter};

use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn, Instrument};

use crate::config::TypingConfig;
use crate::errors::{ConfigError, Result, TypistError};
use crate::observability::telemetry::{record_transition, run_span, sanitize_for_log};
use crate::sink::Sink;

struct Shared<S> {
    typewriter: Typewriter,
    sink: S,
    generation: u64,
    running: bool,
}

impl<S: Sink> Shared<S> {
    /// One tick: advance, write, report the wait before the next one.
    fn tick(&mut self) -> Duration {
        let before = self.typewriter.snapshot();
        let frame = self.typewriter.advance();

        // A panicking sink counts as a failed write; the loop keeps going
        let sink = &mut self.sink;
        match panic::catch_unwind(AssertUnwindSafe(|| sink.display(&frame.text))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let safe_err = sanitize_for_log(&e.to_string());
                warn!(
                    phrase_index = before.phrase_index,
                    char_count = before.char_count,
                    error = safe_err.as_str(),
                    "Sink write failed, continuing"
                );
            }
            Err(payload) => {
                let safe_err = sanitize_for_log(panic_message(payload.as_ref()));
                warn!(
                    phrase_index = before.phrase_index,
                    char_count = before.char_count,
                    error = safe_err.as_str(),
                    "Sink panicked, continuing"
                );
            }
        }

        record_transition(&before, &self.typewriter.snapshot());
        frame.delay
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "non-string panic payload"
    }
}

/// Cycles through phrases, typing and deleting each one on a sink.
pub struct TypingAnimator<S: Sink> {
    shared: Arc<Mutex<Shared<S>>>,
    config: TypingConfig,
    handle: Option<JoinHandle<()>>,
}

impl<S: Sink> TypingAnimator<S> {
    /// Fails with a [`ConfigError`] when the phrase list is empty, a phrase
    /// is empty, or the speed multiplier is not positive.
    pub fn new(config: TypingConfig, sink: S) -> std::result::Result<Self, ConfigError> {
        let typewriter = Typewriter::new(&config)?;
        Ok(Self {
            shared: Arc::new(Mutex::new(Shared {
                typewriter,
                sink,
                generation: 0,
                running: false,
            })),
            config,
            handle: None,
        })
    }

    /// Begin ticking on the current tokio runtime.
    ///
    /// No-op when already running. The first tick happens on the spawned
    /// task, not on the caller. After a `stop()`, continues from where the
    /// animator left off.
    pub fn start(&mut self) -> Result<()> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| TypistError::Internal(format!("no tokio runtime: {}", e)))?;

        let generation = {
            let mut shared = self.shared.lock();
            if shared.running {
                return Ok(());
            }
            shared.running = true;
            shared.generation += 1;
            shared.generation
        };

        debug!(generation, "Typing animator started");
        let span = run_span(generation, self.config.phrases.len());
        let shared = Arc::clone(&self.shared);
        self.handle = Some(runtime.spawn(run_loop(shared, generation).instrument(span)));
        Ok(())
    }

    /// Halt the loop. No-op when not running.
    ///
    /// When this returns, no further sink writes will happen until the next
    /// `start()`. State is kept, so a later `start()` resumes.
    pub fn stop(&mut self) {
        {
            let mut shared = self.shared.lock();
            if !shared.running {
                return;
            }
            shared.running = false;
            shared.generation += 1;
        }

        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        debug!("Typing animator stopped");
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().running
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shared.lock().typewriter.snapshot()
    }

    pub fn config(&self) -> &TypingConfig {
        &self.config
    }

    /// Borrow the sink, e.g. to clear a terminal line after `stop()`.
    ///
    /// Holds the tick lock for the duration of `f`.
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.shared.lock().sink)
    }
}

impl<S: Sink> Drop for TypingAnimator<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_loop<S: Sink>(shared: Arc<Mutex<Shared<S>>>, generation: u64) {
    loop {
        let delay = {
            let mut shared = shared.lock();
            if !shared.running || shared.generation != generation {
                break;
            }
            shared.tick()
        };
        tokio::time::sleep(delay).await;
    }
}
