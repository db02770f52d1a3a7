//! Typing State Machine
//!
//! A clock-free typewriter: each `advance()` reveals or removes one
//! character of the current phrase and reports how long to wait before the
//! next call. Lengths are counted in `char`s so multi-byte phrases are
//! always cut on a character boundary.

use serde::Serialize;
use std::time::Duration;

use crate::config::TypingConfig;
use crate::errors::ConfigError;

/// Whether the current phrase is growing or shrinking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Typing,
    Deleting,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Typing => write!(f, "typing"),
            Mode::Deleting => write!(f, "deleting"),
        }
    }
}

/// Position of the typewriter within the phrase rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Snapshot {
    pub phrase_index: usize,
    pub char_count: usize,
    pub mode: Mode,
}

/// Output of a single tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub text: String,
    #[serde(rename = "delay_ms", serialize_with = "serialize_millis")]
    pub delay: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

#[derive(Debug, Clone)]
struct Phrase {
    text: String,
    len: usize,
}

impl Phrase {
    fn new(text: String) -> Self {
        let len = text.chars().count();
        Self { text, len }
    }

    /// The first `n` characters
    fn prefix(&self, n: usize) -> &str {
        match self.text.char_indices().nth(n) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }
}

/// The typing/deleting state machine over a fixed phrase rotation.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Phrase>,
    typing_delay: Duration,
    deleting_delay: Duration,
    hold_delay: Duration,
    state: Snapshot,
}

impl Typewriter {
    pub fn new(config: &TypingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            phrases: config.phrases.iter().cloned().map(Phrase::new).collect(),
            typing_delay: config.typing_delay(),
            deleting_delay: config.deleting_delay(),
            hold_delay: config.hold_delay(),
            state: Snapshot::default(),
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// Run one tick: returns the text to display and the wait before the next tick.
    pub fn advance(&mut self) -> Frame {
        let cur = &self.phrases[self.state.phrase_index];

        match self.state.mode {
            Mode::Typing => {
                self.state.char_count += 1;
                let text = cur.prefix(self.state.char_count).to_string();
                if self.state.char_count == cur.len {
                    self.state.mode = Mode::Deleting;
                    return Frame {
                        text,
                        delay: self.hold_delay,
                    };
                }
                Frame {
                    text,
                    delay: self.typing_delay,
                }
            }
            Mode::Deleting => {
                self.state.char_count -= 1;
                let text = cur.prefix(self.state.char_count).to_string();
                if self.state.char_count == 0 {
                    self.state.mode = Mode::Typing;
                    self.state.phrase_index = (self.state.phrase_index + 1) % self.phrases.len();
                }
                Frame {
                    text,
                    delay: self.deleting_delay,
                }
            }
        }
    }

    /// Number of ticks needed to type and delete every phrase once
    pub fn ticks_per_cycle(&self) -> usize {
        self.phrases.iter().map(|p| p.len * 2).sum()
    }

    /// Lazily yields the frames of `cycles` full passes over the rotation,
    /// starting from the current state. Fails when the tick count does not
    /// fit in a `usize`.
    pub fn schedule(
        &mut self,
        cycles: usize,
    ) -> Result<impl Iterator<Item = Frame> + '_, ConfigError> {
        let ticks = self
            .ticks_per_cycle()
            .checked_mul(cycles)
            .ok_or(ConfigError::TooManyCycles { cycles })?;
        Ok((0..ticks).map(move |_| self.advance()))
    }

    /// Collected form of [`Typewriter::schedule`]
    pub fn frames(&mut self, cycles: usize) -> Result<Vec<Frame>, ConfigError> {
        Ok(self.schedule(cycles)?.collect())
    }
}
