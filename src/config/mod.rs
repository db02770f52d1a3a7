//! Configuration Management
//!
//! Loads typist configuration from TOML files.
//! Configuration includes:
//! - The phrase rotation and its timing (typing, deleting, hold, speed)
//! - Display options for the terminal sink (caret, prefix)
//!
//! Lookup order when no explicit path is given: `./typist.toml`, then
//! `~/.config/typist/config.toml`, then built-in defaults. `TYPIST_*`
//! environment variables override whatever was loaded.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::errors::ConfigError;

/// Separator for the `TYPIST_PHRASES` environment override.
pub const PHRASE_SEPARATOR: char = '|';

/// Hero roles shown when no phrases are configured.
pub const DEFAULT_PHRASES: &[&str] = &[
    "I Build Intelligent Apps — Data Science • Web Dev • AI",
    "Data Enthusiast",
    "Problem Solver",
    "Open to internships",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub typing: TypingConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Phrase rotation and timing for a typing animator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingConfig {
    #[serde(default = "default_phrases")]
    pub phrases: Vec<String>,
    /// Delay after revealing a character
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,
    /// Delay after removing a character
    #[serde(default = "default_deleting_delay_ms")]
    pub deleting_delay_ms: u64,
    /// Pause once a phrase is fully typed, before deletion starts
    #[serde(default = "default_hold_delay_ms")]
    pub hold_delay_ms: u64,
    /// Speed multiplier (1.0 = normal, 2.0 = twice as fast)
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: default_phrases(),
            typing_delay_ms: default_typing_delay_ms(),
            deleting_delay_ms: default_deleting_delay_ms(),
            hold_delay_ms: default_hold_delay_ms(),
            speed: default_speed(),
        }
    }
}

fn default_phrases() -> Vec<String> {
    DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect()
}
fn default_typing_delay_ms() -> u64 {
    80
}
fn default_deleting_delay_ms() -> u64 {
    50
}
fn default_hold_delay_ms() -> u64 {
    900
}
fn default_speed() -> f64 {
    1.0
}

impl TypingConfig {
    /// Config with the given phrases and default timing
    pub fn with_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.phrases.is_empty() {
            return Err(ConfigError::NoPhrases);
        }
        if let Some(index) = self.phrases.iter().position(|p| p.is_empty()) {
            return Err(ConfigError::EmptyPhrase { index });
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        Ok(())
    }

    pub fn typing_delay(&self) -> Duration {
        self.scaled(self.typing_delay_ms)
    }

    pub fn deleting_delay(&self) -> Duration {
        self.scaled(self.deleting_delay_ms)
    }

    pub fn hold_delay(&self) -> Duration {
        self.scaled(self.hold_delay_ms)
    }

    fn scaled(&self, ms: u64) -> Duration {
        let nanos = (ms as f64 * 1_000_000.0 / self.speed).round();
        Duration::from_nanos(nanos as u64)
    }
}

/// How the terminal sink renders the current text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Caret appended after the text; omit to disable
    #[serde(default = "default_cursor")]
    pub cursor: Option<String>,
    /// Text printed before the phrase on every frame
    #[serde(default)]
    pub prefix: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cursor: default_cursor(),
            prefix: String::new(),
        }
    }
}

fn default_cursor() -> Option<String> {
    Some("▌".to_string())
}

impl Config {
    /// Load configuration from `path`, or from the default locations.
    ///
    /// The result has environment overrides applied but is not validated;
    /// callers layer their own overrides first, then call [`Config::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let mut loaded = None;
                for p in default_paths() {
                    if p.is_file() {
                        loaded = Some(Self::from_file(&p)?);
                        break;
                    }
                }
                loaded.unwrap_or_default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.typing.validate()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(config)
    }

    /// Override with `TYPIST_*` environment variables
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup. Numeric values that do
    /// not parse are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(phrases) = lookup("TYPIST_PHRASES") {
            self.typing.phrases = phrases
                .split(PHRASE_SEPARATOR)
                .map(|p| p.to_string())
                .collect();
        }

        let delays = [
            ("TYPIST_TYPING_DELAY_MS", &mut self.typing.typing_delay_ms),
            ("TYPIST_DELETING_DELAY_MS", &mut self.typing.deleting_delay_ms),
            ("TYPIST_HOLD_DELAY_MS", &mut self.typing.hold_delay_ms),
        ];
        for (key, slot) in delays {
            if let Some(raw) = lookup(key) {
                match raw.trim().parse::<u64>() {
                    Ok(ms) => *slot = ms,
                    Err(_) => warn!("Ignoring {}: not a number of milliseconds", key),
                }
            }
        }

        if let Some(raw) = lookup("TYPIST_SPEED") {
            match raw.trim().parse::<f64>() {
                Ok(speed) => self.typing.speed = speed,
                Err(_) => warn!("Ignoring TYPIST_SPEED: not a number"),
            }
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("typist.toml")];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config/typist/config.toml"));
    }
    paths
}
