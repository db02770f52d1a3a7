use std::path::PathBuf;
use thiserror::Error;

/// The central error type for typist.
///
/// Configuration problems are fatal to construction. Sink problems never
/// surface here: sinks report a [`SinkError`] and the animator loop logs it
/// and keeps going.
#[derive(Error, Debug)]
pub enum TypistError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("At least one phrase is required")]
    NoPhrases,

    #[error("Phrase {index} is empty")]
    EmptyPhrase { index: usize },

    #[error("Speed multiplier must be a positive finite number, got {0}")]
    InvalidSpeed(f64),

    #[error("Cannot schedule {cycles} cycles: tick count overflows")]
    TooManyCycles { cycles: usize },

    #[error("Failed to read config from {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Display target is gone")]
    Closed,

    #[error("Display target rejected the text: {0}")]
    Rejected(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TypistError>;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;

/// Determine the appropriate process exit code for an error.
pub fn get_exit_code(e: &anyhow::Error) -> u8 {
    if let Some(typist_err) = e.downcast_ref::<TypistError>() {
        return match typist_err {
            TypistError::Config(_) => EXIT_CONFIG_ERROR,
            _ => EXIT_ERROR,
        };
    }

    if e.downcast_ref::<ConfigError>().is_some() {
        return EXIT_CONFIG_ERROR;
    }

    // Errors wrapped with .context() keep their source in the chain
    if e.chain().any(|cause| cause.downcast_ref::<ConfigError>().is_some()) {
        return EXIT_CONFIG_ERROR;
    }

    EXIT_ERROR
}
