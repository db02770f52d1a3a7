//! typist command line
//!
//! `typist run` animates the phrase rotation on the current terminal line,
//! `typist frames` prints the schedule without waiting, `typist config`
//! shows the effective configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serializer;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::animator::{Typewriter, TypingAnimator};
use crate::config::Config;
use crate::observability::telemetry::{init_tracing, init_tracing_verbose};
use crate::sink::TerminalSink;

/// Upper bound for `frames --cycles`
pub const MAX_CYCLES: u64 = 10_000;

#[derive(Parser, Debug)]
#[command(name = "typist")]
#[command(about = "Types, holds and deletes a rotating list of phrases")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Phrase to animate; repeat to rotate several (replaces configured phrases)
    #[arg(long = "phrase", value_name = "TEXT", global = true)]
    phrases: Vec<String>,

    /// Speed multiplier (2.0 = twice as fast)
    #[arg(long, global = true)]
    speed: Option<f64>,

    /// Verbose mode (info-level logs on stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Animate on the terminal (default)
    Run {
        /// Stop after this many seconds instead of waiting for ctrl-c
        #[arg(long, value_name = "SECS")]
        duration_secs: Option<u64>,

        /// Don't draw the caret after the text
        #[arg(long)]
        no_cursor: bool,

        /// One line per frame instead of redrawing in place
        #[arg(long)]
        plain: bool,
    },

    /// Print the frame schedule for full phrase cycles without sleeping
    Frames {
        /// Number of complete passes over the phrase list
        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u64).range(1..=MAX_CYCLES)
        )]
        cycles: u64,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

impl Cli {
    /// Load the config file (or defaults), then layer CLI flags on top.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if !self.phrases.is_empty() {
            config.typing.phrases = self.phrases.clone();
        }
        if let Some(speed) = self.speed {
            config.typing.speed = speed;
        }

        config.validate().context("Invalid typist configuration")?;
        Ok(config)
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        init_tracing_verbose();
    } else {
        init_tracing();
    }

    let config = cli.resolve_config()?;

    match cli.command {
        None => animate(&config, None, false, false).await,
        Some(Commands::Run {
            duration_secs,
            no_cursor,
            plain,
        }) => animate(&config, duration_secs, no_cursor, plain).await,
        Some(Commands::Frames { cycles, json }) => print_frames(&config, cycles, json),
        Some(Commands::Config) => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

async fn animate(
    config: &Config,
    duration_secs: Option<u64>,
    no_cursor: bool,
    plain: bool,
) -> Result<()> {
    let mut display = config.display.clone();
    if no_cursor {
        display.cursor = None;
    }

    let sink = TerminalSink::stdout(&display, plain);
    let redraw = sink.is_redrawing();
    let mut animator = TypingAnimator::new(config.typing.clone(), sink)?;
    animator.start()?;
    info!(
        phrases = config.typing.phrases.len(),
        redraw, "Animating phrases"
    );

    match duration_secs {
        Some(secs) => {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(secs)) => {},
                _ = shutdown_signal() => {},
            }
        }
        None => shutdown_signal().await,
    }

    animator.stop();
    animator
        .with_sink(|sink| sink.clear())
        .context("Failed to clear the terminal line")?;
    info!("Animation stopped");
    Ok(())
}

fn print_frames(config: &Config, cycles: u64, json: bool) -> Result<()> {
    let stdout = io::stdout();
    write_frames(&mut stdout.lock(), config, cycles, json)
}

/// Stream the schedule to `out` one frame at a time.
fn write_frames<W: Write>(out: &mut W, config: &Config, cycles: u64, json: bool) -> Result<()> {
    let cycles = usize::try_from(cycles).context("Cycle count does not fit in memory")?;
    let mut typewriter = Typewriter::new(&config.typing)?;
    let frames = typewriter.schedule(cycles)?;

    if json {
        let mut ser = serde_json::Serializer::pretty(&mut *out);
        (&mut ser).collect_seq(frames)?;
        writeln!(out)?;
        return Ok(());
    }

    for frame in frames {
        writeln!(out, "{:>6}ms  {:?}", frame.delay.as_millis(), frame.text)?;
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(_) => {
                ctrl_c.await.ok();
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }
}
