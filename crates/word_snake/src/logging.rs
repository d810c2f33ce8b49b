//! Log handles for experiment runs.
//!
//! Each game can get its own log file. Instead of registering file handlers
//! on a process-wide logger, the runner asks [`ExperimentLog`] for a
//! [`Dispatch`] per game and installs it only while that game is played.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Crates whose events land in per-game log files.
const LOGGED_CRATES: [&str; 3] = ["word_snake", "snake_core", "ollama_agent"];

/// Stderr filter: `RUST_LOG` wins, otherwise info (debug when verbose).
pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "word_snake=debug"
        } else {
            "word_snake=info"
        })
    })
}

/// Install the process-wide stderr subscriber. Safe to call more than once.
pub fn init_stderr(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(io::stderr)
        .try_init();
}

/// Logging scope of one experiment run.
#[derive(Debug, Clone, Default)]
pub struct ExperimentLog {
    dir: Option<PathBuf>,
    verbose: bool,
}

impl ExperimentLog {
    /// Send game events to whatever subscriber is already active.
    pub fn inherit() -> Self {
        Self::default()
    }

    /// Write `experiment-<id>.log` files under `dir`, mirroring to stderr.
    pub fn in_dir(dir: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            dir: Some(dir.into()),
            verbose,
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Log file used for `game_id`, if file logging is on.
    pub fn game_log_path(&self, game_id: u32) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(format!("experiment-{game_id}.log")))
    }

    /// Build the dispatcher to install while `game_id` is played.
    pub fn dispatch_for_game(&self, game_id: u32) -> io::Result<Dispatch> {
        let (Some(dir), Some(path)) = (&self.dir, self.game_log_path(game_id)) else {
            return Ok(tracing::dispatcher::get_default(|current| current.clone()));
        };

        fs::create_dir_all(dir)?;
        let file = File::create(&path)?;

        let file_targets = LOGGED_CRATES
            .iter()
            .fold(Targets::new(), |targets, krate| {
                targets.with_target(*krate, LevelFilter::DEBUG)
            });

        let subscriber = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_filter(env_filter(self.verbose)),
            )
            .with(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false)
                    .with_filter(file_targets),
            );

        Ok(Dispatch::new(subscriber))
    }
}
