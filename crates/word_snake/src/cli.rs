use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use word_snake::{ErrorPolicy, ExperimentConfig};

/// Word-snake experiment runner
#[derive(Parser, Debug)]
#[command(name = "word-snake", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a batch of games and record the winners
    Run(RunArgs),
    /// Print the scoreboard of a results file
    Summary {
        /// Path to a game_results.csv file
        csv: PathBuf,
    },
}

/// Flags for `run`. Anything given here overrides the config file.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// TOML file with experiment settings
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Player A: model name, `ollama:<model>` or `scripted:<r1>,<r2>`
    #[arg(long, alias = "model_a")]
    pub model_a: Option<String>,
    /// Player B: model name, `ollama:<model>` or `scripted:<r1>,<r2>`
    #[arg(long, alias = "model_b")]
    pub model_b: Option<String>,
    /// Number of games to play
    #[arg(long, alias = "num_experiments")]
    pub num_experiments: Option<u32>,
    /// Max turns per game
    #[arg(long, alias = "max_turns")]
    pub max_turns: Option<u32>,
    /// Opening animal
    #[arg(long)]
    pub starting_animal: Option<String>,
    /// Ollama server URL
    #[arg(long)]
    pub host: Option<String>,
    /// Per-request timeout in seconds for model calls
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    /// Directory for per-run results
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Directory for per-run logs
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
    /// Write results to this CSV instead of `<data-dir>/<timestamp>/game_results.csv`
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// What to do when a model call fails
    #[arg(long, value_enum)]
    pub on_error: Option<ErrorPolicy>,
    /// Debug-level logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut ExperimentConfig) {
        if let Some(model) = &self.model_a {
            config.model_a = model.clone();
        }
        if let Some(model) = &self.model_b {
            config.model_b = model.clone();
        }
        if let Some(n) = self.num_experiments {
            config.num_experiments = n;
        }
        if let Some(n) = self.max_turns {
            config.max_turns = n;
        }
        if let Some(animal) = &self.starting_animal {
            config.starting_animal = animal.clone();
        }
        if let Some(host) = &self.host {
            config.ollama_host = host.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout_secs = Some(secs);
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = dir.clone();
        }
        if let Some(policy) = self.on_error {
            config.on_error = policy;
        }
    }
}
