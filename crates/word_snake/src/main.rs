//! Word-snake CLI
//!
//! Run games between two models and tally recorded results.
//!
//! Logging: set `RUST_LOG=word_snake=debug` to see every turn on stderr.

mod cli;

use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use word_snake::{
    create_agent, init_stderr, read_outcomes, CsvResultSink, ExperimentConfig, ExperimentLog,
    ExperimentRunner, Scoreboard,
};

use crate::cli::{Cli, Command, RunArgs};

/// Run stamp shared by the results and log directories.
fn run_stamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
        .to_string()
}

fn run_experiment(args: RunArgs) -> anyhow::Result<()> {
    init_stderr(args.verbose);

    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    let csv_path = args
        .output
        .clone()
        .unwrap_or_else(|| config.results_path(&run_stamp()));
    let log = ExperimentLog::in_dir(config.log_dir_for(&csv_path), args.verbose);

    let mut sink = CsvResultSink::open(&csv_path)?;

    let timeout = config.request_timeout();
    let mut agent_a = create_agent(&config.model_a, &config.ollama_host, timeout);
    let mut agent_b = create_agent(&config.model_b, &config.ollama_host, timeout);

    let runner = ExperimentRunner::new(config.game_config(), config.num_experiments)
        .with_error_policy(config.on_error);
    let report = runner.run(agent_a.as_mut(), agent_b.as_mut(), &mut sink, &log)?;

    let summary_path = csv_path.with_file_name("summary.json");
    if let Err(e) = report.save(&summary_path) {
        tracing::warn!("Failed to save summary to {}: {}", summary_path.display(), e);
    }

    println!();
    println!("{}", report.generate_report());
    println!("END OF ALL GAMES REACHED");
    Ok(())
}

fn show_summary(csv: &Path) -> anyhow::Result<()> {
    let outcomes = read_outcomes(csv)
        .with_context(|| format!("failed to load results from {}", csv.display()))?;
    if outcomes.is_empty() {
        println!("No games recorded in {}", csv.display());
        return Ok(());
    }

    let board = Scoreboard::from_outcomes(&outcomes);
    println!("{}", board.generate_report("Model A", "Model B"));

    // Gaps mark games that aborted without an outcome
    let mut ids: Vec<u32> = outcomes.iter().map(|o| o.game_id).collect();
    ids.sort_unstable();
    let expected = ids.last().copied().unwrap_or_default();
    if (ids.len() as u32) < expected {
        let missing: Vec<String> = (1..=expected)
            .filter(|id| ids.binary_search(id).is_err())
            .map(|id| id.to_string())
            .collect();
        println!("Missing games: {}", missing.join(", "));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run_experiment(args),
        Command::Summary { csv } => show_summary(&csv),
    }
}
