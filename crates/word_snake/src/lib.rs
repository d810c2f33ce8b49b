//! Word-Snake Experiment Runner
//!
//! This crate provides infrastructure for:
//! - Playing word-snake games between two language-model agents
//! - Running numbered batches of games and recording every outcome to CSV
//! - Summarizing recorded results for later analysis
//!
//! # Usage
//!
//! ```bash
//! # Run 100 games between two Ollama models
//! cargo run -p word_snake -- run --model-a llama3:8b --model-b gemma2:9b --num-experiments 100
//!
//! # Dry run without a model server
//! cargo run -p word_snake -- run --model-a scripted:Elephant --model-b "scripted:I forfeit" --num-experiments 3
//!
//! # Tally an earlier run
//! cargo run -p word_snake -- summary data/1700000000/game_results.csv
//! ```

mod agents;
mod config;
mod experiment;
mod game_runner;
mod logging;
mod results;
mod scoreboard;

pub use agents::*;
pub use config::*;
pub use experiment::*;
pub use game_runner::*;
pub use logging::*;
pub use results::*;
pub use scoreboard::*;
