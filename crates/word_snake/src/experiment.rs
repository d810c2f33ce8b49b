//! Experiment runner: plays a batch of games sequentially

use serde::{Deserialize, Serialize};
use snake_core::Agent;

use crate::game_runner::{GameConfig, GameError, GameRunner};
use crate::logging::ExperimentLog;
use crate::results::{ExperimentReport, ResultSink, SinkError};

/// What to do when a game aborts because an agent failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Record the failure, leave a gap in the results and move on
    #[default]
    Continue,
    /// Stop the whole batch at the first failed game
    Abort,
}

/// Errors that stop an experiment before all games are played.
#[derive(Debug, thiserror::Error)]
pub enum ExperimentError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("failed to record outcome: {0}")]
    Sink(#[from] SinkError),
    #[error("failed to open log for game {game_id}: {source}")]
    Log {
        game_id: u32,
        #[source]
        source: std::io::Error,
    },
}

/// Runs a fixed number of games between the same two agents
pub struct ExperimentRunner {
    games: GameRunner,
    num_games: u32,
    on_error: ErrorPolicy,
}

impl ExperimentRunner {
    pub fn new(config: GameConfig, num_games: u32) -> Self {
        Self {
            games: GameRunner::new(config),
            num_games,
            on_error: ErrorPolicy::default(),
        }
    }

    pub fn with_error_policy(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    pub fn num_games(&self) -> u32 {
        self.num_games
    }

    /// Play games `1..=num_games` in order, one at a time.
    ///
    /// Every completed game is written to `sink` before the next one starts.
    /// A game whose agent fails leaves no row; under [`ErrorPolicy::Abort`]
    /// the error is returned and the remaining games are skipped.
    pub fn run(
        &self,
        agent_a: &mut dyn Agent,
        agent_b: &mut dyn Agent,
        sink: &mut dyn ResultSink,
        log: &ExperimentLog,
    ) -> Result<ExperimentReport, ExperimentError> {
        let mut report = ExperimentReport::new(
            agent_a.name(),
            agent_b.name(),
            self.num_games,
            self.games.config().clone(),
        );

        for game_id in 1..=self.num_games {
            let dispatch = log
                .dispatch_for_game(game_id)
                .map_err(|source| ExperimentError::Log { game_id, source })?;

            let result = tracing::dispatcher::with_default(&dispatch, || {
                tracing::info!(game_id, "Running experiment {}", game_id);
                tracing::debug!("Models: {} vs {}", agent_a.name(), agent_b.name());
                tracing::debug!("Max turns: {}", self.games.config().max_turns);
                if let Some(path) = sink.location() {
                    tracing::debug!("CSV file: {}", path.display());
                }

                let result = self.games.play_game(game_id, &mut *agent_a, &mut *agent_b);
                if let Err(err) = &result {
                    tracing::error!(game_id, error = %err, "game aborted");
                }
                result
            });

            match result {
                Ok(outcome) => {
                    sink.record(&outcome)?;
                    report.add_outcome(outcome);
                }
                Err(err) => match self.on_error {
                    ErrorPolicy::Continue => report.add_failure(game_id, &err),
                    ErrorPolicy::Abort => return Err(err.into()),
                },
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
#[path = "experiment_tests.rs"]
mod experiment_tests;
