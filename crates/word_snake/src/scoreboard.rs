//! Win/loss tallies across an experiment

use serde::{Deserialize, Serialize};
use snake_core::{classify_reason, Outcome, Speaker, Termination, Winner};

/// Aggregated results of many games, from Model A's perspective.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub a_wins: u32,
    pub b_wins: u32,
    pub no_winner: u32,
    /// Games ended by a forfeit
    pub forfeits: u32,
    /// Games ended by a disqualification call
    pub disqualifications: u32,
    /// Games ended by an oversized reply
    pub too_long: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a Outcome>) -> Self {
        let mut board = Self::new();
        for outcome in outcomes {
            board.record(outcome);
        }
        board
    }

    pub fn record(&mut self, outcome: &Outcome) {
        match outcome.winner {
            Winner::Player(Speaker::A) => self.a_wins += 1,
            Winner::Player(Speaker::B) => self.b_wins += 1,
            Winner::Nobody => self.no_winner += 1,
        }
        match classify_reason(&outcome.reason) {
            Some(Termination::Forfeit) => self.forfeits += 1,
            Some(Termination::Disqualification) => self.disqualifications += 1,
            Some(Termination::TooLong) => self.too_long += 1,
            None => {}
        }
    }

    pub fn total_games(&self) -> u32 {
        self.a_wins + self.b_wins + self.no_winner
    }

    /// Score from Model A's perspective (1 for win, 0.5 for no winner, 0 for loss)
    pub fn score_a(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.a_wins as f64 + 0.5 * self.no_winner as f64) / total
    }

    /// Generate a text report
    pub fn generate_report(&self, model_a: &str, model_b: &str) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== {} vs {} ===\n\n", model_a, model_b));
        report.push_str(&format!(
            "{:<12} {:>6} {:>6} {:>10}\n",
            "Games", "A", "B", "No winner"
        ));
        report.push_str(&"-".repeat(37));
        report.push('\n');
        report.push_str(&format!(
            "{:<12} {:>6} {:>6} {:>10}\n",
            self.total_games(),
            self.a_wins,
            self.b_wins,
            self.no_winner
        ));
        report.push('\n');
        report.push_str(&format!(
            "Ended by: {} forfeit, {} disqualification, {} too long, {} no conclusion\n",
            self.forfeits, self.disqualifications, self.too_long, self.no_winner
        ));
        report.push_str(&format!("Model A score: {:.1}%\n", self.score_a() * 100.0));
        report
    }
}

#[cfg(test)]
#[path = "scoreboard_tests.rs"]
mod scoreboard_tests;
