//! Game engine: plays one word-snake game between two agents

use serde::{Deserialize, Serialize};
use snake_core::{
    judge, view_for, Agent, InferenceError, Outcome, Speaker, Transcript, Winner,
    DEFAULT_STARTING_ANIMAL, DEFAULT_SYSTEM_PROMPT, MAX_REPLY_CHARS,
};

/// Configuration for a single game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Highest turn index played; a game lasts at most `max_turns + 1` replies
    pub max_turns: u32,
    /// Opening token, shown to A as the user's first message
    pub starting_animal: String,
    /// Rules given to both agents as the system message
    pub system_prompt: String,
    /// Replies longer than this (in characters) lose the game
    pub max_reply_chars: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_turns: 200,
            starting_animal: DEFAULT_STARTING_ANIMAL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_reply_chars: MAX_REPLY_CHARS,
        }
    }
}

/// A game aborted because an agent could not reply.
#[derive(Debug, thiserror::Error)]
#[error("game {game_id}: agent {speaker} failed on turn {turn}: {source}")]
pub struct GameError {
    pub game_id: u32,
    pub speaker: Speaker,
    pub turn: u32,
    #[source]
    pub source: InferenceError,
}

/// Where a game stands between turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameState {
    AwaitingA,
    AwaitingB,
    Finished(Outcome),
}

/// One game in progress.
///
/// Owns the transcript for its whole life; only the [`Outcome`] survives.
#[derive(Debug)]
pub struct Game<'a> {
    id: u32,
    config: &'a GameConfig,
    transcript: Transcript,
    state: GameState,
    turn: u32,
}

impl<'a> Game<'a> {
    pub fn new(id: u32, config: &'a GameConfig) -> Self {
        Self {
            id,
            config,
            transcript: Transcript::new(&config.system_prompt, &config.starting_animal),
            state: GameState::AwaitingA,
            turn: 0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Index of the next turn to be played
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Play one turn with whichever agent is due.
    ///
    /// Returns the outcome once the game is finished. Calling this on a
    /// finished game returns the same outcome again without invoking either
    /// agent.
    pub fn step(
        &mut self,
        agent_a: &mut dyn Agent,
        agent_b: &mut dyn Agent,
    ) -> Result<Option<Outcome>, GameError> {
        let (speaker, agent): (Speaker, &mut dyn Agent) = match &self.state {
            GameState::Finished(outcome) => return Ok(Some(outcome.clone())),
            GameState::AwaitingA => (Speaker::A, agent_a),
            GameState::AwaitingB => (Speaker::B, agent_b),
        };

        let view = view_for(&self.transcript, speaker);
        let raw = agent.reply(&view).map_err(|source| GameError {
            game_id: self.id,
            speaker,
            turn: self.turn,
            source,
        })?;
        let reply = raw.trim();

        tracing::debug!(
            game_id = self.id,
            turn = self.turn,
            speaker = %speaker,
            "{}-{}-{}: {}",
            self.id,
            self.turn + 1,
            speaker,
            reply
        );

        self.transcript.record(speaker, reply);

        if let Some(verdict) = judge(speaker, reply, self.config.max_reply_chars) {
            return Ok(Some(self.finish(verdict.into_outcome(self.id))));
        }

        if self.turn >= self.config.max_turns {
            return Ok(Some(self.finish(Outcome::no_conclusion(self.id))));
        }

        self.turn += 1;
        self.state = match speaker {
            Speaker::A => GameState::AwaitingB,
            Speaker::B => GameState::AwaitingA,
        };
        Ok(None)
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        self.state = GameState::Finished(outcome.clone());
        outcome
    }
}

/// Plays games between two agents
pub struct GameRunner {
    config: GameConfig,
}

impl GameRunner {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Play a single game to completion.
    ///
    /// An agent failure aborts the game and yields no outcome.
    pub fn play_game(
        &self,
        game_id: u32,
        agent_a: &mut dyn Agent,
        agent_b: &mut dyn Agent,
    ) -> Result<Outcome, GameError> {
        agent_a.new_game();
        agent_b.new_game();

        let mut game = Game::new(game_id, &self.config);
        tracing::debug!("{}-0-A: {}", game_id, self.config.starting_animal);

        loop {
            if let Some(outcome) = game.step(agent_a, agent_b)? {
                match outcome.winner {
                    Winner::Nobody => {
                        tracing::info!(game_id, "Experiment {}: Game ended without a winner", game_id)
                    }
                    winner => tracing::info!(
                        game_id,
                        winner = %winner,
                        reason = %outcome.reason,
                        "Experiment {}: Winner: {} - {}",
                        game_id,
                        winner,
                        outcome.reason
                    ),
                }
                return Ok(outcome);
            }
        }
    }
}

#[cfg(test)]
#[path = "game_runner_tests.rs"]
mod game_runner_tests;
