//! Scripted Word-Snake Player
//!
//! Replays a fixed list of replies, one per turn, starting over at every new
//! game. Useful for:
//! - Dry runs of the experiment pipeline without a model server
//! - Baseline opponents with known behaviour
//! - Driving the game engine deterministically in tests

use snake_core::{Agent, InferenceError, Message};


/// A player that answers from a script.
///
/// Every conversation view received in the current game is kept, so callers
/// can check exactly what the player was shown.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    name: String,
    replies: Vec<String>,
    cursor: usize,
    received: Vec<Vec<Message>>,
}

impl ScriptedAgent {
    pub fn new<I, S>(name: &str, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            replies: replies.into_iter().map(Into::into).collect(),
            cursor: 0,
            received: Vec::new(),
        }
    }

    /// Build from a comma-separated list, e.g. `"Elephant,Tiger"`.
    pub fn from_list(list: &str) -> Self {
        Self::new(
            &format!("scripted:{list}"),
            list.split(',').map(str::trim).filter(|r| !r.is_empty()),
        )
    }

    /// Conversation views received in the current game, oldest first.
    pub fn received(&self) -> &[Vec<Message>] {
        &self.received
    }

    /// Replies left in the current game.
    pub fn remaining(&self) -> usize {
        self.replies.len().saturating_sub(self.cursor)
    }
}

impl Agent for ScriptedAgent {
    fn reply(&mut self, messages: &[Message]) -> Result<String, InferenceError> {
        self.received.push(messages.to_vec());

        let reply = self.replies.get(self.cursor).cloned().ok_or_else(|| {
            InferenceError::Unavailable(format!(
                "{} ran out of replies after {} turns",
                self.name, self.cursor
            ))
        })?;
        self.cursor += 1;
        Ok(reply)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self) {
        self.cursor = 0;
        self.received.clear();
    }
}
