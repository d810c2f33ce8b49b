//! Append-only game transcript stored from Agent A's perspective.

use crate::types::{Message, Role, Speaker, Turn};

/// Default system instruction given to both players.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are playing a game of word-snake.
In this game, you need to respond with an animal name that starts with the last letter of the previous animal mentioned.
You are not allowed to repeat any animal that has already been mentioned.
If the other player breaks a rule, respond with: 'Disqualified [reason].'
If you can't think of a valid animal name, respond with: 'I forfeit the game.'
Otherwise, Respond only with the animal name. Do not include any other text.";

/// Default opening token.
pub const DEFAULT_STARTING_ANIMAL: &str = "Giraffe";

/// Conversation history for one game.
///
/// The first two messages are the system instruction and the opening token
/// (as `user`). Every later message is a player reply stored under
/// [`Speaker::canonical_role`], so the whole history reads correctly for
/// Agent A and needs a full role swap for Agent B.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

/// Number of seed messages preceding the first reply.
const SEED_LEN: usize = 2;

impl Transcript {
    pub fn new(system_prompt: &str, starting_animal: &str) -> Self {
        Self {
            messages: vec![Message::system(system_prompt), Message::user(starting_animal)],
        }
    }

    /// Record a reply and return the stored message.
    pub fn record(&mut self, speaker: Speaker, content: impl Into<String>) -> &Message {
        self.messages
            .push(Message::new(speaker.canonical_role(), content));
        &self.messages[self.messages.len() - 1]
    }

    /// Canonical messages, system instruction first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn starting_animal(&self) -> &str {
        &self.messages[1].content
    }

    /// Player replies in the order they were recorded.
    pub fn turns(&self) -> impl Iterator<Item = Turn> + '_ {
        self.messages[SEED_LEN..].iter().map(|m| Turn {
            speaker: match m.role {
                Role::Assistant => Speaker::A,
                _ => Speaker::B,
            },
            content: m.content.clone(),
        })
    }

    /// Number of replies recorded so far.
    pub fn turn_count(&self) -> usize {
        self.messages.len() - SEED_LEN
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT, DEFAULT_STARTING_ANIMAL)
    }
}
