//! Word-snake core: game vocabulary, transcripts, rules and the agent trait.

pub mod conversation;
pub mod rules;
pub mod transcript;
pub mod types;

pub use conversation::*;
pub use rules::*;
pub use transcript::*;
pub use types::*;

// =============================================================================
// Agent trait: implemented by every player backend (Ollama, scripted, ...)
// =============================================================================

/// Failure of a model backend to produce a reply.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// The endpoint could not be reached or the connection dropped.
    #[error("transport error: {0}")]
    Transport(String),
    /// The endpoint answered with a non-success HTTP status.
    #[error("endpoint returned status {0}")]
    Status(u16),
    /// The response body was not what the backend expected.
    #[error("malformed response: {0}")]
    Decode(String),
    /// The backend has nothing left to say.
    #[error("agent unavailable: {0}")]
    Unavailable(String),
}

/// A player in the game.
///
/// Implementations receive the full conversation as seen from their own side
/// and return one raw reply. The engine trims and judges the reply; backends
/// should not post-process it.
pub trait Agent {
    /// Produce the next reply for the given conversation view.
    fn reply(&mut self, messages: &[Message]) -> Result<String, InferenceError>;

    /// Identity of the backing model, used in logs and reports.
    fn name(&self) -> &str;

    /// Reset internal state before a new game.
    fn new_game(&mut self) {}
}

impl<T: Agent + ?Sized> Agent for Box<T> {
    fn reply(&mut self, messages: &[Message]) -> Result<String, InferenceError> {
        (**self).reply(messages)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn new_game(&mut self) {
        (**self).new_game()
    }
}
