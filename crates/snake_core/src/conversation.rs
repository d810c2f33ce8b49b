//! Conversation adapter: presents the shared transcript to either player.
//!
//! Both agents believe they are the `assistant` and that their opponent is the
//! `user`. The transcript is stored once from A's side, so B's view is the
//! same history with every non-system role swapped.

use crate::transcript::Transcript;
use crate::types::{Message, Speaker};

/// Messages `speaker` should receive for its next reply.
pub fn view_for(transcript: &Transcript, speaker: Speaker) -> Vec<Message> {
    match speaker {
        Speaker::A => transcript.messages().to_vec(),
        Speaker::B => swap_roles(transcript.messages()),
    }
}

/// Swap `user` and `assistant` on every message, leaving `system` untouched.
pub fn swap_roles(messages: &[Message]) -> Vec<Message> {
    messages
        .iter()
        .map(|m| Message::new(m.role.inverted(), m.content.clone()))
        .collect()
}

#[cfg(test)]
#[path = "conversation_tests.rs"]
mod conversation_tests;
