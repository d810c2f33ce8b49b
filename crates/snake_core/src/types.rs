//! Core value types shared by the game engine, the agents and the result sinks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two model-backed players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    A,
    B,
}

impl Speaker {
    /// The player moving on turn `index`: A on even turns, B on odd ones.
    #[inline]
    pub fn for_turn(index: u32) -> Self {
        if index % 2 == 0 {
            Speaker::A
        } else {
            Speaker::B
        }
    }

    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Speaker::A => Speaker::B,
            Speaker::B => Speaker::A,
        }
    }

    /// Role under which this speaker's replies are stored in the canonical
    /// (A-perspective) transcript.
    #[inline]
    pub fn canonical_role(self) -> Role {
        match self {
            Speaker::A => Role::Assistant,
            Speaker::B => Role::User,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speaker::A => "A",
            Speaker::B => "B",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Chat role as seen by a model endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Swap `user` and `assistant`; `system` is a fixed point.
    ///
    /// Applying this twice always yields the original role.
    #[inline]
    pub fn inverted(self) -> Self {
        match self {
            Role::System => Role::System,
            Role::User => Role::Assistant,
            Role::Assistant => Role::User,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit sent to a model endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// One recorded reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub content: String,
}

/// Who took the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    Player(Speaker),
    Nobody,
}

impl Winner {
    /// Label written to the results file.
    pub fn label(self) -> &'static str {
        match self {
            Winner::Player(Speaker::A) => "Model A",
            Winner::Player(Speaker::B) => "Model B",
            Winner::Nobody => "No winner",
        }
    }

    /// Inverse of [`Winner::label`].
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Model A" => Some(Winner::Player(Speaker::A)),
            "Model B" => Some(Winner::Player(Speaker::B)),
            "No winner" => Some(Winner::Nobody),
            _ => None,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Winner {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Winner {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Winner::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown winner label: {label}")))
    }
}

/// The single record a finished game leaves behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub game_id: u32,
    pub winner: Winner,
    pub reason: String,
}

/// Reason recorded when the turn cap runs out.
pub const NO_CONCLUSION: &str = "No conclusion";

impl Outcome {
    pub fn new(game_id: u32, winner: Winner, reason: impl Into<String>) -> Self {
        Self {
            game_id,
            winner,
            reason: reason.into(),
        }
    }

    /// Outcome of a game that hit the turn cap.
    pub fn no_conclusion(game_id: u32) -> Self {
        Self::new(game_id, Winner::Nobody, NO_CONCLUSION)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
