//! Termination rules evaluated after every reply.
//!
//! The checks run in a fixed order and the first match wins:
//! forfeit, then disqualification, then oversized reply. Forfeit and
//! disqualification replies are usually long, so the length check has to
//! come last.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Outcome, Speaker, Winner};

/// Longest reply still accepted as a single animal name.
pub const MAX_REPLY_CHARS: usize = 30;

/// Why a game ended before the turn cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The speaker gave up.
    Forfeit,
    /// The speaker accused the opponent of breaking a rule.
    Disqualification,
    /// The reply was too long to be an animal name.
    TooLong,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Termination::Forfeit => "forfeit",
            Termination::Disqualification => "disqualification",
            Termination::TooLong => "too long",
        })
    }
}

/// A rule firing on one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub kind: Termination,
    pub winner: Speaker,
    pub reason: String,
}

impl Verdict {
    pub fn into_outcome(self, game_id: u32) -> Outcome {
        Outcome::new(game_id, Winner::Player(self.winner), self.reason)
    }
}

/// Classify `reply` spoken by `speaker`. Returns `None` if play continues.
///
/// Keyword matches are case-insensitive substring checks. Length is counted
/// in characters, not bytes.
pub fn judge(speaker: Speaker, reply: &str, max_chars: usize) -> Option<Verdict> {
    let lowered = reply.to_lowercase();

    if lowered.contains("forfeit") {
        return Some(Verdict {
            kind: Termination::Forfeit,
            winner: speaker.opponent(),
            reason: format!("{speaker} forfeited"),
        });
    }

    // The accuser wins: the penalty falls on the speaker's opponent.
    if lowered.contains("disqualified") {
        return Some(Verdict {
            kind: Termination::Disqualification,
            winner: speaker,
            reason: format!("{} disqualified: {reply}", speaker.opponent()),
        });
    }

    if reply.chars().count() > max_chars {
        return Some(Verdict {
            kind: Termination::TooLong,
            winner: speaker.opponent(),
            reason: format!("{speaker} response too long (so not an animal)"),
        });
    }

    None
}

/// Recover the rule that produced a recorded reason, if any.
pub fn classify_reason(reason: &str) -> Option<Termination> {
    if reason.ends_with(" forfeited") {
        Some(Termination::Forfeit)
    } else if reason.contains(" disqualified: ") {
        Some(Termination::Disqualification)
    } else if reason.ends_with(" response too long (so not an animal)") {
        Some(Termination::TooLong)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
