//! Experiment results storage and reporting

use serde::{Deserialize, Serialize};
use snake_core::{Outcome, Winner};
use std::borrow::Cow;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::game_runner::GameConfig;
use crate::scoreboard::Scoreboard;

/// Column names of the results file.
pub const CSV_HEADER: [&str; 3] = ["experiment_number", "winner", "reason"];

/// Errors from storing or loading results.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl SinkError {
    fn io(path: &Path, source: io::Error) -> Self {
        SinkError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Append-only destination for game outcomes.
pub trait ResultSink {
    fn record(&mut self, outcome: &Outcome) -> Result<(), SinkError>;

    /// File backing this sink, if any
    fn location(&self) -> Option<&Path> {
        None
    }
}

impl ResultSink for Vec<Outcome> {
    fn record(&mut self, outcome: &Outcome) -> Result<(), SinkError> {
        self.push(outcome.clone());
        Ok(())
    }
}

/// Results file with one row per completed game.
///
/// The header is written only when the file is empty, so reopening an
/// existing file keeps appending below the old rows. Every row is flushed
/// as soon as it is recorded.
pub struct CsvResultSink {
    path: PathBuf,
    file: File,
}

impl CsvResultSink {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SinkError::io(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| SinkError::io(&path, e))?;
        let is_empty = file
            .metadata()
            .map(|m| m.len() == 0)
            .map_err(|e| SinkError::io(&path, e))?;

        if is_empty {
            file.write_all(format_row(&CSV_HEADER).as_bytes())
                .and_then(|_| file.flush())
                .map_err(|e| SinkError::io(&path, e))?;
        }

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for CsvResultSink {
    fn record(&mut self, outcome: &Outcome) -> Result<(), SinkError> {
        let id = outcome.game_id.to_string();
        let row = format_row(&[&id, outcome.winner.label(), &outcome.reason]);
        self.file
            .write_all(row.as_bytes())
            .and_then(|_| self.file.flush())
            .map_err(|e| SinkError::io(&self.path, e))
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Format one CSV row, quoting only fields that need it. Rows end in CRLF.
pub fn format_row(fields: &[&str]) -> String {
    let mut row = fields
        .iter()
        .map(|f| quote_field(f))
        .collect::<Vec<_>>()
        .join(",");
    row.push_str("\r\n");
    row
}

fn quote_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Split CSV text into records. Quoted fields may contain commas, doubled
/// quotes and line breaks. Returns the 1-based line of an unterminated quote
/// on failure.
fn parse_records(text: &str) -> Result<Vec<(usize, Vec<String>)>, usize> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut quote_line = 0;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                records.push((record_line, std::mem::take(&mut fields)));
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(quote_line);
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push((record_line, fields));
    }
    Ok(records)
}

/// Load outcomes back from a results file written by [`CsvResultSink`].
pub fn read_outcomes(path: &Path) -> Result<Vec<Outcome>, SinkError> {
    let text = fs::read_to_string(path).map_err(|e| SinkError::io(path, e))?;
    let parse_error = |line: usize, message: String| SinkError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    };

    let records = parse_records(&text)
        .map_err(|line| parse_error(line, "unterminated quoted field".to_string()))?;

    let mut outcomes = Vec::new();
    for (index, (line, record)) in records.into_iter().enumerate() {
        if index == 0 && record.iter().map(String::as_str).eq(CSV_HEADER) {
            continue;
        }
        let [id, winner, reason]: [String; 3] = record.try_into().map_err(|r: Vec<String>| {
            parse_error(line, format!("expected 3 fields, found {}", r.len()))
        })?;
        let game_id = id
            .trim()
            .parse()
            .map_err(|_| parse_error(line, format!("invalid game id: {id:?}")))?;
        let winner = Winner::from_label(&winner)
            .ok_or_else(|| parse_error(line, format!("unknown winner: {winner:?}")))?;
        outcomes.push(Outcome::new(game_id, winner, reason));
    }

    Ok(outcomes)
}

/// A game that aborted without an outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedGame {
    pub game_id: u32,
    pub error: String,
}

/// Complete experiment results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub model_a: String,
    pub model_b: String,
    /// Number of games scheduled
    pub num_games: u32,
    /// Configuration every game was played with
    pub game: GameConfig,
    /// Outcomes of completed games, in game-id order
    pub outcomes: Vec<Outcome>,
    /// Games aborted by an agent failure
    pub failures: Vec<FailedGame>,
    pub scoreboard: Scoreboard,
}

impl ExperimentReport {
    pub fn new(model_a: &str, model_b: &str, num_games: u32, game: GameConfig) -> Self {
        Self {
            model_a: model_a.to_string(),
            model_b: model_b.to_string(),
            num_games,
            game,
            outcomes: Vec::new(),
            failures: Vec::new(),
            scoreboard: Scoreboard::new(),
        }
    }

    pub fn add_outcome(&mut self, outcome: Outcome) {
        self.scoreboard.record(&outcome);
        self.outcomes.push(outcome);
    }

    pub fn add_failure(&mut self, game_id: u32, error: &dyn std::error::Error) {
        self.failures.push(FailedGame {
            game_id,
            error: error.to_string(),
        });
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize: {}", e))?;
        fs::write(path, json).map_err(|e| format!("Failed to write: {}", e))
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path).map_err(|e| format!("Failed to read: {}", e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse: {}", e))
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = self.scoreboard.generate_report(&self.model_a, &self.model_b);
        report.push_str(&format!(
            "Config: {} games, max {} turns, opening {:?}\n",
            self.num_games, self.game.max_turns, self.game.starting_animal
        ));
        if !self.failures.is_empty() {
            report.push_str(&format!("\nAborted games ({}):\n", self.failures.len()));
            for failure in &self.failures {
                report.push_str(&format!("  #{}: {}\n", failure.game_id, failure.error));
            }
        }
        report
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
