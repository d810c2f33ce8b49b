use super::*;
use scripted_agent::ScriptedAgent;
use snake_core::{InferenceError, Message, Outcome, Speaker, Winner};

/// Answers "Elephant" except in one game, where it fails.
struct FlakyAgent {
    game: u32,
    fail_in_game: u32,
}

impl Agent for FlakyAgent {
    fn reply(&mut self, _messages: &[Message]) -> Result<String, InferenceError> {
        if self.game == self.fail_in_game {
            Err(InferenceError::Transport("connection reset".to_string()))
        } else {
            Ok("Elephant".to_string())
        }
    }

    fn name(&self) -> &str {
        "flaky"
    }

    fn new_game(&mut self) {
        self.game += 1;
    }
}

fn forfeiting_b() -> ScriptedAgent {
    ScriptedAgent::new("quitter", ["I forfeit the game."])
}

#[test]
fn games_are_numbered_from_one_in_order() {
    let runner = ExperimentRunner::new(GameConfig::default(), 3);
    let mut a = ScriptedAgent::new("a", ["Elephant"]);
    let mut b = forfeiting_b();
    let mut sink: Vec<Outcome> = Vec::new();

    let report = runner
        .run(&mut a, &mut b, &mut sink, &ExperimentLog::inherit())
        .unwrap();

    let ids: Vec<u32> = sink.iter().map(|o| o.game_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(sink
        .iter()
        .all(|o| o.winner == Winner::Player(Speaker::A) && o.reason == "B forfeited"));
    assert_eq!(report.outcomes, sink);
    assert_eq!(report.scoreboard.a_wins, 3);
    assert!(report.failures.is_empty());
}

#[test]
fn each_game_starts_from_fresh_transcript() {
    let runner = ExperimentRunner::new(GameConfig::default(), 2);
    let mut a = ScriptedAgent::new("a", ["Elephant"]);
    let mut b = forfeiting_b();
    let mut sink: Vec<Outcome> = Vec::new();

    runner
        .run(&mut a, &mut b, &mut sink, &ExperimentLog::inherit())
        .unwrap();

    // Only the last game's views are kept; it opens like the first one did
    let config = GameConfig::default();
    assert_eq!(
        a.received(),
        &[vec![
            Message::system(config.system_prompt.as_str()),
            Message::user(config.starting_animal.as_str()),
        ]]
    );
}

#[test]
fn failed_game_leaves_gap_and_continues() {
    let runner = ExperimentRunner::new(GameConfig::default(), 3);
    let mut a = FlakyAgent {
        game: 0,
        fail_in_game: 2,
    };
    let mut b = forfeiting_b();
    let mut sink: Vec<Outcome> = Vec::new();

    let report = runner
        .run(&mut a, &mut b, &mut sink, &ExperimentLog::inherit())
        .unwrap();

    let ids: Vec<u32> = sink.iter().map(|o| o.game_id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].game_id, 2);
    assert!(report.failures[0].error.contains("connection reset"));
}

#[test]
fn abort_policy_stops_at_first_failure() {
    let runner =
        ExperimentRunner::new(GameConfig::default(), 3).with_error_policy(ErrorPolicy::Abort);
    let mut a = FlakyAgent {
        game: 0,
        fail_in_game: 2,
    };
    let mut b = forfeiting_b();
    let mut sink: Vec<Outcome> = Vec::new();

    let err = runner
        .run(&mut a, &mut b, &mut sink, &ExperimentLog::inherit())
        .unwrap_err();

    match err {
        ExperimentError::Game(game) => {
            assert_eq!(game.game_id, 2);
            assert_eq!(game.speaker, Speaker::A);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(sink.len(), 1);
    assert_eq!(sink[0].game_id, 1);
}

#[test]
fn per_game_log_files_capture_turns() {
    let dir = tempfile::tempdir().unwrap();
    let log = ExperimentLog::in_dir(dir.path().join("logs"), false);
    let runner = ExperimentRunner::new(GameConfig::default(), 2);
    let mut a = ScriptedAgent::new("a", ["Elephant"]);
    let mut b = forfeiting_b();
    let mut sink: Vec<Outcome> = Vec::new();

    runner.run(&mut a, &mut b, &mut sink, &log).unwrap();

    for game_id in 1..=2 {
        let path = log.game_log_path(game_id).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains(&format!("Running experiment {game_id}")), "{text}");
        assert!(text.contains(&format!("{game_id}-1-A: Elephant")), "{text}");
        assert!(text.contains("Winner: Model A - B forfeited"), "{text}");
    }
}

#[test]
fn error_policy_parses_lowercase() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        on_error: ErrorPolicy,
    }
    let parsed: Wrapper = toml::from_str("on_error = \"abort\"").unwrap();
    assert_eq!(parsed.on_error, ErrorPolicy::Abort);
    assert_eq!(ErrorPolicy::default(), ErrorPolicy::Continue);
}

#[test]
fn results_path_reaches_every_game_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = ExperimentLog::in_dir(dir.path().join("logs"), false);
    let csv_path = dir.path().join("data").join("game_results.csv");
    let mut sink = crate::results::CsvResultSink::open(&csv_path).unwrap();
    let runner = ExperimentRunner::new(GameConfig::default(), 2);
    let mut a = ScriptedAgent::new("a", ["Elephant"]);
    let mut b = forfeiting_b();

    runner.run(&mut a, &mut b, &mut sink, &log).unwrap();

    for game_id in 1..=2 {
        let text = std::fs::read_to_string(log.game_log_path(game_id).unwrap()).unwrap();
        assert!(text.contains("Models: a vs quitter"), "{text}");
        assert!(text.contains("Max turns: 200"), "{text}");
        assert!(
            text.contains(&format!("CSV file: {}", csv_path.display())),
            "{text}"
        );
    }
}
