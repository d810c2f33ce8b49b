use super::*;

#[test]
fn defaults_describe_standard_experiment() {
    let config = ExperimentConfig::default();
    assert_eq!(config.num_experiments, 100);
    assert_eq!(config.max_turns, 200);
    assert_eq!(config.starting_animal, "Giraffe");
    assert_eq!(config.max_reply_chars, 30);
    assert_eq!(config.on_error, ErrorPolicy::Continue);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_toml_keeps_defaults() {
    let config = ExperimentConfig::from_toml_str(
        r#"
        model_a = "scripted:Elephant"
        num_experiments = 3
        request_timeout_secs = 60
        on_error = "abort"
        "#,
    )
    .unwrap();

    assert_eq!(config.model_a, "scripted:Elephant");
    assert_eq!(config.model_b, DEFAULT_MODEL_B);
    assert_eq!(config.num_experiments, 3);
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(60)));
    assert_eq!(config.on_error, ErrorPolicy::Abort);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = ExperimentConfig::from_toml_str("max_turn = 5").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ExperimentConfig::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("experiment.toml");
    std::fs::write(&path, "max_turns = 10\nstarting_animal = \"Zebra\"\n").unwrap();

    let config = ExperimentConfig::load(&path).unwrap();

    let game = config.game_config();
    assert_eq!(game.max_turns, 10);
    assert_eq!(game.starting_animal, "Zebra");
}

#[test]
fn validation_rejects_empty_runs() {
    let config = ExperimentConfig {
        num_experiments: 0,
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let config = ExperimentConfig {
        starting_animal: "  ".to_string(),
        ..Default::default()
    };
    assert!(config.validate().is_err());

    let config = ExperimentConfig {
        model_b: String::new(),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn results_and_logs_share_run_stamp() {
    let config = ExperimentConfig::default();
    let csv = config.results_path("1700000000");

    assert_eq!(csv, PathBuf::from("data/1700000000/game_results.csv"));
    assert_eq!(config.log_dir_for(&csv), PathBuf::from("logs/1700000000"));
    assert_eq!(
        config.log_dir_for(Path::new("results.csv")),
        PathBuf::from("logs")
    );
}
