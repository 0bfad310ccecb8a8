use split_core::{
    config::{Config, ConfigManager},
    domain::SplitStrategy,
    money::Amount,
    split::PendingUpdate,
    SplitError, SplitSession,
};
use tempfile::TempDir;

#[test]
fn missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().into()).unwrap();

    let config = manager.load().unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.max_amount, Amount::new(100_000_000));
}

#[test]
fn saved_config_round_trips() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("nested");
    let manager = ConfigManager::with_base_dir(base).unwrap();
    let config = Config {
        max_amount: Amount::new(50_000),
        grouping_separator: '.',
        default_strategy: SplitStrategy::Custom,
    };

    manager.save(&config).unwrap();

    assert!(manager.path().exists());
    assert_eq!(manager.load().unwrap(), config);
}

#[test]
fn corrupt_config_reports_serde_error() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().into()).unwrap();
    std::fs::write(manager.path(), "{ not json").unwrap();

    assert!(matches!(manager.load(), Err(SplitError::Serde(_))));
}

#[test]
fn loaded_config_with_digit_separator_is_rejected() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().into()).unwrap();
    std::fs::write(manager.path(), r#"{ "grouping_separator": "0" }"#).unwrap();

    assert!(matches!(manager.load(), Err(SplitError::InvalidConfig(_))));
}

#[test]
fn loaded_config_with_zero_max_is_rejected() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().into()).unwrap();
    std::fs::write(manager.path(), r#"{ "max_amount": 0 }"#).unwrap();

    assert!(matches!(manager.load(), Err(SplitError::InvalidConfig(_))));
}

#[test]
fn invalid_config_is_never_written() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().into()).unwrap();
    let config = Config {
        grouping_separator: '5',
        ..Config::default()
    };

    assert!(matches!(manager.save(&config), Err(SplitError::InvalidConfig(_))));
    assert!(!manager.path().exists());
}

#[test]
fn session_honours_configured_limits() {
    let config = Config {
        max_amount: Amount::new(10_000),
        grouping_separator: '.',
        default_strategy: SplitStrategy::Custom,
        ..Config::default()
    };
    let mut session = SplitSession::with_config(config);
    session.add_participant("Alex");

    assert_eq!(session.pending().strategy, SplitStrategy::Custom);
    let pending = session
        .update_pending(PendingUpdate::SetAmountText("9.500".into()))
        .unwrap();
    assert_eq!(pending.amount, Amount::new(9_500));

    let err = session
        .update_pending(PendingUpdate::SetAmountText("10.001".into()))
        .unwrap_err();
    assert!(matches!(err, SplitError::AmountRejected { .. }));
    assert_eq!(session.pending().amount, Amount::new(9_500));
}
