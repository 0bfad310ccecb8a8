use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn script(home: &TempDir, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("split_core_cli")
        .unwrap()
        .env("SPLIT_CORE_CLI_SCRIPT", "1")
        .env("SPLIT_CORE_HOME", home.path())
        .env("RUST_LOG", "off")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn script_mode_records_equal_split() {
    let home = TempDir::new().unwrap();
    let input = "add A\nadd B\nadd C\nname Lunch\namount 9,000\npayer A\ncommit\nlog\nexit\n";

    script(&home, input)
        .success()
        .stdout(contains("Recorded `Lunch` (9,000, Equal)"))
        .stdout(contains("-6,000  is owed"))
        .stdout(contains("3,000  owes"))
        .stdout(contains("Total"));
}

#[test]
fn script_mode_records_custom_split() {
    let home = TempDir::new().unwrap();
    let input = concat!(
        "add A\nadd B\nadd C\n",
        "name Trip\namount 10000\nstrategy custom\n",
        "payer 1\ncustom 1 4,000\ncommit\n",
    );

    script(&home, input)
        .success()
        .stdout(contains("Recorded `Trip` (10,000, Custom)"))
        .stdout(contains("-6,000"));
}

#[test]
fn validation_failures_are_reported_and_shell_continues() {
    let home = TempDir::new().unwrap();
    let input = "add A\ncommit\namount 500\nname Snack\ncommit\npayer A\ncommit\n";

    script(&home, input)
        .success()
        .stdout(contains("Enter a name for the expense"))
        .stdout(contains("Select who paid for the expense"))
        .stdout(contains("Recorded `Snack`"));
}

#[test]
fn unknown_commands_get_suggestions() {
    let home = TempDir::new().unwrap();

    script(&home, "comit\n")
        .success()
        .stdout(contains("Unknown command `comit`"))
        .stdout(contains("Suggestion: `commit`?"));
}

#[test]
fn over_max_amount_is_rejected() {
    let home = TempDir::new().unwrap();

    script(&home, "amount 100,000,001\npending\n")
        .success()
        .stdout(contains("exceeds the maximum"))
        .stdout(contains("Amount:   0"));
}

#[test]
fn config_changes_persist_between_runs() {
    let home = TempDir::new().unwrap();

    script(&home, "config max 5000\n")
        .success()
        .stdout(contains("Configuration saved"));
    assert!(home.path().join("config.json").exists());

    script(&home, "amount 6000\nconfig\n")
        .success()
        .stdout(contains("exceeds the maximum of 5,000"))
        .stdout(contains("max        5,000"));
}

#[test]
fn config_setter_rejects_digit_separator() {
    let home = TempDir::new().unwrap();

    script(&home, "config separator 0\nconfig max 0\n")
        .success()
        .stdout(contains("grouping_separator must be a visible non-digit character"))
        .stdout(contains("max_amount must be positive"))
        .stdout(contains("Configuration saved").not());
    assert!(!home.path().join("config.json").exists());
}

#[test]
fn corrupt_config_stops_the_shell() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.json"),
        r#"{ "grouping_separator": "0" }"#,
    )
    .unwrap();

    script(&home, "amount 10000\n")
        .failure()
        .stderr(contains("Invalid configuration"));
}

#[test]
fn numeric_names_resolve_when_no_such_position_exists() {
    let home = TempDir::new().unwrap();
    let input = "add Alex\nadd 7\nname Cab\namount 800\npayer 7\ncommit\n";

    script(&home, input)
        .success()
        .stdout(contains("Recorded `Cab`"))
        .stdout(contains("-400  is owed"));
}

#[test]
fn removing_referenced_participant_is_refused() {
    let home = TempDir::new().unwrap();
    let input = "add A\nadd B\nname Bus\namount 600\npayer A\ncommit\nremove B\npeople\n";

    script(&home, input)
        .success()
        .stdout(contains("cannot be removed"))
        .stdout(contains("2. B"))
        .stdout(contains("Removed").not());
}
