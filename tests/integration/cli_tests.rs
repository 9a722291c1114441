use crate::common::write_ledger;
use elo_ladder::utils::test_utils::generate_match_record;
use serde_json::Value;
use serial_test::serial;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_elo-ladder"))
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("ELO_K_FACTOR")
        .env_remove("ELO_DEFAULT_RATING")
        .output()
        .expect("Failed to execute elo-ladder")
}

fn ledger() -> String {
    let records = vec![
        generate_match_record("a", "b", 16, -16, "2025-01-05T10:00:00Z"),
        generate_match_record("c", "a", 17, -17, "2025-01-06T10:00:00Z"),
        generate_match_record("c", "b", 14, -14, "2025-02-02T10:00:00Z"),
    ];

    write_ledger(&records).to_string_lossy().to_string()
}

#[test]
#[serial]
fn test_leaderboard_output() {
    let path = ledger();
    let output = run(&["--ledger", &path, "leaderboard"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let players: Value = serde_json::from_slice(&output.stdout).unwrap();
    let standings: Vec<(String, i64)> = players
        .as_array()
        .unwrap()
        .iter()
        .map(|p| (p["id"].as_str().unwrap().to_string(), p["rating"].as_i64().unwrap()))
        .collect();

    assert_eq!(
        standings,
        vec![("c".to_string(), 1231), ("a".to_string(), 1199), ("b".to_string(), 1170)]
    );
}

#[test]
#[serial]
fn test_history_output() {
    let path = ledger();
    let output = run(&["--ledger", &path, "history", "--player", "a"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let history: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(history["currentRating"], 1199);
    assert_eq!(history["highest"], 1216);
    assert_eq!(history["lifetimeChange"], -1);
}

#[test]
#[serial]
fn test_custom_default_rating() {
    let path = ledger();
    let output = run(&["--ledger", &path, "--default-rating", "1500", "odds", "-a", "a", "-b", "c"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let odds: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(odds["playerA"]["rating"], 1499);
    assert_eq!(odds["playerB"]["rating"], 1531);
    assert_eq!(odds["playerA"]["level"], "underdog");
}

#[test]
#[serial]
fn test_unknown_player_fails() {
    let path = ledger();
    let output = run(&["--ledger", &path, "history", "--player", "ghost"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Player not found: ghost"));
}

#[test]
#[serial]
fn test_missing_ledger_fails() {
    let output = run(&["--ledger", "/nonexistent/ledger.json", "leaderboard"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read ledger"));
}

#[test]
#[serial]
fn test_ledger_with_foreign_winner_fails() {
    let mut record = generate_match_record("a", "b", 16, -16, "2025-01-05T10:00:00Z");
    record.winner_id = "zzz".to_string();
    let path = write_ledger(&[record]).to_string_lossy().to_string();

    let output = run(&["--ledger", &path, "leaderboard"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Winner zzz is not a participant"));
}
