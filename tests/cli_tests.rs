//! CLI integration tests
//!
//! Tests the command-line interface using assert_cmd

mod common;

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `teammate` command isolated from any user-level configuration
fn teammate_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("teammate").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("TEAMMATE_CONFIG")
        .env_remove("TEAMMATE_TEAM_SIZE")
        .env_remove("TEAMMATE_SEED")
        .env_remove("TEAMMATE_ROSTER")
        .env_remove("TEAMMATE_TEAMS_OUTPUT")
        .env_remove("TEAMMATE_LOG_LEVEL");
    cmd
}

const TEN_SCORES: [u8; 10] = [95, 91, 60, 55, 75, 80, 72, 88, 70, 85];

// ─────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    teammate_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("allocate"))
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("version"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command() {
    let temp = TempDir::new().unwrap();
    teammate_cmd(temp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("teammate"))
        .stdout(predicate::str::contains("Build Information"))
        .stdout(predicate::str::contains("Git Hash"));
}

#[test]
fn test_missing_subcommand() {
    let temp = TempDir::new().unwrap();
    teammate_cmd(temp.path()).assert().failure();
}

// ─────────────────────────────────────────────────────────────────
// Classify Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_classify_leader() {
    let temp = TempDir::new().unwrap();
    teammate_cmd(temp.path())
        .args(["classify", "95"])
        .assert()
        .success()
        .stdout(predicate::str::contains("95: Leader (90-100)"));
}

#[test]
fn test_classify_band_edges() {
    let temp = TempDir::new().unwrap();
    teammate_cmd(temp.path())
        .args(["classify", "69"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thinker (50-69)"));
    teammate_cmd(temp.path())
        .args(["classify", "70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balanced (70-89)"));
}

#[test]
fn test_classify_out_of_range() {
    let temp = TempDir::new().unwrap();
    teammate_cmd(temp.path())
        .args(["classify", "40"])
        .assert()
        .failure()
        .code(30)
        .stderr(predicate::str::contains("E300"))
        .stderr(predicate::str::contains("personality_score"));
}

// ─────────────────────────────────────────────────────────────────
// Allocate Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_allocate_prints_teams_and_analysis() {
    let temp = TempDir::new().unwrap();
    let roster = common::write_roster(temp.path(), &TEN_SCORES);

    teammate_cmd(temp.path())
        .arg("allocate")
        .arg("--roster")
        .arg(&roster)
        .args(["--team-size", "5", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("T1 - Team 1 (Size: 5"))
        .stdout(predicate::str::contains("T2 - Team 2 (Size: 5"))
        .stdout(predicate::str::contains("Team Leader:"))
        .stdout(predicate::str::contains("Formation Analysis"))
        .stdout(predicate::str::contains("left over").not());
}

#[test]
fn test_allocate_is_reproducible_with_seed() {
    let temp = TempDir::new().unwrap();
    let roster = common::write_roster(temp.path(), &TEN_SCORES);

    let run = || {
        teammate_cmd(temp.path())
            .arg("-q")
            .arg("allocate")
            .arg("--roster")
            .arg(&roster)
            .args(["-k", "5", "-s", "7"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_allocate_reports_leftover() {
    let temp = TempDir::new().unwrap();
    let mut scores = TEN_SCORES.to_vec();
    scores.push(66);
    let roster = common::write_roster(temp.path(), &scores);

    teammate_cmd(temp.path())
        .arg("allocate")
        .arg("--roster")
        .arg(&roster)
        .args(["--team-size", "5", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 participant(s) left over"));
}

#[test]
fn test_allocate_writes_report() {
    let temp = TempDir::new().unwrap();
    let roster = common::write_roster(temp.path(), &TEN_SCORES);
    let output = temp.path().join("out").join("teams.json");

    teammate_cmd(temp.path())
        .arg("allocate")
        .arg("--roster")
        .arg(&roster)
        .args(["--team-size", "5", "--seed", "3", "--output"])
        .arg(&output)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report["plan"]["team_count"], 2);
    assert_eq!(report["plan"]["dropped"], 0);
    assert_eq!(report["teams"].as_array().unwrap().len(), 2);
    assert_eq!(report["teams"][0]["members"].as_array().unwrap().len(), 5);
    assert_eq!(report["analysis"]["status"], "summary");
    assert_eq!(report["analysis"]["total_participants"], 10);
}

#[test]
fn test_allocate_team_too_large() {
    let temp = TempDir::new().unwrap();
    let roster = common::write_roster(temp.path(), &[90, 60, 75]);

    teammate_cmd(temp.path())
        .arg("allocate")
        .arg("--roster")
        .arg(&roster)
        .args(["--team-size", "5"])
        .assert()
        .failure()
        .code(10)
        .stderr(predicate::str::contains("Not enough participants (3) for team size 5"));
}

#[test]
fn test_allocate_missing_roster() {
    let temp = TempDir::new().unwrap();

    teammate_cmd(temp.path())
        .arg("allocate")
        .arg("--roster")
        .arg(temp.path().join("nope.json"))
        .assert()
        .failure()
        .code(50);
}

#[test]
fn test_allocate_expands_tilde_in_roster_argument() {
    let temp = TempDir::new().unwrap();
    common::write_roster(temp.path(), &TEN_SCORES);

    teammate_cmd(temp.path())
        .args(["allocate", "--roster", "~/participants.json", "-k", "5", "-s", "4"])
        .args(["--output", "~/teams.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("T2 - Team 2 (Size: 5"));

    assert!(temp.path().join("teams.json").exists());
}

#[test]
fn test_allocate_uses_config_file() {
    let temp = TempDir::new().unwrap();
    let roster = common::write_roster(temp.path(), &[95, 60, 75, 91, 55, 80]);
    let config = temp.path().join("teammate.toml");
    fs::write(
        &config,
        format!(
            "[allocation]\nteam_size = 3\nseed = 8\n\n[roster]\npath = {:?}\n",
            roster.to_string_lossy()
        ),
    )
    .unwrap();

    teammate_cmd(temp.path())
        .arg("allocate")
        .assert()
        .success()
        .stdout(predicate::str::contains("T2 - Team 2 (Size: 3"));
}

// ─────────────────────────────────────────────────────────────────
// Config Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_default() {
    let temp = TempDir::new().unwrap();
    teammate_cmd(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[allocation]"))
        .stdout(predicate::str::contains("team_size = 5"))
        .stdout(predicate::str::contains("[roster]"))
        .stdout(predicate::str::contains("[logging]"));
}

#[test]
fn test_config_validate_default() {
    let temp = TempDir::new().unwrap();
    teammate_cmd(temp.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_validate_nonexistent_file() {
    let temp = TempDir::new().unwrap();
    teammate_cmd(temp.path())
        .args(["config", "validate", "--config", "/nonexistent/path/config.toml"])
        .assert()
        .failure()
        .code(40)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("conf").join("teammate.toml");

    teammate_cmd(temp.path())
        .args(["config", "init", "--path"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file created"));
    assert!(path.exists());

    teammate_cmd(temp.path())
        .args(["config", "init", "--path"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    teammate_cmd(temp.path())
        .args(["config", "init", "--force", "--path"])
        .arg(&path)
        .assert()
        .success();
}
