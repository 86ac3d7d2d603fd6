//! Roster persistence tests

mod common;

use std::fs;

use tempfile::TempDir;

use teammate::roster::filter_unseen;
use teammate::{Error, IdGenerator, JsonRoster, RecordSource, TeamAllocator};

#[test]
fn test_roster_file_feeds_allocation() {
    let temp = TempDir::new().unwrap();
    let path = common::write_roster(temp.path(), &[95, 92, 60, 65, 75, 80, 85, 70]);

    let ids = IdGenerator::new();
    let roster = JsonRoster::new(&path);
    let pool = roster.load_participants(&ids).unwrap();
    assert_eq!(pool.len(), 8);
    assert_eq!(roster.max_issued_number().unwrap(), 8);
    assert_eq!(ids.peek_next().as_str(), "P0009");

    let teams = TeamAllocator::new(4).allocate_seeded(&pool, 5).unwrap();
    assert_eq!(teams.len(), 2);
    assert!(teams.iter().all(|t| t.has_leader()));
}

#[test]
fn test_roster_json_shape() {
    let temp = TempDir::new().unwrap();
    let path = common::write_roster(temp.path(), &[91]);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let record = &json[0];
    assert_eq!(record["id"], "P0001");
    assert_eq!(record["personality_score"], 91);
    assert_eq!(record["preferred_role"], "strategist");
    assert_eq!(record["game_interest"], "Valorant");
}

#[test]
fn test_game_names_are_normalized_on_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("roster.json");
    fs::write(
        &path,
        r#"[{
            "id": "P0042",
            "name": "Nimal",
            "email": "nimal@iit.ac.lk",
            "game_interest": "  league of legends ",
            "skill_level": 7,
            "preferred_role": "all-rounder",
            "personality_score": 88
        }]"#,
    )
    .unwrap();

    let ids = IdGenerator::new();
    let pool = JsonRoster::new(&path).load_participants(&ids).unwrap();
    assert_eq!(pool[0].game_interest(), "League of Legends");
    assert_eq!(ids.next().unwrap().as_str(), "P0043");
}

#[test]
fn test_known_emails_are_filtered() {
    let temp = TempDir::new().unwrap();
    let path = common::write_roster(temp.path(), &[60, 70]);
    let roster = JsonRoster::new(&path);

    let ids = IdGenerator::new();
    ids.reconcile_from(&[], &roster).unwrap();
    let newcomers = common::pool_from_scores(&ids, &[80, 90, 55]);

    // Sequence 0 and 1 reuse the emails already on file
    let unseen = filter_unseen(newcomers, &roster).unwrap();
    assert_eq!(unseen.len(), 1);
    assert_eq!(unseen[0].email(), "player2@iit.ac.lk");
    assert_eq!(unseen[0].id().as_str(), "P0005");
}

#[test]
fn test_bad_json_reports_serialization_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("roster.json");
    fs::write(&path, "[{\"id\": 3}]").unwrap();

    let err = JsonRoster::new(&path).load_participants(&IdGenerator::new()).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert_eq!(err.code().as_str(), "E510");
}
