//! Common test utilities and fixtures
//!
//! Builds participant pools and roster files for the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use teammate::{
    GameRole, IdGenerator, JsonRoster, Participant, ParticipantId, ParticipantProfile,
    ParticipantRecord,
};

const GAMES: [&str; 4] = ["Valorant", "Dota", "FIFA", "Badminton"];

/// Profile with a given personality score; other fields vary with `seq`
pub fn profile(seq: usize, score: u8) -> ParticipantProfile {
    ParticipantProfile {
        name: format!("Player {}", seq),
        email: format!("player{}@iit.ac.lk", seq),
        game_interest: GAMES[seq % GAMES.len()].to_string(),
        skill_level: (seq % 10) as u8 + 1,
        preferred_role: GameRole::all()[seq % GameRole::all().len()],
        personality_score: score,
    }
}

/// Register one participant per score, in order
pub fn pool_from_scores(ids: &IdGenerator, scores: &[u8]) -> Vec<Arc<Participant>> {
    scores
        .iter()
        .enumerate()
        .map(|(seq, &score)| Arc::new(Participant::register(profile(seq, score), ids).unwrap()))
        .collect()
}

/// A pool with the requested number of leaders, thinkers and balanced members
pub fn mixed_pool(
    ids: &IdGenerator,
    leaders: usize,
    thinkers: usize,
    balanced: usize,
) -> Vec<Arc<Participant>> {
    let scores: Vec<u8> = std::iter::repeat(95)
        .take(leaders)
        .chain(std::iter::repeat(60).take(thinkers))
        .chain(std::iter::repeat(80).take(balanced))
        .collect();
    pool_from_scores(ids, &scores)
}

/// Persisted records with ids `P0001..` for the given scores
pub fn records_from_scores(scores: &[u8]) -> Vec<ParticipantRecord> {
    scores
        .iter()
        .enumerate()
        .map(|(seq, &score)| ParticipantRecord {
            id: ParticipantId::from_number(seq as u32 + 1),
            profile: profile(seq, score),
        })
        .collect()
}

/// Write a roster file under `dir` and return its path
pub fn write_roster(dir: &Path, scores: &[u8]) -> PathBuf {
    let path = dir.join("participants.json");
    JsonRoster::new(&path)
        .write_records(&records_from_scores(scores))
        .unwrap();
    path
}
