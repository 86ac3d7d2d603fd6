//! Participant entity
//!
//! A participant is created once, either freshly registered (new id drawn
//! from the [`IdGenerator`]) or restored from a persisted record (id kept,
//! generator advanced past it). The personality type is always derived from
//! the score held alongside it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::{IdGenerator, ParticipantId};
use crate::types::game::normalize_game_name;
use crate::types::personality::{
    classify, is_valid_score, PersonalityType, MAX_PERSONALITY_SCORE, MIN_PERSONALITY_SCORE,
};
use crate::types::role::GameRole;

/// Lowest valid skill level
pub const MIN_SKILL_LEVEL: u8 = 1;

/// Highest valid skill level
pub const MAX_SKILL_LEVEL: u8 = 10;

// ─────────────────────────────────────────────────────────────────
// Profile and Record
// ─────────────────────────────────────────────────────────────────

/// The user-supplied part of a participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub name: String,
    pub email: String,
    pub game_interest: String,
    pub skill_level: u8,
    pub preferred_role: GameRole,
    pub personality_score: u8,
}

/// Persisted shape of a participant: its id plus profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub id: ParticipantId,
    #[serde(flatten)]
    pub profile: ParticipantProfile,
}

// ─────────────────────────────────────────────────────────────────
// Participant
// ─────────────────────────────────────────────────────────────────

/// A club member taking part in team formation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    id: ParticipantId,
    name: String,
    email: String,
    game_interest: String,
    skill_level: u8,
    preferred_role: GameRole,
    personality_score: u8,
    personality_type: PersonalityType,
}

impl Participant {
    /// Register a new participant, drawing a fresh id.
    ///
    /// The profile is checked before an id is drawn, so a rejected request
    /// does not consume one.
    pub fn register(profile: ParticipantProfile, ids: &IdGenerator) -> Result<Self> {
        check_profile(&profile)?;
        Ok(Self::from_checked(ids.next()?, profile))
    }

    /// Restore a participant from a persisted record, keeping its id
    pub fn restore(
        id: ParticipantId,
        profile: ParticipantProfile,
        ids: &IdGenerator,
    ) -> Result<Self> {
        check_profile(&profile)?;
        ids.advance_if_collides(&id);
        Ok(Self::from_checked(id, profile))
    }

    /// Restore from a [`ParticipantRecord`]
    pub fn from_record(record: ParticipantRecord, ids: &IdGenerator) -> Result<Self> {
        Self::restore(record.id, record.profile, ids)
    }

    fn from_checked(id: ParticipantId, profile: ParticipantProfile) -> Self {
        Self {
            id,
            name: profile.name,
            email: profile.email,
            game_interest: normalize_game_name(&profile.game_interest),
            skill_level: profile.skill_level,
            preferred_role: profile.preferred_role,
            personality_score: profile.personality_score,
            personality_type: classify(profile.personality_score),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn game_interest(&self) -> &str {
        &self.game_interest
    }

    pub fn skill_level(&self) -> u8 {
        self.skill_level
    }

    pub fn preferred_role(&self) -> GameRole {
        self.preferred_role
    }

    pub fn personality_score(&self) -> u8 {
        self.personality_score
    }

    pub fn personality_type(&self) -> PersonalityType {
        self.personality_type
    }

    // ─────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────

    /// Replace the score and re-derive the personality type
    pub fn set_personality_score(&mut self, score: u8) -> Result<()> {
        check_score(score)?;
        self.personality_score = score;
        self.personality_type = classify(score);
        Ok(())
    }

    /// Replace the game interest, normalizing it against the game table
    pub fn set_game_interest(&mut self, game: &str) {
        self.game_interest = normalize_game_name(game);
    }

    pub fn set_skill_level(&mut self, skill: u8) -> Result<()> {
        check_skill(skill)?;
        self.skill_level = skill;
        Ok(())
    }

    pub fn set_preferred_role(&mut self, role: GameRole) {
        self.preferred_role = role;
    }

    /// Snapshot this participant as a persistable record
    pub fn to_record(&self) -> ParticipantRecord {
        ParticipantRecord {
            id: self.id.clone(),
            profile: ParticipantProfile {
                name: self.name.clone(),
                email: self.email.clone(),
                game_interest: self.game_interest.clone(),
                skill_level: self.skill_level,
                preferred_role: self.preferred_role,
                personality_score: self.personality_score,
            },
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} | Email: {} | Role: {} | Personality: {}",
            self.name,
            self.id,
            self.game_interest,
            self.email,
            self.preferred_role,
            self.personality_type
        )
    }
}

fn check_profile(profile: &ParticipantProfile) -> Result<()> {
    check_skill(profile.skill_level)?;
    check_score(profile.personality_score)
}

fn check_score(score: u8) -> Result<()> {
    if !is_valid_score(score) {
        return Err(Error::data(
            "personality score",
            score,
            format!(
                "must be between {}-{}",
                MIN_PERSONALITY_SCORE, MAX_PERSONALITY_SCORE
            ),
        ));
    }
    Ok(())
}

fn check_skill(skill: u8) -> Result<()> {
    if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&skill) {
        return Err(Error::data(
            "skill level",
            skill,
            format!("must be between {}-{}", MIN_SKILL_LEVEL, MAX_SKILL_LEVEL),
        ));
    }
    Ok(())
}
