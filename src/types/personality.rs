//! Personality classification
//!
//! Maps a participant's personality score onto one of three categories
//! using fixed, non-overlapping score bands.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lowest valid personality score
pub const MIN_PERSONALITY_SCORE: u8 = 50;

/// Highest valid personality score
pub const MAX_PERSONALITY_SCORE: u8 = 100;

// ─────────────────────────────────────────────────────────────────
// Personality Type
// ─────────────────────────────────────────────────────────────────

/// Personality category derived from a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonalityType {
    /// Takes charge; seeded first, one per team where possible
    Leader,
    /// Analytical; spread evenly across teams
    Thinker,
    /// Neither extreme; fills remaining places
    Balanced,
}

impl PersonalityType {
    /// All personality types in seeding order
    pub fn all() -> &'static [PersonalityType] {
        &[
            PersonalityType::Leader,
            PersonalityType::Thinker,
            PersonalityType::Balanced,
        ]
    }

    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PersonalityType::Leader => "Leader",
            PersonalityType::Thinker => "Thinker",
            PersonalityType::Balanced => "Balanced",
        }
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PersonalityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "leader" => Ok(PersonalityType::Leader),
            "thinker" => Ok(PersonalityType::Thinker),
            "balanced" => Ok(PersonalityType::Balanced),
            _ => Err(format!(
                "Unknown personality type '{}'. Valid: leader, thinker, balanced",
                s
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Score Bands
// ─────────────────────────────────────────────────────────────────

/// Score bands separating the three personality types.
///
/// Thinker covers `[50, balanced_min)`, Balanced covers
/// `[balanced_min, leader_min)` and Leader covers `[leader_min, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalityBands {
    /// First score classified as Balanced
    pub balanced_min: u8,
    /// First score classified as Leader
    pub leader_min: u8,
}

impl PersonalityBands {
    /// The bands used by every participant and by the allocator
    pub const STANDARD: PersonalityBands = PersonalityBands {
        balanced_min: 70,
        leader_min: 90,
    };

    /// Classify a score.
    ///
    /// Total over `u8`: anything under `balanced_min` is a Thinker and
    /// anything at or above `leader_min` is a Leader. Range checking is
    /// left to [`Participant`](crate::types::Participant).
    pub const fn classify(&self, score: u8) -> PersonalityType {
        if score >= self.leader_min {
            PersonalityType::Leader
        } else if score >= self.balanced_min {
            PersonalityType::Balanced
        } else {
            PersonalityType::Thinker
        }
    }

    /// The valid scores belonging to a personality type
    pub fn band_of(&self, personality: PersonalityType) -> RangeInclusive<u8> {
        match personality {
            PersonalityType::Thinker => MIN_PERSONALITY_SCORE..=self.balanced_min.saturating_sub(1),
            PersonalityType::Balanced => self.balanced_min..=self.leader_min.saturating_sub(1),
            PersonalityType::Leader => self.leader_min..=MAX_PERSONALITY_SCORE,
        }
    }

    pub fn contains(&self, personality: PersonalityType, score: u8) -> bool {
        self.band_of(personality).contains(&score)
    }
}

impl Default for PersonalityBands {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Classify a personality score using the standard bands
pub const fn classify(score: u8) -> PersonalityType {
    PersonalityBands::STANDARD.classify(score)
}

/// Whether a score lies inside the valid `[50, 100]` range
pub fn is_valid_score(score: u8) -> bool {
    (MIN_PERSONALITY_SCORE..=MAX_PERSONALITY_SCORE).contains(&score)
}

/// Convert five 1-5 survey answers into a 50-100 personality score
pub fn score_from_survey(answers: &[u8; 5]) -> Option<u8> {
    if answers.iter().any(|a| !(1..=5).contains(a)) {
        return None;
    }
    let total: u8 = answers.iter().sum();
    Some(MIN_PERSONALITY_SCORE + (total - 5) * 2)
}
