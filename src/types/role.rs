//! Preferred in-game roles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The role a participant prefers to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameRole {
    Strategist,
    Defender,
    Attacker,
    Support,
    AllRounder,
}

impl GameRole {
    /// All roles in menu order
    pub fn all() -> &'static [GameRole] {
        &[
            GameRole::Strategist,
            GameRole::Defender,
            GameRole::Attacker,
            GameRole::Support,
            GameRole::AllRounder,
        ]
    }

    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            GameRole::Strategist => "Strategist",
            GameRole::Defender => "Defender",
            GameRole::Attacker => "Attacker",
            GameRole::Support => "Support",
            GameRole::AllRounder => "All-Rounder",
        }
    }
}

impl fmt::Display for GameRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for GameRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strategist" => Ok(GameRole::Strategist),
            "defender" => Ok(GameRole::Defender),
            "attacker" => Ok(GameRole::Attacker),
            "support" => Ok(GameRole::Support),
            "all-rounder" | "all_rounder" | "allrounder" | "all rounder" => {
                Ok(GameRole::AllRounder)
            }
            _ => Err(format!(
                "Unknown role '{}'. Valid: strategist, defender, attacker, support, all-rounder",
                s
            )),
        }
    }
}
