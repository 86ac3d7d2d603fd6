//! Formation analysis
//!
//! Read-only statistics over a finished set of teams.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::types::{PersonalityType, Team};

/// Thinker counts considered optimal for one team
const OPTIMAL_THINKERS: std::ops::RangeInclusive<usize> = 1..=2;

/// Distinct preferred roles a team needs to count as role-diverse
const MIN_DISTINCT_ROLES: usize = 3;

/// Distinct game interests a team needs to count as game-diverse
const MIN_DISTINCT_GAMES: usize = 2;

/// Result of [`analyze`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FormationAnalysis {
    /// There were no teams to analyze
    NoData,
    Summary(FormationSummary),
}

impl FormationAnalysis {
    pub fn summary(&self) -> Option<&FormationSummary> {
        match self {
            FormationAnalysis::NoData => None,
            FormationAnalysis::Summary(summary) => Some(summary),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, FormationAnalysis::NoData)
    }
}

impl fmt::Display for FormationAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormationAnalysis::NoData => write!(f, "No teams to analyze"),
            FormationAnalysis::Summary(summary) => write!(f, "{}", summary),
        }
    }
}

/// Aggregate figures for a non-empty set of teams
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormationSummary {
    pub total_teams: usize,
    pub total_participants: usize,
    /// Teams with a resolvable leader and an optimal thinker count
    pub teams_with_ideal_composition: usize,
    pub ideal_composition_percentage: f64,
    /// Teams with a leader, actual or backup
    pub teams_with_leader: usize,
    pub teams_with_optimal_thinkers: usize,
    /// Teams with no LEADER-typed member that fall back to a backup leader
    pub teams_with_backup_leader: usize,
    /// Mean of the per-team average skill
    pub average_team_skill: f64,
    pub teams_with_role_diversity: usize,
    pub teams_with_game_diversity: usize,
}

impl FormationSummary {
    /// Share of teams whose leader is LEADER-typed rather than a backup
    pub fn natural_leader_percentage(&self) -> f64 {
        let natural = self.teams_with_leader - self.teams_with_backup_leader;
        percentage(natural, self.total_teams)
    }
}

impl fmt::Display for FormationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Formation Analysis")?;
        writeln!(f, "  Total Teams:          {}", self.total_teams)?;
        writeln!(f, "  Total Participants:   {}", self.total_participants)?;
        writeln!(
            f,
            "  Ideal Composition:    {} ({:.1}%)",
            self.teams_with_ideal_composition, self.ideal_composition_percentage
        )?;
        writeln!(
            f,
            "  With Leader:          {} ({:.1}% natural)",
            self.teams_with_leader,
            self.natural_leader_percentage()
        )?;
        writeln!(f, "  Backup Leaders:       {}", self.teams_with_backup_leader)?;
        writeln!(f, "  Optimal Thinkers:     {}", self.teams_with_optimal_thinkers)?;
        writeln!(f, "  Average Team Skill:   {:.2}", self.average_team_skill)?;
        writeln!(f, "  Role Diversity:       {}", self.teams_with_role_diversity)?;
        write!(f, "  Game Diversity:       {}", self.teams_with_game_diversity)
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Compute formation statistics. Does not modify the teams.
pub fn analyze(teams: &[Team]) -> FormationAnalysis {
    if teams.is_empty() {
        return FormationAnalysis::NoData;
    }

    let mut summary = FormationSummary {
        total_teams: teams.len(),
        total_participants: teams.iter().map(Team::size).sum(),
        teams_with_ideal_composition: 0,
        ideal_composition_percentage: 0.0,
        teams_with_leader: 0,
        teams_with_optimal_thinkers: 0,
        teams_with_backup_leader: 0,
        average_team_skill: 0.0,
        teams_with_role_diversity: 0,
        teams_with_game_diversity: 0,
    };

    for team in teams {
        let has_leader = team.effective_leader().is_some();
        let optimal_thinkers = OPTIMAL_THINKERS.contains(&team.count_of(PersonalityType::Thinker));

        if has_leader {
            summary.teams_with_leader += 1;
        }
        if optimal_thinkers {
            summary.teams_with_optimal_thinkers += 1;
        }
        if has_leader && optimal_thinkers {
            summary.teams_with_ideal_composition += 1;
        }
        if !team.has_leader() && team.backup_leader().is_some() {
            summary.teams_with_backup_leader += 1;
        }

        let roles: HashSet<_> = team.iter_members().map(|m| m.preferred_role()).collect();
        if roles.len() >= MIN_DISTINCT_ROLES {
            summary.teams_with_role_diversity += 1;
        }
        if team.game_interests().len() >= MIN_DISTINCT_GAMES {
            summary.teams_with_game_diversity += 1;
        }
    }

    summary.ideal_composition_percentage =
        percentage(summary.teams_with_ideal_composition, summary.total_teams);
    summary.average_team_skill =
        teams.iter().map(Team::average_skill).sum::<f64>() / teams.len() as f64;

    FormationAnalysis::Summary(summary)
}
