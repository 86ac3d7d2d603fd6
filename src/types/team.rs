//! Team aggregate
//!
//! A team owns its member list but shares the participants themselves
//! (`Arc<Participant>`). It neither enforces a capacity nor deduplicates;
//! both are the allocator's concern.

use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

use serde::Serialize;

use crate::types::participant::Participant;
use crate::types::personality::PersonalityType;

/// Member counts per personality type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Composition {
    pub leaders: usize,
    pub thinkers: usize,
    pub balanced: usize,
}

/// A group of participants formed by one allocation run
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    id: String,
    name: String,
    members: Vec<Arc<Participant>>,
    average_skill: f64,
}

impl Team {
    /// Create an empty team
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: Vec::new(),
            average_skill: 0.0,
        }
    }

    /// Create the `index`-th team of a run (`T1` / `Team 1` for index 0)
    pub fn numbered(index: usize) -> Self {
        Self::new(format!("T{}", index + 1), format!("Team {}", index + 1))
    }

    // ─────────────────────────────────────────────────────────────
    // Membership
    // ─────────────────────────────────────────────────────────────

    pub fn add_member(&mut self, participant: Arc<Participant>) {
        self.members.push(participant);
        self.update_average_skill();
    }

    /// Remove the first member equal to `participant`.
    ///
    /// Returns whether a member was removed.
    pub fn remove_member(&mut self, participant: &Participant) -> bool {
        let position = self
            .members
            .iter()
            .position(|m| m.as_ref() == participant);
        if let Some(index) = position {
            self.members.remove(index);
            self.update_average_skill();
        }
        position.is_some()
    }

    fn update_average_skill(&mut self) {
        self.average_skill = if self.members.is_empty() {
            0.0
        } else {
            let total: u32 = self.members.iter().map(|m| m.skill_level() as u32).sum();
            total as f64 / self.members.len() as f64
        };
    }

    // ─────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Copy of the member list
    pub fn members(&self) -> Vec<Arc<Participant>> {
        self.members.clone()
    }

    pub fn iter_members(&self) -> impl Iterator<Item = &Participant> + '_ {
        self.members.iter().map(|m| m.as_ref())
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn average_skill(&self) -> f64 {
        self.average_skill
    }

    // ─────────────────────────────────────────────────────────────
    // Leadership
    // ─────────────────────────────────────────────────────────────

    pub fn has_leader(&self) -> bool {
        self.iter_members()
            .any(|m| m.personality_type() == PersonalityType::Leader)
    }

    /// First member classified as a leader
    pub fn leader(&self) -> Option<&Participant> {
        self.iter_members()
            .find(|m| m.personality_type() == PersonalityType::Leader)
    }

    /// Highest-scoring member; the earliest added wins a tie
    pub fn backup_leader(&self) -> Option<&Participant> {
        self.iter_members().fold(None, |best, m| match best {
            Some(b) if b.personality_score() >= m.personality_score() => Some(b),
            _ => Some(m),
        })
    }

    /// The leader if there is one, otherwise the backup leader
    pub fn effective_leader(&self) -> Option<&Participant> {
        self.leader().or_else(|| self.backup_leader())
    }

    // ─────────────────────────────────────────────────────────────
    // Composition
    // ─────────────────────────────────────────────────────────────

    pub fn count_of(&self, personality: PersonalityType) -> usize {
        self.iter_members()
            .filter(|m| m.personality_type() == personality)
            .count()
    }

    pub fn composition(&self) -> Composition {
        self.iter_members()
            .fold(Composition::default(), |mut c, m| {
                match m.personality_type() {
                    PersonalityType::Leader => c.leaders += 1,
                    PersonalityType::Thinker => c.thinkers += 1,
                    PersonalityType::Balanced => c.balanced += 1,
                }
                c
            })
    }

    /// Distinct game interests in first-seen order
    pub fn game_interests(&self) -> Vec<&str> {
        let mut games: Vec<&str> = Vec::new();
        for member in self.iter_members() {
            if !games.contains(&member.game_interest()) {
                games.push(member.game_interest());
            }
        }
        games
    }

    /// Multi-line report listing members, games and leadership
    pub fn detailed(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self);
        let _ = writeln!(out, "Members:");
        for member in self.iter_members() {
            let _ = writeln!(out, "  • {}", member);
        }
        let _ = writeln!(out, "Game Interests: {}", self.game_interests().join(", "));

        if let Some(leader) = self.leader() {
            let _ = writeln!(out, "Team Leader: {}", leader.name());
        } else if let Some(backup) = self.backup_leader() {
            let _ = writeln!(
                out,
                "Backup Leader: {} (Score: {})",
                backup.name(),
                backup.personality_score()
            );
        }
        out
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} (Size: {}, Avg Skill: {:.1})",
            self.id,
            self.name,
            self.size(),
            self.average_skill
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdGenerator;
    use crate::types::participant::ParticipantProfile;
    use crate::types::role::GameRole;

    fn member(ids: &IdGenerator, name: &str, skill: u8, score: u8) -> Arc<Participant> {
        Arc::new(
            Participant::register(
                ParticipantProfile {
                    name: name.to_string(),
                    email: format!("{}@iit.ac.lk", name.to_lowercase()),
                    game_interest: "Dota".to_string(),
                    skill_level: skill,
                    preferred_role: GameRole::Support,
                    personality_score: score,
                },
                ids,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_average_skill_tracks_membership() {
        let ids = IdGenerator::new();
        let mut team = Team::numbered(0);
        assert_eq!(team.average_skill(), 0.0);

        let five = member(&ids, "Ama", 5, 60);
        let seven = member(&ids, "Kasun", 7, 60);
        team.add_member(five.clone());
        team.add_member(seven);
        assert_eq!(team.average_skill(), 6.0);

        assert!(team.remove_member(&five));
        assert_eq!(team.average_skill(), 7.0);

        assert!(!team.remove_member(&five));
        assert_eq!(team.size(), 1);
    }

    #[test]
    fn test_empty_team_after_removals() {
        let ids = IdGenerator::new();
        let mut team = Team::numbered(0);
        let only = member(&ids, "Ama", 9, 60);
        team.add_member(only.clone());
        team.remove_member(&only);
        assert!(team.is_empty());
        assert_eq!(team.average_skill(), 0.0);
        assert!(team.backup_leader().is_none());
    }

    #[test]
    fn test_leader_lookup() {
        let ids = IdGenerator::new();
        let mut team = Team::numbered(1);
        team.add_member(member(&ids, "Thinker", 5, 55));
        assert!(!team.has_leader());
        assert!(team.leader().is_none());

        team.add_member(member(&ids, "Boss", 5, 93));
        team.add_member(member(&ids, "Boss2", 5, 99));
        assert!(team.has_leader());
        assert_eq!(team.leader().unwrap().name(), "Boss");
    }

    #[test]
    fn test_backup_leader_tie_prefers_earlier_member() {
        let ids = IdGenerator::new();
        let mut team = Team::numbered(0);
        team.add_member(member(&ids, "Low", 5, 60));
        team.add_member(member(&ids, "First", 5, 80));
        team.add_member(member(&ids, "Second", 5, 80));

        assert_eq!(team.backup_leader().unwrap().name(), "First");
        assert_eq!(team.effective_leader().unwrap().name(), "First");
    }

    #[test]
    fn test_members_returns_a_copy() {
        let ids = IdGenerator::new();
        let mut team = Team::numbered(0);
        team.add_member(member(&ids, "Ama", 5, 60));

        let mut copy = team.members();
        copy.clear();
        assert_eq!(team.size(), 1);
    }

    #[test]
    fn test_duplicates_are_not_rejected() {
        let ids = IdGenerator::new();
        let mut team = Team::numbered(0);
        let p = member(&ids, "Ama", 4, 60);
        team.add_member(p.clone());
        team.add_member(p);
        assert_eq!(team.size(), 2);
    }

    #[test]
    fn test_composition_and_display() {
        let ids = IdGenerator::new();
        let mut team = Team::numbered(2);
        team.add_member(member(&ids, "A", 6, 95));
        team.add_member(member(&ids, "B", 7, 60));
        team.add_member(member(&ids, "C", 8, 75));

        assert_eq!(
            team.composition(),
            Composition { leaders: 1, thinkers: 1, balanced: 1 }
        );
        assert_eq!(team.count_of(PersonalityType::Thinker), 1);
        assert_eq!(team.game_interests(), vec!["Dota"]);
        assert_eq!(team.to_string(), "T3 - Team 3 (Size: 3, Avg Skill: 7.0)");
        assert!(team.detailed().contains("Team Leader: A"));
    }
}
