//! Team allocation
//!
//! Greedy, phased fill of `N / K` teams of size `K`:
//!
//! 1. shuffle the pool with the caller's RNG
//! 2. split it into leader, thinker and balanced buckets
//! 3. seed one leader per team, then spread extra leaders to leaderless teams
//! 4. seed one thinker per team, then top up the teams with fewest thinkers
//! 5. hand balanced participants to the smallest open team
//! 6. place whatever is left, highest score first, into the smallest open team
//! 7. require every team to hold exactly `K` members
//!
//! The `N mod K` participants left after step 6 are not placed anywhere and
//! are not returned.

use std::collections::VecDeque;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use super::buckets::PersonalityBuckets;
use super::validation::validate_team_size;
use crate::error::{Error, Result};
use crate::types::{Participant, PersonalityType, Team};

// ─────────────────────────────────────────────────────────────────
// Allocation Plan
// ─────────────────────────────────────────────────────────────────

/// Team count and placement figures for a pool, known before allocating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocationPlan {
    /// Number of teams that will be formed
    pub team_count: usize,
    /// Participants that end up in a team
    pub placed: usize,
    /// Remainder participants that are left out
    pub dropped: usize,
}

// ─────────────────────────────────────────────────────────────────
// Team Allocator
// ─────────────────────────────────────────────────────────────────

/// Splits a participant pool into fixed-size teams
#[derive(Debug, Clone, Copy)]
pub struct TeamAllocator {
    team_size: usize,
}

impl TeamAllocator {
    pub fn new(team_size: usize) -> Self {
        Self { team_size }
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    /// Figures for a pool of `pool_size`; all zero when the team size is zero
    pub fn plan(&self, pool_size: usize) -> AllocationPlan {
        if self.team_size == 0 {
            return AllocationPlan { team_count: 0, placed: 0, dropped: 0 };
        }
        let team_count = pool_size / self.team_size;
        let placed = team_count * self.team_size;
        AllocationPlan {
            team_count,
            placed,
            dropped: pool_size - placed,
        }
    }

    /// Allocate using a freshly seeded entropy RNG
    pub fn allocate(&self, participants: &[Arc<Participant>]) -> Result<Vec<Team>> {
        self.allocate_with_rng(participants, &mut StdRng::from_entropy())
    }

    /// Allocate reproducibly from a fixed seed
    pub fn allocate_seeded(&self, participants: &[Arc<Participant>], seed: u64) -> Result<Vec<Team>> {
        self.allocate_with_rng(participants, &mut StdRng::seed_from_u64(seed))
    }

    /// Allocate with a caller-supplied source of randomness.
    ///
    /// Fails with [`Error::Validation`] before doing any work if the team
    /// size is zero or larger than the pool, and with [`Error::Formation`]
    /// if any team ends up short. No teams are returned on failure.
    pub fn allocate_with_rng<R>(
        &self,
        participants: &[Arc<Participant>],
        rng: &mut R,
    ) -> Result<Vec<Team>>
    where
        R: Rng + ?Sized,
    {
        let violations = validate_team_size(self.team_size, participants.len());
        if !violations.is_empty() {
            warn!(
                team_size = self.team_size,
                participants = participants.len(),
                ?violations,
                "Allocation request rejected"
            );
            return Err(Error::validation(violations));
        }

        let run_id = Uuid::new_v4();
        let span = info_span!("allocate", run_id = %run_id, team_size = self.team_size);
        let _guard = span.enter();

        let mut pool = participants.to_vec();
        pool.shuffle(rng);

        let plan = self.plan(pool.len());
        let mut buckets = PersonalityBuckets::partition(pool);
        info!(
            teams = plan.team_count,
            leaders = buckets.leaders.len(),
            thinkers = buckets.thinkers.len(),
            balanced = buckets.balanced.len(),
            "Forming teams"
        );

        let mut run = FormationRun::new(plan.team_count, self.team_size);
        run.seed_leaders(&mut buckets.leaders);
        run.seed_thinkers(&mut buckets.thinkers);
        run.seed_balanced(&mut buckets.balanced);
        let unplaced = run.place_leftovers(buckets.into_leftovers());
        run.ensure_complete()?;

        for team in &run.teams {
            let composition = team.composition();
            debug!(
                team = team.id(),
                leaders = composition.leaders,
                thinkers = composition.thinkers,
                balanced = composition.balanced,
                leader = team.effective_leader().map(|p| p.name()).unwrap_or("-"),
                avg_skill = team.average_skill(),
                "Final composition"
            );
        }
        if unplaced > 0 {
            debug!(dropped = unplaced, "Remainder participants left out");
        }
        info!(teams = run.teams.len(), "Teams formed");

        Ok(run.into_teams())
    }
}

/// Allocate `participants` into teams of `team_size` using entropy
pub fn allocate(team_size: usize, participants: &[Arc<Participant>]) -> Result<Vec<Team>> {
    TeamAllocator::new(team_size).allocate(participants)
}

// ─────────────────────────────────────────────────────────────────
// Formation Run
// ─────────────────────────────────────────────────────────────────

/// Mutable state of a single allocation attempt
#[derive(Debug)]
struct FormationRun {
    team_size: usize,
    teams: Vec<Team>,
}

impl FormationRun {
    fn new(team_count: usize, team_size: usize) -> Self {
        Self {
            team_size,
            teams: (0..team_count).map(Team::numbered).collect(),
        }
    }

    fn has_room(&self, team: &Team) -> bool {
        team.size() < self.team_size
    }

    /// Index of the open team minimizing `key`; the first one wins ties
    fn open_team_min_by<K, F>(&self, key: F) -> Option<usize>
    where
        K: Ord,
        F: Fn(&Team) -> K,
    {
        self.teams
            .iter()
            .enumerate()
            .filter(|(_, team)| self.has_room(team))
            .min_by_key(|(_, team)| key(*team))
            .map(|(index, _)| index)
    }

    fn smallest_open_team(&self) -> Option<usize> {
        self.open_team_min_by(Team::size)
    }

    /// Phase 1: one leader per empty team, then extras to leaderless teams
    fn seed_leaders(&mut self, leaders: &mut VecDeque<Arc<Participant>>) {
        for team in &mut self.teams {
            if !team.is_empty() {
                continue;
            }
            match leaders.pop_front() {
                Some(leader) => team.add_member(leader),
                None => break,
            }
        }

        while !leaders.is_empty() {
            let target = self
                .teams
                .iter()
                .position(|team| !team.has_leader() && self.has_room(team));
            let Some(index) = target else { break };
            if let Some(leader) = leaders.pop_front() {
                self.teams[index].add_member(leader);
            }
        }
        debug!(remaining = leaders.len(), "Leaders seeded");
    }

    /// Phase 2: one thinker per thinkerless team, then extras to the teams
    /// with the fewest thinkers
    fn seed_thinkers(&mut self, thinkers: &mut VecDeque<Arc<Participant>>) {
        let team_size = self.team_size;
        for team in &mut self.teams {
            if thinkers.is_empty() {
                break;
            }
            if team.count_of(PersonalityType::Thinker) == 0 && team.size() < team_size {
                if let Some(thinker) = thinkers.pop_front() {
                    team.add_member(thinker);
                }
            }
        }

        while !thinkers.is_empty() {
            let target = self.open_team_min_by(|team| team.count_of(PersonalityType::Thinker));
            let Some(index) = target else { break };
            if let Some(thinker) = thinkers.pop_front() {
                self.teams[index].add_member(thinker);
            }
        }
        debug!(remaining = thinkers.len(), "Thinkers seeded");
    }

    /// Phase 3: balanced participants to the smallest open team
    fn seed_balanced(&mut self, balanced: &mut VecDeque<Arc<Participant>>) {
        while !balanced.is_empty() {
            let Some(index) = self.smallest_open_team() else { break };
            if let Some(participant) = balanced.pop_front() {
                self.teams[index].add_member(participant);
            }
        }
        debug!(remaining = balanced.len(), "Balanced seeded");
    }

    /// Phase 4: leftovers (already ordered) to the smallest open team.
    ///
    /// Returns how many could not be placed.
    fn place_leftovers(&mut self, leftovers: Vec<Arc<Participant>>) -> usize {
        let mut leftovers = leftovers.into_iter();
        while let Some(index) = self.smallest_open_team() {
            match leftovers.next() {
                Some(participant) => self.teams[index].add_member(participant),
                None => break,
            }
        }
        leftovers.count()
    }

    /// Every team must be exactly full
    fn ensure_complete(&self) -> Result<()> {
        match self.teams.iter().find(|team| team.size() != self.team_size) {
            Some(team) => {
                warn!(team = team.id(), size = team.size(), expected = self.team_size, "Team incomplete");
                Err(Error::formation(team.id(), team.size(), self.team_size))
            }
            None => Ok(()),
        }
    }

    fn into_teams(self) -> Vec<Team> {
        self.teams
    }
}
