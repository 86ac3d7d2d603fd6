//! Personality buckets
//!
//! The shuffled pool is split into one FIFO queue per personality type.
//! Phases drain the queues from the front, so draining stays O(1) per
//! participant while preserving shuffle order.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::types::{classify, Participant, PersonalityType};

/// Working queues of participants grouped by personality type
#[derive(Debug, Default)]
pub struct PersonalityBuckets {
    pub leaders: VecDeque<Arc<Participant>>,
    pub thinkers: VecDeque<Arc<Participant>>,
    pub balanced: VecDeque<Arc<Participant>>,
}

impl PersonalityBuckets {
    /// Split a pool, keeping its order within each bucket
    pub fn partition<I>(pool: I) -> Self
    where
        I: IntoIterator<Item = Arc<Participant>>,
    {
        let mut buckets = Self::default();
        for participant in pool {
            // Re-derived from the raw score; must agree with the stored type
            let personality = classify(participant.personality_score());
            debug_assert_eq!(personality, participant.personality_type());
            buckets.bucket_mut(personality).push_back(participant);
        }
        buckets
    }

    pub fn bucket_mut(&mut self, personality: PersonalityType) -> &mut VecDeque<Arc<Participant>> {
        match personality {
            PersonalityType::Leader => &mut self.leaders,
            PersonalityType::Thinker => &mut self.thinkers,
            PersonalityType::Balanced => &mut self.balanced,
        }
    }

    pub fn len(&self) -> usize {
        self.leaders.len() + self.thinkers.len() + self.balanced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge what is left (leaders, then thinkers, then balanced) and order it
    /// by personality score, highest first. Equal scores keep merge order.
    pub fn into_leftovers(self) -> Vec<Arc<Participant>> {
        let mut leftovers: Vec<_> = self
            .leaders
            .into_iter()
            .chain(self.thinkers)
            .chain(self.balanced)
            .collect();
        leftovers.sort_by(|a, b| b.personality_score().cmp(&a.personality_score()));
        leftovers
    }
}
