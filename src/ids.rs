//! Participant identifiers
//!
//! [`IdGenerator`] is an explicit service object holding the process-wide
//! participant counter. Construct one per process (or per test) and share it
//! by reference or `Arc`; all operations are lock-free atomics.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::roster::RecordSource;
use crate::types::Participant;

/// Prefix shared by every participant id
pub const PARTICIPANT_ID_PREFIX: &str = "P";

/// Value the counter starts at (and returns to on reset)
const INITIAL_COUNTER: u64 = 1;

/// Largest id number that can be issued
const MAX_ID_NUMBER: u64 = u32::MAX as u64;

// ─────────────────────────────────────────────────────────────────
// Participant Id
// ─────────────────────────────────────────────────────────────────

/// Textual participant id such as `P0042`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Format a counter value as an id (zero-padded to four digits)
    pub fn from_number(number: u32) -> Self {
        Self::from_counter(u64::from(number))
    }

    fn from_counter(value: u64) -> Self {
        Self(format!("{}{:04}", PARTICIPANT_ID_PREFIX, value))
    }

    /// Wrap an id string as supplied by a persisted record
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Numeric suffix, if the id has the standard shape
    pub fn number(&self) -> Option<u32> {
        self.0
            .strip_prefix(PARTICIPANT_ID_PREFIX)
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse().ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────
// Id Generator
// ─────────────────────────────────────────────────────────────────

/// Monotonic participant id source
///
/// The counter holds the next number to issue. It is wider than an id number
/// so that it can sit one past `u32::MAX` once the id space is used up.
#[derive(Debug)]
pub struct IdGenerator {
    counter: AtomicU64,
}

impl IdGenerator {
    /// Create a generator whose first id is `P0001`
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(INITIAL_COUNTER),
        }
    }

    /// Issue the next id. Never returns the same id twice, even across threads.
    ///
    /// Fails once every id number up to `u32::MAX` has been issued or seen.
    pub fn next(&self) -> Result<ParticipantId> {
        self.counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |value| {
                (value <= MAX_ID_NUMBER).then(|| value + 1)
            })
            .map(ParticipantId::from_counter)
            .map_err(|_| Error::Internal("Participant id space exhausted".to_string()))
    }

    /// Advance the counter past the highest id seen elsewhere. Never moves it back.
    pub fn reconcile(&self, max_seen: u32) {
        let target = u64::from(max_seen) + 1;
        let previous = self.counter.fetch_max(target, Ordering::SeqCst);
        if target > previous {
            debug!(next = %ParticipantId::from_counter(target), "Id counter reconciled");
        }
    }

    /// Make sure a reloaded id is never reissued.
    ///
    /// Returns `false` when the id has no numeric suffix and was ignored.
    pub fn advance_if_collides(&self, id: &ParticipantId) -> bool {
        match id.number() {
            Some(number) => {
                self.counter
                    .fetch_max(u64::from(number) + 1, Ordering::SeqCst);
                true
            }
            None => {
                warn!(id = %id, "Ignoring participant id without numeric suffix");
                false
            }
        }
    }

    /// Compute the largest id across loaded participants and a record source,
    /// then reconcile against it.
    pub fn reconcile_from<S>(&self, participants: &[Arc<Participant>], source: &S) -> Result<u32>
    where
        S: RecordSource + ?Sized,
    {
        let in_memory = participants
            .iter()
            .filter_map(|p| p.id().number())
            .max()
            .unwrap_or(0);
        let persisted = source.max_issued_number()?;
        let max_seen = in_memory.max(persisted);
        if max_seen > 0 {
            self.reconcile(max_seen);
        }
        Ok(max_seen)
    }

    /// The id the next call to [`next`](Self::next) would return
    pub fn peek_next(&self) -> ParticipantId {
        ParticipantId::from_counter(self.counter.load(Ordering::SeqCst))
    }

    /// Number of the most recently issued (or reconciled) id; 0 if none
    pub fn last_issued(&self) -> u32 {
        let last = self.counter.load(Ordering::SeqCst).saturating_sub(1);
        u32::try_from(last).unwrap_or(u32::MAX)
    }

    /// Restore the generator to its initial state
    pub fn reset(&self) {
        self.counter.store(INITIAL_COUNTER, Ordering::SeqCst);
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_ids() {
        let ids = IdGenerator::new();
        assert_eq!(ids.next().unwrap().as_str(), "P0001");
        assert_eq!(ids.next().unwrap().as_str(), "P0002");
        assert_eq!(ids.last_issued(), 2);
    }

    #[test]
    fn test_wide_numbers_are_not_truncated() {
        assert_eq!(ParticipantId::from_number(12345).as_str(), "P12345");
    }

    #[test]
    fn test_number_parsing() {
        assert_eq!(ParticipantId::new("P0042").number(), Some(42));
        assert_eq!(ParticipantId::new("P").number(), None);
        assert_eq!(ParticipantId::new("X0042").number(), None);
        assert_eq!(ParticipantId::new("P-1").number(), None);
    }

    #[test]
    fn test_reconcile_never_decreases() {
        let ids = IdGenerator::new();
        ids.reconcile(10);
        assert_eq!(ids.peek_next().as_str(), "P0011");
        ids.reconcile(3);
        assert_eq!(ids.peek_next().as_str(), "P0011");
    }

    #[test]
    fn test_advance_if_collides() {
        let ids = IdGenerator::new();
        assert!(ids.advance_if_collides(&ParticipantId::new("P0007")));
        assert_eq!(ids.next().unwrap().as_str(), "P0008");

        // Lower ids leave the counter alone
        assert!(ids.advance_if_collides(&ParticipantId::new("P0002")));
        assert_eq!(ids.next().unwrap().as_str(), "P0009");

        assert!(!ids.advance_if_collides(&ParticipantId::new("guest")));
        assert_eq!(ids.peek_next().as_str(), "P0010");
    }

    #[test]
    fn test_reconcile_from_memory_and_source() {
        use crate::roster::MemoryRoster;
        use crate::types::{GameRole, ParticipantProfile, ParticipantRecord};

        let profile = ParticipantProfile {
            name: "Test".to_string(),
            email: "t@iit.ac.lk".to_string(),
            game_interest: "Dota".to_string(),
            skill_level: 5,
            preferred_role: GameRole::Support,
            personality_score: 80,
        };
        let source = MemoryRoster::with_records(vec![ParticipantRecord {
            id: ParticipantId::new("P0031"),
            profile: profile.clone(),
        }]);
        let loaded = vec![Arc::new(
            Participant::restore(ParticipantId::new("P0020"), profile, &IdGenerator::new())
                .unwrap(),
        )];

        let ids = IdGenerator::new();
        assert_eq!(ids.reconcile_from(&loaded, &source).unwrap(), 31);
        assert_eq!(ids.next().unwrap().as_str(), "P0032");
    }

    #[test]
    fn test_reset() {
        let ids = IdGenerator::new();
        ids.reconcile(99);
        ids.next().unwrap();
        ids.reset();
        assert_eq!(ids.last_issued(), 0);
        assert_eq!(ids.next().unwrap().as_str(), "P0001");
    }

    #[test]
    fn test_reconcile_at_max_exhausts_instead_of_reissuing() {
        let ids = IdGenerator::new();
        ids.reconcile(u32::MAX);
        assert_eq!(ids.last_issued(), u32::MAX);

        let err = ids.next().unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
        // Still exhausted on the next call
        assert!(ids.next().is_err());
    }

    #[test]
    fn test_counter_does_not_wrap_near_max() {
        let ids = IdGenerator::new();
        let first = ids.next().unwrap();
        assert_eq!(first.as_str(), "P0001");

        assert!(ids.advance_if_collides(&ParticipantId::new("P4294967294")));
        assert_eq!(ids.next().unwrap().as_str(), "P4294967295");
        assert!(ids.next().is_err());
        assert!(ids.next().is_err());
    }
}
