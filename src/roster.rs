//! Persisted participant records
//!
//! The allocator never reads storage itself. A [`RecordSource`] tells callers
//! the highest id already issued (to seed the [`IdGenerator`]) and which
//! emails are already known (to filter duplicates before a pool is handed to
//! the allocator).

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::ids::IdGenerator;
use crate::types::{Participant, ParticipantRecord};

/// Read access to previously persisted participants
pub trait RecordSource {
    /// Largest numeric participant id in the store (0 when empty)
    fn max_issued_number(&self) -> Result<u32>;

    /// Lower-cased emails of every stored participant
    fn known_emails(&self) -> Result<HashSet<String>>;
}

fn max_number(records: &[ParticipantRecord]) -> u32 {
    records
        .iter()
        .filter_map(|r| r.id.number())
        .max()
        .unwrap_or(0)
}

fn emails(records: &[ParticipantRecord]) -> HashSet<String> {
    records
        .iter()
        .map(|r| r.profile.email.trim().to_lowercase())
        .collect()
}

// ─────────────────────────────────────────────────────────────────
// In-memory Roster
// ─────────────────────────────────────────────────────────────────

/// Record source held in memory
#[derive(Debug, Default)]
pub struct MemoryRoster {
    records: RwLock<Vec<ParticipantRecord>>,
}

impl MemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ParticipantRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn insert(&self, record: ParticipantRecord) {
        self.records.write().push(record);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Copy of the stored records
    pub fn records(&self) -> Vec<ParticipantRecord> {
        self.records.read().clone()
    }
}

impl RecordSource for MemoryRoster {
    fn max_issued_number(&self) -> Result<u32> {
        Ok(max_number(&self.records.read()))
    }

    fn known_emails(&self) -> Result<HashSet<String>> {
        Ok(emails(&self.records.read()))
    }
}

// ─────────────────────────────────────────────────────────────────
// JSON File Roster
// ─────────────────────────────────────────────────────────────────

/// Record source backed by a JSON array of [`ParticipantRecord`]s
#[derive(Debug, Clone)]
pub struct JsonRoster {
    path: PathBuf,
}

impl JsonRoster {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record. A missing file is an empty roster.
    pub fn read_records(&self) -> Result<Vec<ParticipantRecord>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Roster file not found, treating as empty");
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| Error::IoRead {
            path: self.path.clone(),
            source: e,
        })?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Replace the file contents with `records`
    pub fn write_records(&self, records: &[ParticipantRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json).map_err(|e| Error::IoWrite {
            path: self.path.clone(),
            source: e,
        })?;
        info!(path = %self.path.display(), count = records.len(), "Roster saved");
        Ok(())
    }

    /// Load the roster as participants, advancing `ids` past every stored id.
    ///
    /// Records that fail participant validation are skipped with a warning.
    pub fn load_participants(&self, ids: &IdGenerator) -> Result<Vec<Arc<Participant>>> {
        let records = self.read_records()?;
        let total = records.len();
        let mut participants = Vec::with_capacity(total);

        for record in records {
            let id = record.id.clone();
            match Participant::from_record(record, ids) {
                Ok(p) => participants.push(Arc::new(p)),
                Err(e) => warn!(id = %id, error = %e, "Skipping invalid participant record"),
            }
        }

        info!(
            path = %self.path.display(),
            loaded = participants.len(),
            skipped = total - participants.len(),
            "Roster loaded"
        );
        Ok(participants)
    }
}

impl RecordSource for JsonRoster {
    fn max_issued_number(&self) -> Result<u32> {
        Ok(max_number(&self.read_records()?))
    }

    fn known_emails(&self) -> Result<HashSet<String>> {
        Ok(emails(&self.read_records()?))
    }
}

/// Drop participants whose email (case-insensitive) the source already knows
pub fn filter_unseen<S>(pool: Vec<Arc<Participant>>, source: &S) -> Result<Vec<Arc<Participant>>>
where
    S: RecordSource + ?Sized,
{
    let known = source.known_emails()?;
    let before = pool.len();
    let unseen: Vec<_> = pool
        .into_iter()
        .filter(|p| !known.contains(&p.email().trim().to_lowercase()))
        .collect();
    debug!(dropped = before - unseen.len(), "Filtered known participants");
    Ok(unseen)
}
