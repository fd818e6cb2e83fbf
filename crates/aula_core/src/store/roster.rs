//! Roster store: validated CRUD, derived stats, persistence round-trip.
//!
//! # Responsibility
//! - Mediate every roster mutation through validation and classification.
//! - Serialize the whole roster to storage after each successful mutation.
//! - Rehydrate state at startup, degrading to an empty roster on bad data.
//!
//! # Invariants
//! - Record ids are unique across the roster; insertion order is preserved.
//! - The in-memory roster stays authoritative even when a storage write
//!   fails; callers learn of the failure through the outcome's
//!   `persist_warning` and the session continues.
//! - A failed validation performs no mutation at all.

use crate::model::scale::Scale;
use crate::model::student::{
    round_to_tenth, StudentId, StudentInput, StudentRecord, ValidationError,
};
use crate::storage::{KeyValueStorage, StorageError};
use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key holding the serialized roster.
///
/// Kept identical to the original payload schema so existing rosters
/// rehydrate without migration.
pub const ROSTER_STORAGE_KEY: &str = "students";

/// Non-fatal persistence failure reported alongside a successful mutation.
#[derive(Debug)]
pub enum PersistError {
    Storage(StorageError),
    Serialize(serde_json::Error),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "roster serialization failed: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

/// Result envelope for `add_or_update`.
#[derive(Debug)]
pub struct SaveOutcome {
    /// The created or updated record as it now exists in the roster.
    pub record: StudentRecord,
    /// Set when the in-memory mutation applied but persistence failed.
    pub persist_warning: Option<PersistError>,
}

/// Result envelope for `remove`.
#[derive(Debug)]
pub struct RemoveOutcome {
    /// Whether a record with the given id existed and was removed.
    pub removed: bool,
    /// Set when the in-memory mutation applied but persistence failed.
    pub persist_warning: Option<PersistError>,
}

/// Derived per-class statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStats {
    /// Total record count.
    pub total: usize,
    /// Mean grade rounded to one decimal (half away from zero); `None` for
    /// an empty roster.
    pub mean: Option<f64>,
    /// Record count per appreciation bucket, only for buckets present.
    pub per_scale: BTreeMap<Scale, usize>,
}

/// Authoritative roster and its storage adapter.
pub struct RosterStore<S: KeyValueStorage> {
    storage: S,
    records: Vec<StudentRecord>,
}

impl<S: KeyValueStorage> RosterStore<S> {
    /// Rehydrates the roster from storage.
    ///
    /// Absent data, a storage read failure, or a payload that fails to parse
    /// all start the session with an empty roster; bad persisted state is
    /// treated as absence, never as a fatal error.
    pub fn load(storage: S) -> Self {
        let records = match storage.get(ROSTER_STORAGE_KEY) {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<StudentRecord>>(&payload) {
                Ok(records) => records,
                Err(err) => {
                    warn!(
                        "event=roster_load module=store status=degraded reason=parse_failed error={err}"
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(
                    "event=roster_load module=store status=degraded reason=read_failed error={err}"
                );
                Vec::new()
            }
        };

        info!(
            "event=roster_load module=store status=ok count={}",
            records.len()
        );
        Self { storage, records }
    }

    /// Creates a record, or updates the one matching `target`.
    ///
    /// # Contract
    /// - Input failing validation leaves the roster untouched and returns
    ///   every field issue at once.
    /// - A matched `target` keeps its `id` and `created_at`; name, subject,
    ///   grade and the derived scale are replaced.
    /// - An absent or unmatched `target` creates a fresh record with a new
    ///   unique id and today's creation stamp.
    /// - The whole roster is persisted before returning; a write failure is
    ///   surfaced through `SaveOutcome::persist_warning`.
    pub fn add_or_update(
        &mut self,
        input: &StudentInput,
        target: Option<StudentId>,
    ) -> Result<SaveOutcome, ValidationError> {
        let valid = input.validate()?;

        let position =
            target.and_then(|id| self.records.iter().position(|record| record.id == id));

        let record = match position {
            Some(index) => {
                let existing = &mut self.records[index];
                existing.update(valid.name, valid.subject, valid.grade);
                existing.clone()
            }
            None => {
                let record = StudentRecord::new(valid.name, valid.subject, valid.grade);
                self.records.push(record.clone());
                record
            }
        };

        let persist_warning = self.persist();
        info!(
            "event=roster_save module=store status=ok id={} mode={} count={}",
            record.id,
            if position.is_some() { "update" } else { "create" },
            self.records.len()
        );

        Ok(SaveOutcome {
            record,
            persist_warning,
        })
    }

    /// Removes the record with `id`, if present.
    ///
    /// A miss is not an error; storage is only rewritten when something was
    /// actually removed.
    pub fn remove(&mut self, id: StudentId) -> RemoveOutcome {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        let removed = self.records.len() != before;

        let persist_warning = if removed { self.persist() } else { None };
        info!(
            "event=roster_remove module=store status=ok id={id} removed={removed} count={}",
            self.records.len()
        );

        RemoveOutcome {
            removed,
            persist_warning,
        }
    }

    /// Returns the record with `id`, if present.
    pub fn get(&self, id: StudentId) -> Option<&StudentRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Current roster in insertion order. Read-only, no side effects.
    pub fn list(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Derives class statistics from the current roster.
    pub fn stats(&self) -> ClassStats {
        let total = self.records.len();
        let mean = if total == 0 {
            None
        } else {
            let sum: f64 = self.records.iter().map(|record| record.grade).sum();
            Some(round_to_tenth(sum / total as f64))
        };

        let mut per_scale = BTreeMap::new();
        for record in &self.records {
            *per_scale.entry(record.scale).or_insert(0usize) += 1;
        }

        ClassStats {
            total,
            mean,
            per_scale,
        }
    }

    /// Consumes the store and hands back its storage adapter.
    ///
    /// Lets a caller end one session and rehydrate another from the same
    /// adapter (see the restart round-trip tests).
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) -> Option<PersistError> {
        let payload = match serde_json::to_string(&self.records) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(
                    "event=roster_persist module=store status=warning reason=serialize_failed error={err}"
                );
                return Some(PersistError::Serialize(err));
            }
        };

        match self.storage.put(ROSTER_STORAGE_KEY, &payload) {
            Ok(()) => None,
            Err(err) => {
                warn!(
                    "event=roster_persist module=store status=warning reason=write_failed error={err}"
                );
                Some(PersistError::Storage(err))
            }
        }
    }
}
