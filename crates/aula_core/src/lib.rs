//! Core domain logic for the student evaluation roster.
//! This crate is the single source of truth for classification, validation
//! and persistence invariants; rendering belongs to the caller.

pub mod export;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use export::csv::{to_csv, CSV_HEADERS, MISSING_DATE_LABEL};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::scale::{classify, Scale};
pub use model::student::{
    parse_grade, Field, FieldIssue, StudentId, StudentInput, StudentRecord, ValidStudent,
    ValidationError,
};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult};
pub use store::roster::{
    ClassStats, PersistError, RemoveOutcome, RosterStore, SaveOutcome, ROSTER_STORAGE_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
