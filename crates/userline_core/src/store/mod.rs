//! Durable record storage beneath the user repository.
//!
//! # Responsibility
//! - Define the line-oriented `RecordStore` contract.
//! - Provide the flat-file implementation and record-id extraction.
//!
//! # Invariants
//! - A store is entity-agnostic: it only knows how to find a record's id.
//! - At most one stored record exists per identifier.
//! - Blank lines carry no meaning and are never returned.
//! - The empty identifier never matches a record.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

mod file;
mod record_id;

pub use file::FileRecordStore;
pub use record_id::extract_record_id;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// No record carries the requested identifier.
    NotFound(String),
    /// The backing file could not be opened, read or written.
    Unavailable { path: PathBuf, source: io::Error },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Unavailable { path, source } => {
                write!(f, "record store `{}` unavailable: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Unavailable { source, .. } => Some(source),
        }
    }
}

/// Line-oriented record storage keyed by embedded identifiers.
///
/// Lookups are linear scans; an indexed backend can implement the same
/// contract without changing repository semantics.
pub trait RecordStore {
    /// Returns every non-blank record in storage order.
    fn find_all(&self) -> StoreResult<Vec<String>>;
    /// Returns the first record whose extracted id equals `id`.
    fn find_by_id(&self, id: &str) -> StoreResult<String>;
    /// Appends a record. Duplicate ids are not checked here.
    fn insert(&self, record: &str) -> StoreResult<()>;
    /// Replaces the record carrying `id`, keeping the order of the others.
    fn update(&self, id: &str, record: &str) -> StoreResult<()>;
    /// Drops the record carrying `id`, keeping the order of the others.
    fn delete(&self, id: &str) -> StoreResult<()>;
    /// Removes every record.
    fn clear(&self) -> StoreResult<()>;
}
