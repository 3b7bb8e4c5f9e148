//! Core domain and persistence logic for the Userline user directory.
//! This crate owns the user model, the flat-file record store and the
//! cached repository on top of it.

pub mod codec;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use codec::{decode, encode, CodecError};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingConfig};
pub use model::user::{User, UserId, UserValidationError};
pub use repo::user_repo::{CachedUserRepository, RepoError, RepoResult, UserRepository};
pub use service::user_service::{ServiceError, ServiceResult, UserService};
pub use store::{extract_record_id, FileRecordStore, RecordStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
