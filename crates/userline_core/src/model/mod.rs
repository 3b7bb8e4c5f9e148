//! Domain model for the user directory.
//!
//! # Responsibility
//! - Define the canonical `User` value shared by storage and HTTP layers.
//! - Own the validity predicate applied before writes reach the repository.
//!
//! # Invariants
//! - Every persisted user carries a system-generated `UserId`.
//! - Identifiers are opaque strings outside record-id extraction.

pub mod user;
