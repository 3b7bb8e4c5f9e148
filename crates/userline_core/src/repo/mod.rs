//! Repository layer between callers and durable record storage.
//!
//! # Responsibility
//! - Define the user CRUD contract consumed by services and the HTTP layer.
//! - Map storage and codec failures onto a small semantic error taxonomy.
//!
//! # Invariants
//! - The record store is the source of truth; any in-memory state is a cache.
//! - Bulk reads fail as a whole instead of returning partial results.

pub mod user_repo;
