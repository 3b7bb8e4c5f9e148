//! Use-case services used by outer surfaces.
//!
//! # Responsibility
//! - Apply request-level validation before repository calls.
//! - Keep HTTP and other adapters free of persistence details.

pub mod user_service;
