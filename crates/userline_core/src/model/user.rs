//! User domain model.
//!
//! # Responsibility
//! - Define the user record and its wire field names.
//! - Validate required text fields before persistence.
//!
//! # Invariants
//! - `first_name`, `last_name` and `biography` are non-empty after trimming
//!   for every user accepted by a write path.
//! - `id` is assigned by the repository on insert; caller values are
//!   overwritten.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque user identifier (UUID v4 text for generated ids).
///
/// Kept as a type alias so signatures show intent without forcing callers
/// to parse the value.
pub type UserId = String;

/// Canonical user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// System-assigned identifier. Empty until inserted.
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub biography: String,
}

/// Validation failure for user write paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    BlankFirstName,
    BlankLastName,
    BlankBiography,
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankFirstName => write!(f, "first_name must not be blank"),
            Self::BlankLastName => write!(f, "last_name must not be blank"),
            Self::BlankBiography => write!(f, "biography must not be blank"),
        }
    }
}

impl Error for UserValidationError {}

impl User {
    /// Creates an unsaved user with an empty identifier.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        biography: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            biography: biography.into(),
        }
    }

    /// Returns a copy carrying the given identifier.
    pub fn with_id(mut self, id: impl Into<UserId>) -> Self {
        self.id = id.into();
        self
    }

    /// Checks required text fields.
    ///
    /// Fields are checked in wire order and the first blank one is reported.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if is_blank(&self.first_name) {
            return Err(UserValidationError::BlankFirstName);
        }
        if is_blank(&self.last_name) {
            return Err(UserValidationError::BlankLastName);
        }
        if is_blank(&self.biography) {
            return Err(UserValidationError::BlankBiography);
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
