//! User use-case service.
//!
//! # Responsibility
//! - Provide validated CRUD entry points over a `UserRepository`.
//!
//! # Invariants
//! - Invalid users never reach the repository.
//! - Update targets the addressed id; an id carried by the payload is
//!   overwritten.

use crate::model::user::{User, UserValidationError};
use crate::repo::user_repo::{RepoError, UserRepository};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    Validation(UserValidationError),
    Repo(RepoError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repo(err) if err.is_not_found())
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid user: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<UserValidationError> for ServiceError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Validated CRUD wrapper around a user repository.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn list_users(&self) -> ServiceResult<Vec<User>> {
        Ok(self.repo.get_all()?)
    }

    pub fn get_user(&self, id: &str) -> ServiceResult<User> {
        Ok(self.repo.get_one(id)?)
    }

    /// Validates and inserts a user, returning it with its generated id.
    pub fn create_user(&self, user: User) -> ServiceResult<User> {
        user.validate()?;
        Ok(self.repo.insert(user)?)
    }

    /// Validates and replaces the user stored under `id`.
    pub fn update_user(&self, id: &str, user: User) -> ServiceResult<User> {
        let user = user.with_id(id);
        user.validate()?;
        self.repo.update(&user)?;
        Ok(user)
    }

    pub fn delete_user(&self, id: &str) -> ServiceResult<()> {
        Ok(self.repo.delete(id)?)
    }
}
