//! User repository contract and write-through cached implementation.
//!
//! # Responsibility
//! - Provide `get_all/get_one/insert/update/delete` over a `RecordStore`.
//! - Keep an id -> record cache seeded at construction and maintained on
//!   every successful mutation.
//!
//! # Invariants
//! - Durable writes happen before cache writes for insert and update; a
//!   failed store write leaves the cache untouched.
//! - `delete` drops the cache entry before the store call, whatever the
//!   store reports.
//! - `update` refreshes an existing cache entry but never adds one.
//! - One mutex serializes cache access together with every store call.

use crate::codec::{self, CodecError};
use crate::model::user::{User, UserId};
use crate::store::{extract_record_id, RecordStore, StoreError};
use log::{error, info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Semantic repository error surfaced to services and the HTTP boundary.
#[derive(Debug)]
pub enum RepoError {
    NotFound(UserId),
    Encoding(CodecError),
    Decoding(CodecError),
    StorageUnavailable(StoreError),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "user not found: {id}"),
            Self::Encoding(err) | Self::Decoding(err) => write!(f, "{err}"),
            Self::StorageUnavailable(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Encoding(err) | Self::Decoding(err) => Some(err),
            Self::StorageUnavailable(err) => Some(err),
        }
    }
}

impl From<CodecError> for RepoError {
    fn from(value: CodecError) -> Self {
        match value {
            CodecError::Encode(_) => Self::Encoding(value),
            CodecError::Decode(_) => Self::Decoding(value),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::StorageUnavailable(other),
        }
    }
}

/// Repository interface for user CRUD operations.
pub trait UserRepository {
    /// Returns every stored user, in no particular order.
    fn get_all(&self) -> RepoResult<Vec<User>>;
    fn get_one(&self, id: &str) -> RepoResult<User>;
    /// Assigns a fresh id (overwriting any caller value), persists the user
    /// and returns it.
    fn insert(&self, user: User) -> RepoResult<User>;
    /// Replaces the stored user addressed by `user.id`.
    fn update(&self, user: &User) -> RepoResult<()>;
    fn delete(&self, id: &str) -> RepoResult<()>;
}

struct CacheState {
    initialized: bool,
    records: HashMap<UserId, String>,
}

/// User repository with a write-through in-memory cache over a record store.
pub struct CachedUserRepository<S> {
    store: S,
    state: Mutex<CacheState>,
}

impl<S: RecordStore> CachedUserRepository<S> {
    /// Creates the repository and seeds the cache from `store`.
    ///
    /// A failed seed is logged and the repository starts with an empty
    /// cache; reads then fall back to the store.
    pub fn new(store: S) -> Self {
        let repo = Self {
            store,
            state: Mutex::new(CacheState {
                initialized: true,
                records: HashMap::new(),
            }),
        };
        repo.reload_cache();
        repo
    }

    /// Drops the cache and rebuilds it from the record store.
    ///
    /// Returns the number of cached records. Records without an extractable
    /// id are skipped.
    pub fn reload_cache(&self) -> usize {
        let mut state = self.lock();
        state.records.clear();

        let lines = match self.store.find_all() {
            Ok(lines) => lines,
            Err(err) => {
                error!("event=cache_load module=repo status=error error={err}");
                return 0;
            }
        };

        let mut skipped = 0usize;
        for line in lines {
            let id = extract_record_id(&line).to_string();
            if id.is_empty() {
                skipped += 1;
                continue;
            }
            state.records.insert(id, line);
        }

        if skipped > 0 {
            warn!("event=cache_load module=repo status=partial skipped={skipped}");
        }
        info!(
            "event=cache_load module=repo status=ok records={}",
            state.records.len()
        );
        state.records.len()
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    pub fn cached_len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_cached(&self, id: &str) -> bool {
        self.lock().records.contains_key(id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // Every critical section leaves the map in a usable state, so a
        // panic elsewhere does not make the cache unusable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: RecordStore> UserRepository for CachedUserRepository<S> {
    fn get_all(&self) -> RepoResult<Vec<User>> {
        let state = self.lock();
        let records = if state.records.is_empty() {
            self.store.find_all()?
        } else {
            state.records.values().cloned().collect()
        };
        drop(state);

        records
            .iter()
            .map(|record| codec::decode(record).map_err(RepoError::from))
            .collect()
    }

    fn get_one(&self, id: &str) -> RepoResult<User> {
        let state = self.lock();
        let record = match state.records.get(id) {
            Some(record) => record.clone(),
            None => self.store.find_by_id(id)?,
        };
        drop(state);

        Ok(codec::decode(&record)?)
    }

    fn insert(&self, mut user: User) -> RepoResult<User> {
        user.id = Uuid::new_v4().to_string();
        let record = codec::encode(&user)?;

        let mut state = self.lock();
        self.store.insert(&record)?;
        state.records.insert(user.id.clone(), record);
        drop(state);

        info!("event=user_insert module=repo status=ok id={}", user.id);
        Ok(user)
    }

    fn update(&self, user: &User) -> RepoResult<()> {
        let record = codec::encode(user)?;

        let mut state = self.lock();
        self.store.update(&user.id, &record)?;
        if let Some(cached) = state.records.get_mut(&user.id) {
            *cached = record;
        }
        drop(state);

        info!("event=user_update module=repo status=ok id={}", user.id);
        Ok(())
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        let mut state = self.lock();
        let was_cached = state.records.remove(id).is_some();
        let result = self.store.delete(id).map_err(RepoError::from);
        drop(state);

        match &result {
            Ok(()) => info!("event=user_delete module=repo status=ok id={id}"),
            Err(err) if was_cached => warn!(
                "event=user_delete module=repo status=cache_only id={id} error={err}"
            ),
            Err(_) => {}
        }
        result
    }
}
