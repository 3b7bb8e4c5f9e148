use std::path::PathBuf;
use std::sync::Arc;
use userline_core::{CachedUserRepository, FileRecordStore, UserService};

pub type FileUserRepository = CachedUserRepository<FileRecordStore>;
pub type SharedUserService = Arc<UserService<FileUserRepository>>;

#[derive(Clone)]
pub struct AppState {
    pub user_service: SharedUserService,
}

impl AppState {
    pub fn new(user_service: SharedUserService) -> Self {
        Self { user_service }
    }

    /// Builds the service stack over the record file at `data_file`,
    /// seeding the repository cache from it.
    pub fn open(data_file: impl Into<PathBuf>) -> Self {
        let repository = CachedUserRepository::new(FileRecordStore::new(data_file));
        Self::new(Arc::new(UserService::new(repository)))
    }
}
