//! Application state with repository-based storage.
//!
//! Handlers see the database only through the repository traits from
//! `foodshare_core::storage`, so tests can swap in a repository on a
//! temporary file.

use std::sync::Arc;

use foodshare_core::storage::{
    ClaimRepository, FoodRepository, ProviderRepository, ReceiverRepository, ReportRepository,
};

use crate::config::Config;
use crate::storage::SqliteRepository;

/// Shared application state.
///
/// Cloned for each request handler. Every repository call opens and closes
/// its own database connection, so nothing here holds a connection open.
#[derive(Clone)]
pub struct AppState {
    pub provider_repo: Arc<dyn ProviderRepository>,
    pub food_repo: Arc<dyn FoodRepository>,
    pub receiver_repo: Arc<dyn ReceiverRepository>,
    pub claim_repo: Arc<dyn ClaimRepository>,
    pub report_repo: Arc<dyn ReportRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates an AppState whose repositories all share one SQLite backend.
    pub fn new(repo: SqliteRepository, config: Config) -> Self {
        let repo = Arc::new(repo);
        Self {
            provider_repo: repo.clone(),
            food_repo: repo.clone(),
            receiver_repo: repo.clone(),
            claim_repo: repo.clone(),
            report_repo: repo,
            config: Arc::new(config),
        }
    }
}
