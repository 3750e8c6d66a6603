pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::hunt::{HuntSession, HuntSettings, HuntUseCase};
use crate::application::preferences::PreferencesUseCase;
use crate::domain::entities::watch_target::WatchTarget;
use crate::domain::error::DomainError;
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::page_fetcher::PageFetcher;
use crate::domain::ports::preference_store::PreferenceStore;
use crate::domain::ports::sleeper::Sleeper;
use crate::domain::values::threshold::ThresholdConfig;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::preference_repo::SqlitePreferenceRepo;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

/// The collaborators a hunt session talks to.
pub struct HuntPorts {
    pub fetcher: Arc<dyn PageFetcher>,
    pub notifier: Arc<dyn Notifier>,
    pub sleeper: Arc<dyn Sleeper>,
}

pub struct AuctionHunter {
    preferences: PreferencesUseCase,
}

impl AuctionHunter {
    /// Opens (creating if needed) the preference database at `db_path`.
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        if db_path != ":memory:" {
            if let Some(dir) = Path::new(db_path).parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir).map_err(|e| {
                    DomainError::Database(format!("Creation of the {} directory failed: {e}", dir.display()))
                })?;
            }
        }
        let conn = Connection::open(db_path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        run_migrations(&conn).map_err(DomainError::Database)?;
        Ok(Self::with_store(Arc::new(SqlitePreferenceRepo::new(conn))))
    }

    pub fn with_store(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            preferences: PreferencesUseCase::new(store),
        }
    }

    pub fn preferences(&self) -> &PreferencesUseCase {
        &self.preferences
    }

    /// Validates the threshold against the target and prepares a session.
    pub fn session(
        &self,
        target: WatchTarget,
        config: ThresholdConfig,
        settings: HuntSettings,
        ports: HuntPorts,
    ) -> Result<HuntSession, DomainError> {
        let hunt = HuntUseCase::new(ports.fetcher, ports.notifier, ports.sleeper, settings);
        HuntSession::new(target, config, hunt)
    }
}
