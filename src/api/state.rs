//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
    pub config: Arc<Config>,
    /// Absent when running over a non-SQL storage (tests)
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Build state over the SeaORM storage engine.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Services::from_connection(database.get_connection(), &config);
        Self {
            services: Arc::new(services),
            config: Arc::new(config),
            database: Some(database),
        }
    }

    /// Build state around an already wired container.
    pub fn new(services: Arc<dyn ServiceContainer>, config: Config) -> Self {
        Self {
            services,
            config: Arc::new(config),
            database: None,
        }
    }
}
