//! Application state - Dependency injection container.
//!
//! Provides centralized access to the registry service and the
//! database handle; created once at startup and passed by reference
//! to request handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, UserStore};
use crate::services::{RegistryManager, UserRegistry};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User registry service
    pub registry: Arc<dyn UserRegistry>,
    /// Database connection
    pub database: Arc<Database>,
    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create application state from database connection and config.
    ///
    /// Wires the repository and registry against the injected database
    /// handle; no ambient globals.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let repo = Arc::new(UserStore::new(database.get_connection()));
        let registry = Arc::new(RegistryManager::new(repo, &config));

        Self {
            registry,
            database,
            config,
        }
    }
}
