use crate::config::Config;
use crate::health::HealthReporter;
use crate::store::KvStore;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: KvStore,
    pub health: HealthReporter,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, started_at: Instant) -> Self {
        Self {
            store: KvStore::new(),
            health: HealthReporter::new(started_at),
            config: Arc::new(config),
        }
    }
}
