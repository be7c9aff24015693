pub mod app_config;
pub mod error;
pub mod json_repo;
pub mod memory_repo;

use std::sync::Arc;

use pitch_core::BookingService;
use tracing::info;

pub use error::StoreError;
pub use json_repo::JsonFileStore;
pub use memory_repo::InMemoryStore;

use app_config::{StorageBackend, StorageConfig};

/// Wires the configured backend into a [`BookingService`].
pub fn open_service(config: &StorageConfig) -> BookingService {
    match config.backend {
        StorageBackend::Json => {
            info!("Using JSON file store in {}", config.data_dir.display());
            let store = Arc::new(JsonFileStore::new(&config.data_dir));
            BookingService::new(store.clone(), store)
        }
        StorageBackend::Memory => {
            info!("Using in-memory store; data will not survive a restart");
            let store = Arc::new(InMemoryStore::new());
            BookingService::new(store.clone(), store)
        }
    }
}
