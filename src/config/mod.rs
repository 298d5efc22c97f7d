pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::{CliCommand, CliConfig};
pub use toml_config::{LogFormat, RegistryConfig, StorageBackend};

use crate::adapters::{InMemoryRepository, JsonFileRepository};
use crate::core::PractitionerRepository;
use crate::utils::error::{RegistryError, Result};
use std::sync::Arc;

pub async fn open_repository(config: &RegistryConfig) -> Result<Arc<dyn PractitionerRepository>> {
    match (config.storage.backend, config.data_file()) {
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using in-memory storage; records are lost when the process exits");
            Ok(Arc::new(InMemoryRepository::new()))
        }
        (StorageBackend::Json, Some(path)) => {
            tracing::debug!("Opening JSON data file {}", path);
            Ok(Arc::new(JsonFileRepository::open(path).await?))
        }
        (StorageBackend::Json, None) => Err(RegistryError::ConfigError {
            message: "storage.path is required for the json backend".to_string(),
        }),
    }
}
