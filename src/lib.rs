pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{InMemoryRepository, JsonFileRepository};
pub use crate::config::RegistryConfig;
pub use crate::core::commands::{Command, CommandDispatcher, CommandOutcome};
pub use crate::core::service::{PaginationSettings, PractitionerService};
pub use crate::utils::error::{RegistryError, Result};
