use crate::core::service::{PaginationSettings, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_DATA_FILE: &str = "practitioners.json";

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    pub path: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Json,
            path: Some(DEFAULT_DATA_FILE.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_page_size: Option<u32>,
    pub max_page_size: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    pub level: Option<String>,
}

impl RegistryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RegistryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RegistryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn pagination(&self) -> PaginationSettings {
        PaginationSettings {
            default_page_size: self
                .pagination
                .default_page_size
                .unwrap_or(DEFAULT_PAGE_SIZE),
            max_page_size: self.pagination.max_page_size.unwrap_or(MAX_PAGE_SIZE),
        }
    }

    /// `--data-file` wins over whatever the file says.
    pub fn use_data_file(&mut self, path: impl Into<String>) {
        self.storage.backend = StorageBackend::Json;
        self.storage.path = Some(path.into());
    }

    pub fn data_file(&self) -> Option<&str> {
        match self.storage.backend {
            StorageBackend::Json => self.storage.path.as_deref(),
            StorageBackend::Memory => None,
        }
    }
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Result<()> {
        let pagination = self.pagination();
        validate_range("pagination.max_page_size", pagination.max_page_size, 1, u32::MAX)
            .map_err(config_error)?;
        validate_range(
            "pagination.default_page_size",
            pagination.default_page_size,
            1,
            pagination.max_page_size,
        )
        .map_err(config_error)?;

        if self.storage.backend == StorageBackend::Json {
            let path = self.storage.path.as_deref().unwrap_or_default();
            validate_non_empty_string("storage.path", path).map_err(config_error)?;
        }

        if let Some(level) = &self.logging.level {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.to_lowercase().as_str()) {
                return Err(RegistryError::ConfigError {
                    message: format!(
                        "logging.level '{}' is not one of {}",
                        level,
                        valid_levels.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}

fn config_error(err: RegistryError) -> RegistryError {
    match err {
        RegistryError::ValidationError { field, reason } => RegistryError::ConfigError {
            message: format!("{}: {}", field, reason),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RegistryConfig::from_toml_str("").unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert_eq!(config.data_file(), Some(DEFAULT_DATA_FILE));
        assert_eq!(config.pagination(), PaginationSettings::default());
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
backend = "memory"

[pagination]
default_page_size = 10
max_page_size = 20

[logging]
format = "json"
level = "debug"
"#;

        let config = RegistryConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.data_file(), None);
        assert_eq!(config.pagination().default_page_size, 10);
        assert_eq!(config.pagination().max_page_size, 20);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PRACTITIONER_REGISTRY_TEST_DIR", "/var/lib/registry");

        let toml_content = r#"
[storage]
backend = "json"
path = "${PRACTITIONER_REGISTRY_TEST_DIR}/data.json"
"#;

        let config = RegistryConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_file(), Some("/var/lib/registry/data.json"));

        std::env::remove_var("PRACTITIONER_REGISTRY_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = RegistryConfig::from_toml_str(
            r#"
[pagination]
default_page_size = 30
max_page_size = 20
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(RegistryError::ConfigError { .. })
        ));

        let config = RegistryConfig::from_toml_str(
            r#"
[storage]
backend = "json"
path = "  "
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = RegistryConfig::from_toml_str(
            r#"
[logging]
level = "loud"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = RegistryConfig::from_toml_str("[storage\nbackend=").unwrap_err();
        assert!(matches!(err, RegistryError::ConfigError { .. }));
    }

    #[test]
    fn test_data_file_override() {
        let mut config = RegistryConfig::from_toml_str("[storage]\nbackend = \"memory\"").unwrap();
        config.use_data_file("/tmp/override.json");
        assert_eq!(config.data_file(), Some("/tmp/override.json"));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[pagination]\ndefault_page_size = 7\n")
            .unwrap();

        let config = RegistryConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pagination().default_page_size, 7);
    }
}
