use crate::domain::model::PractitionerId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error on '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Practitioner {id} not found")]
    NotFoundError { id: PractitionerId },

    #[error("Professional document '{document}' is already registered")]
    ConflictError { document: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl RegistryError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::NotFoundError { .. } => ErrorCategory::NotFound,
            Self::ConflictError { .. } => ErrorCategory::Conflict,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) | Self::StorageError { .. } => {
                ErrorCategory::Storage
            }
        }
    }

    /// Caller mistakes are `High`, broken infrastructure is `Critical`.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound => ErrorSeverity::Medium,
            ErrorCategory::Validation | ErrorCategory::Conflict => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::NotFound | ErrorCategory::Conflict
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { field, reason } => {
                format!("The field '{}' is invalid: {}", field, reason)
            }
            Self::NotFoundError { id } => format!("No practitioner is registered with id {}", id),
            Self::ConflictError { document } => format!(
                "Another practitioner already uses the professional document '{}'",
                document
            ),
            Self::ConfigError { message } => format!("The configuration is invalid: {}", message),
            Self::IoError(e) => format!("Could not access the data store: {}", e),
            Self::SerializationError(e) => format!("The data store could not be decoded: {}", e),
            Self::StorageError { message } => format!("The data store rejected the request: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Fix the highlighted field and submit the request again",
            ErrorCategory::NotFound => "Check the practitioner id; use `list` to see active records",
            ErrorCategory::Conflict => "Verify the professional document; each one can be registered once",
            ErrorCategory::Configuration => "Review the TOML configuration file and command-line flags",
            ErrorCategory::Storage => "Check that the data file exists, is readable and is valid JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
