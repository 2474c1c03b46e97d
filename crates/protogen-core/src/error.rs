//! Error types for message generation

use thiserror::Error;

/// Result type alias for crate-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for per-operation generation
pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

/// Errors detected while building plugins or loading settings
///
/// These are fatal and surface before any message is transformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A field-injection plugin was configured without one of its required properties
    #[error(
        "{plugin} is a field-injection plugin: to instantiate it you need to specify a {property} attribute"
    )]
    MissingProperty {
        plugin: String,
        property: &'static str,
    },

    /// Plugin kind not known to the registry
    #[error("unknown generation plugin: {0}")]
    UnknownPlugin(String),

    /// Settings could not be parsed
    #[error("invalid generation settings: {0}")]
    InvalidSettings(String),
}

/// Errors raised while assembling descriptors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("field name cannot be empty")]
    EmptyFieldName,

    #[error("message name cannot be empty")]
    EmptyMessageName,

    /// Two fields of one message share a name
    #[error("field '{field}' is declared more than once in message '{message}'")]
    DuplicateField { message: String, field: String },
}

/// Failure while deriving the schema of one data shape
///
/// No partial schema is emitted for the unit that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error on protobuf generation on model {model_name} on app {app_name}: {detail}")]
pub struct GenerationError {
    pub app_name: String,
    pub model_name: String,
    pub detail: String,
}

impl GenerationError {
    /// Detail used when none is supplied
    pub const DEFAULT_DETAIL: &'static str = "Unknown";

    /// Create a new generation error
    pub fn new(
        app_name: impl Into<String>,
        model_name: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            model_name: model_name.into(),
            detail: detail.into(),
        }
    }

    /// Create a generation error carrying the default detail
    pub fn unknown(app_name: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self::new(app_name, model_name, Self::DEFAULT_DETAIL)
    }
}

/// Any error produced by this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
