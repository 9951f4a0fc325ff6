//! Error types for Plasma

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Plasma operations
pub type Result<T> = std::result::Result<T, PlasmaError>;

/// Main error type for Plasma
#[derive(Error, Debug)]
pub enum PlasmaError {
    /// Settings file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Command resolution and execution errors
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Command-line parsing errors
    #[error("{0}")]
    Cli(#[from] clap::Error),
}

/// Settings file discovery and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file '{path}': {error}")]
    Read { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failures at the registry/dispatch boundary
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DispatchError {
    /// The token matched no key, directly or through category fallback
    #[error("Command '{command}' not found")]
    NotFound {
        command: String,
        categories: Vec<String>,
    },

    /// `list:<category>` named a category with no commands
    #[error("No commands found in category '{category}'")]
    EmptyCategory {
        category: String,
        categories: Vec<String>,
    },

    /// The handler returned an error or panicked
    #[error("Error executing command '{command}': {message}")]
    Execution { command: String, message: String },
}

impl DispatchError {
    /// Categories known at the time of the failure, for remediation hints
    pub fn categories(&self) -> &[String] {
        match self {
            DispatchError::NotFound { categories, .. }
            | DispatchError::EmptyCategory { categories, .. } => categories,
            DispatchError::Execution { .. } => &[],
        }
    }
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for dispatch operations
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DispatchError::NotFound {
            command: "nope".to_string(),
            categories: vec!["env".to_string()],
        };
        assert_eq!(err.to_string(), "Command 'nope' not found");
        assert_eq!(err.categories(), &["env".to_string()]);
    }

    #[test]
    fn test_execution_has_no_categories() {
        let err = DispatchError::Execution {
            command: "git:status".to_string(),
            message: "boom".to_string(),
        };
        assert!(err.categories().is_empty());
        assert!(err.to_string().contains("git:status"));
    }

    #[test]
    fn test_config_error_wraps() {
        let err: PlasmaError = ConfigError::Invalid("bad".to_string()).into();
        assert_eq!(err.to_string(), "Configuration error: Invalid configuration: bad");
    }
}
