//! Configuration errors.
//!
//! Registry and binding operations never fail; the only fallible surface is
//! loading and validating a [`RegistryConfig`](crate::RegistryConfig).

use std::path::PathBuf;

/// Error type for registry configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// YAML parse error.
    Parse {
        /// Optional source file path.
        path: Option<PathBuf>,
        /// Error message from the YAML parser.
        message: String,
    },

    /// The config file could not be read.
    Load {
        /// Path that failed to read.
        path: PathBuf,
        /// Error message from the filesystem.
        message: String,
    },

    /// The placeholder token is empty.
    ///
    /// An empty placeholder would match between every character of a
    /// template, so it is rejected up front.
    EmptyPlaceholder,

    /// The default scope name is empty.
    EmptyScope,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse { path, message } => {
                if let Some(p) = path {
                    write!(f, "Failed to parse registry config {}: {}", p.display(), message)
                } else {
                    write!(f, "Failed to parse registry config: {}", message)
                }
            }
            ConfigError::Load { path, message } => {
                write!(
                    f,
                    "Failed to read registry config \"{}\": {}",
                    path.display(),
                    message
                )
            }
            ConfigError::EmptyPlaceholder => {
                write!(f, "placeholder token must not be empty")
            }
            ConfigError::EmptyScope => {
                write!(f, "default scope name must not be empty")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
