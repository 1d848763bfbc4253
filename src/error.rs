//! Top-level error types for the packaging CLI.
//!
//! Step-level failures live in [`crate::packager::Error`]; this module wraps them
//! together with configuration and argument errors and maps everything to an exit code.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Exit code for invalid configuration or inputs
pub const EXIT_INVALID_INPUT: i32 = 2;

/// Exit code for every other failure
pub const EXIT_FAILURE: i32 = 1;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Packaging step errors
    #[error(transparent)]
    Packager(#[from] crate::packager::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Conflicting arguments
    #[error("Conflicting arguments: {arguments:?}")]
    ConflictingArguments {
        /// Arguments that conflict
        arguments: Vec<String>,
    },

    /// Config file could not be read
    #[error("Cannot read config file {path}: {reason}")]
    ConfigUnreadable {
        /// Config file path
        path: std::path::PathBuf,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            Self::Packager(e) => e.recovery_suggestions(),
            Self::Toml(_) => vec![
                "Fix the syntax of the config file".to_string(),
                "Known tables are [package], [tools] and [output]".to_string(),
            ],
            Self::Cli(CliError::ConfigUnreadable { .. }) => vec![
                "Check the --config path or the TIMVIEW_BUNDLE_CONFIG variable".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Packager(e) => e.exit_code(),
            Self::Cli(_) | Self::Toml(_) => EXIT_INVALID_INPUT,
            Self::Io(_) => EXIT_FAILURE,
        }
    }
}
