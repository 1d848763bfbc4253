//! Packaging step errors and context helpers.

use super::steps::Step;
use crate::error::{EXIT_FAILURE, EXIT_INVALID_INPUT};
use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Number of trailing stderr lines kept on a failed step
pub const STDERR_TAIL_LINES: usize = 20;

/// Errors produced while preparing or running the packaging steps
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Requirements manifest does not exist
    #[error("requirements manifest not found: {}", .0.display())]
    ManifestMissing(PathBuf),

    /// Entry-point script does not exist or is not a file
    #[error("entry script not found: {}", .0.display())]
    EntryScriptMissing(PathBuf),

    /// Icon resource does not exist
    #[error("icon file not found: {}", .0.display())]
    IconMissing(PathBuf),

    /// Icon resource exists but is not an .ico file
    #[error("icon file is not a Windows .ico resource: {}", .0.display())]
    IconInvalid(PathBuf),

    /// `--clean` would delete files the run depends on
    #[error("refusing to clean work directory {}: {reason}", .path.display())]
    UnsafeWorkDir {
        /// Work directory as configured
        path: PathBuf,
        /// What removing it would destroy
        reason: &'static str,
    },

    /// External tool could not be located
    #[error("{tool} not found: {hint}")]
    ToolNotFound {
        /// Tool name
        tool: String,
        /// How to get it
        hint: String,
    },

    /// External command could not be spawned or awaited
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Underlying IO error
        #[source]
        error: std::io::Error,
    },

    /// External command ran and reported failure
    #[error("{step} step failed ({})", describe_exit(.code))]
    StepFailed {
        /// Which step failed
        step: Step,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Last lines the tool wrote to stderr
        stderr_tail: Vec<String>,
    },

    /// PyInstaller succeeded but the expected output is absent
    #[error("PyInstaller reported success but no artifact exists at {}", .path.display())]
    ArtifactMissing {
        /// Expected artifact path
        path: PathBuf,
    },

    /// One or more preflight checks failed
    #[error("preflight found {} problem(s): {}", .0.len(), join_errors(.0))]
    Preflight(Vec<Error>),

    /// Filesystem operation failed on a known path
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        error: std::io::Error,
    },

    /// IO error without path context
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Anything else
    #[error("{0}")]
    GenericError(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

fn join_errors(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Process exit code for this error.
    ///
    /// A failed step propagates the tool's own exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::StepFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            Self::ManifestMissing(_)
            | Self::EntryScriptMissing(_)
            | Self::IconMissing(_)
            | Self::IconInvalid(_)
            | Self::UnsafeWorkDir { .. }
            | Self::Preflight(_) => EXIT_INVALID_INPUT,
            _ => EXIT_FAILURE,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            Self::ManifestMissing(path) => vec![
                format!("Create {} listing the required packages", path.display()),
                "Or pass --skip-install if the environment is already prepared".to_string(),
            ],
            Self::EntryScriptMissing(_) => {
                vec!["Point --entry at the application's .py entry script".to_string()]
            }
            Self::IconMissing(_) | Self::IconInvalid(_) => {
                vec!["Point --icon at a valid Windows .ico file".to_string()]
            }
            Self::UnsafeWorkDir { .. } => vec![
                "Point --work-dir at a directory used only for PyInstaller's build files"
                    .to_string(),
                "Or drop --clean".to_string(),
            ],
            Self::ToolNotFound { tool, .. } => vec![
                format!("Install {tool} into the active Python environment"),
                "Or pass --python to run tools as `python -m ...`".to_string(),
            ],
            Self::StepFailed { stderr_tail, .. } => {
                let mut suggestions = vec!["Last lines written by the tool:".to_string()];
                suggestions.extend(stderr_tail.iter().cloned());
                suggestions
            }
            Self::Preflight(errors) => errors
                .iter()
                .flat_map(Error::recovery_suggestions)
                .collect(),
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// True for errors reported by the input checks rather than the tools
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::ManifestMissing(_)
                | Self::EntryScriptMissing(_)
                | Self::IconMissing(_)
                | Self::IconInvalid(_)
        )
    }
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wrap an IO error with what was being done and on which path
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Convert missing values into packaging errors.
pub trait Context<T> {
    /// Attach a message
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

/// Return early with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::packager::Error::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflight_lists_every_problem() {
        let err = Error::Preflight(vec![
            Error::ManifestMissing("requirements.txt".into()),
            Error::IconMissing("icon.ico".into()),
        ]);
        let message = err.to_string();
        assert!(message.contains("2 problem(s)"));
        assert!(message.contains("requirements.txt"));
        assert!(message.contains("icon.ico"));
        assert_eq!(err.exit_code(), EXIT_INVALID_INPUT);
    }

    #[test]
    fn signal_termination_is_a_generic_failure() {
        let err = Error::StepFailed {
            step: Step::Install,
            code: None,
            stderr_tail: vec![],
        };
        assert_eq!(err.exit_code(), EXIT_FAILURE);
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn fs_context_keeps_path() {
        let res: std::io::Result<()> = Err(std::io::Error::other("boom"));
        let err = res.fs_context("reading", "dist/app").unwrap_err();
        assert!(err.to_string().starts_with("reading dist/app"));
    }

    #[test]
    fn bare_io_error_is_a_generic_failure() {
        let err = Error::from(std::io::Error::other("walk interrupted"));
        assert!(matches!(err, Error::IoError(_)));
        assert_eq!(err.exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn unsafe_work_dir_is_an_input_error() {
        let err = Error::UnsafeWorkDir {
            path: ".".into(),
            reason: "it contains the entry script",
        };
        assert_eq!(err.exit_code(), EXIT_INVALID_INPUT);
        assert!(err.to_string().contains("refusing to clean"));
    }

    #[test]
    fn option_context_becomes_generic_error() {
        let value: Option<u8> = None;
        let err = value.context("working_dir is required").unwrap_err();
        assert!(matches!(err, Error::GenericError(msg) if msg == "working_dir is required"));
    }
}
