//! The packaging steps, in execution order.
//!
//! - `install` - pip install of the requirements manifest
//! - `freeze` - PyInstaller invocation
//! - `notice` - completion message and acknowledgement pause

mod freeze;
mod install;
mod notice;

pub use freeze::{pyinstaller_invocation, run_freeze};
pub use install::{install_invocation, run_install};
pub use notice::{COMPLETION_MESSAGE, acknowledge, wait_for_acknowledgement};

use super::error::{Error, STDERR_TAIL_LINES};
use super::process::StepOutcome;
use std::fmt;

/// A step that runs an external tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Dependency installer step
    Install,
    /// Packager invocation step
    Package,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Install => write!(f, "dependency install"),
            Step::Package => write!(f, "PyInstaller packaging"),
        }
    }
}

/// Turns a finished step into an error when the tool reported failure.
pub(crate) fn check_outcome(step: Step, outcome: StepOutcome) -> Result<(), Error> {
    if outcome.success {
        return Ok(());
    }

    let skip = outcome.stderr_lines.len().saturating_sub(STDERR_TAIL_LINES);
    Err(Error::StepFailed {
        step,
        code: outcome.code,
        stderr_tail: outcome.stderr_lines.into_iter().skip(skip).collect(),
    })
}
