//! Dependency installer step.

use super::{Step, check_outcome};
use crate::packager::{
    error::Result,
    process::{Invocation, ProcessRunner, Tool},
    settings::Settings,
};
use std::ffi::OsString;

/// Builds `pip install -r <manifest>`.
pub fn install_invocation(pip: &Tool, settings: &Settings) -> Invocation {
    pip.invocation([
        OsString::from("install"),
        OsString::from("-r"),
        settings.manifest_path().into_os_string(),
    ])
}

/// Installs the requirements manifest into the active environment.
///
/// A failure here aborts the run before PyInstaller is invoked.
pub async fn run_install<R: ProcessRunner>(
    runner: &R,
    pip: &Tool,
    settings: &Settings,
) -> Result<()> {
    log::info!(
        "Installing dependencies from {}",
        settings.manifest_path().display()
    );

    let invocation = install_invocation(pip, settings);
    let outcome = runner.run(&invocation, settings.working_dir()).await?;
    check_outcome(Step::Install, outcome)?;

    log::info!("✓ Dependencies installed");
    Ok(())
}
