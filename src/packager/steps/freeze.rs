//! Packager invocation step.
//!
//! Freezes the entry script with PyInstaller into a single windowed executable.

use super::{Step, check_outcome};
use crate::packager::{
    error::Result,
    process::{Invocation, ProcessRunner, Tool},
    settings::Settings,
    utils::fs,
};
use std::ffi::OsString;

/// Builds the PyInstaller command line.
///
/// `--noconfirm` lets a rerun overwrite the previous artifact. The entry
/// script is always the final argument.
pub fn pyinstaller_invocation(pyinstaller: &Tool, settings: &Settings) -> Invocation {
    let package = settings.package();
    let mut args: Vec<OsString> = Vec::new();

    if package.onefile {
        args.push("--onefile".into());
    }
    if package.windowed {
        args.push("--noconsole".into());
    }

    let mut icon = OsString::from("--icon=");
    icon.push(settings.icon_path());
    args.push(icon);
    args.push(format!("--name={}", package.executable_name).into());
    args.push("--noconfirm".into());
    args.push("--distpath".into());
    args.push(settings.dist_dir().into_os_string());
    args.push("--workpath".into());
    args.push(settings.work_dir().into_os_string());

    if settings.clean() {
        args.push("--clean".into());
    }

    args.extend(settings.tools().pyinstaller_args.iter().map(OsString::from));
    args.push(settings.entry_script_path().into_os_string());

    pyinstaller.invocation(args)
}

/// Runs PyInstaller and waits for it to finish.
pub async fn run_freeze<R: ProcessRunner>(
    runner: &R,
    pyinstaller: &Tool,
    settings: &Settings,
) -> Result<()> {
    log::info!(
        "Freezing {} as {}",
        settings.entry_script_path().display(),
        settings.executable_name()
    );

    if settings.clean() {
        log::debug!("Removing work directory {}", settings.work_dir().display());
        fs::remove_dir_all(&settings.work_dir()).await?;
    }
    fs::create_dir_all(&settings.dist_dir()).await?;

    let invocation = pyinstaller_invocation(pyinstaller, settings);
    let outcome = runner.run(&invocation, settings.working_dir()).await?;
    check_outcome(Step::Package, outcome)
}
