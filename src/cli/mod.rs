//! Command line interface for the packaging driver.
//!
//! Parses arguments, loads the optional config file, runs the packager and
//! finishes with the completion notice.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::config;
use crate::error::Result;
use crate::packager::{COMPLETION_MESSAGE, Packager, TokioRunner, wait_for_acknowledgement};

/// Main CLI entry point
///
/// Returns the process exit code. Failures inside the run are reported here
/// with their recovery suggestions; only setup failures escape as `Err`.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let output = OutputManager::new(args.verbose, args.quiet);

    let exit_code = match execute(&args, &output).await {
        Ok(()) => 0,
        Err(e) => {
            output.error(&e.to_string());
            for suggestion in e.recovery_suggestions() {
                output.indent(&suggestion);
            }
            e.exit_code()
        }
    };

    if !args.dry_run {
        wait_for_acknowledgement(!args.no_pause);
    }

    Ok(exit_code)
}

async fn execute(args: &Args, output: &OutputManager) -> Result<()> {
    args.validate()?;

    let working_dir = std::env::current_dir()?;
    let config = config::discover(&working_dir, args.config.as_deref())?;
    let settings = args.to_settings(&working_dir, config)?;

    output.verbose(&format!("Working directory: {}", working_dir.display()));

    let packager = Packager::new(settings, TokioRunner::new(output.clone()));

    output.section("Preflight");
    let tools = packager.preflight().await?;
    output.progress("Tools and inputs look good");
    if tools.pyinstaller.is_none() {
        output.warn(
            "pyinstaller is not on PATH yet; expecting the dependency install to provide it",
        );
    }

    if args.dry_run {
        output.section("Planned commands");
        for (step, invocation) in packager.plan(&tools) {
            output.indent(&format!("{step}: {invocation}"));
        }
        return Ok(());
    }

    output.section(&format!(
        "Packaging {}",
        packager.settings().executable_name()
    ));
    let artifact = packager.package(&tools).await?;

    output.success(COMPLETION_MESSAGE);
    output.indent(&format!("Artifact: {}", artifact.path.display()));
    output.indent(&format!("Size:     {} bytes", artifact.size));
    output.indent(&format!("SHA256:   {}", artifact.checksum));

    Ok(())
}
