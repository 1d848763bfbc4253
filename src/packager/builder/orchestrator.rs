//! Main packaging orchestration.
//!
//! This module provides the [`Packager`] that runs preflight, the dependency
//! installer, PyInstaller and artifact verification in order.

use super::{
    checksum::{artifact_size, calculate_sha256},
    preflight::check_inputs,
    tool_detection::{ResolvedTools, find_pyinstaller, probe_version, resolve_tools},
};
use crate::packager::{
    error::{Error, Result},
    process::{Invocation, ProcessRunner},
    settings::Settings,
    steps::{Step, install_invocation, pyinstaller_invocation, run_freeze, run_install},
};
use std::path::PathBuf;

/// A verified packaging result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArtifact {
    /// Path to the executable (or one-dir folder)
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256
    pub checksum: String,
}

/// Packaging orchestrator.
///
/// Generic over the [`ProcessRunner`] so the step sequencing can be exercised
/// without pip or PyInstaller installed.
///
/// # Examples
///
/// ```no_run
/// use timview_bundler::packager::{Packager, Settings, TokioRunner};
/// use timview_bundler::cli::OutputManager;
///
/// # async fn example(settings: Settings) -> timview_bundler::packager::Result<()> {
/// let packager = Packager::new(settings, TokioRunner::new(OutputManager::new(false, false)));
/// let tools = packager.preflight().await?;
/// for (step, invocation) in packager.plan(&tools) {
///     println!("{step}: {invocation}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packager<R> {
    settings: Settings,
    runner: R,
}

impl<R: ProcessRunner> Packager<R> {
    /// Creates a packager with the given settings and runner.
    pub fn new(settings: Settings, runner: R) -> Self {
        Self { settings, runner }
    }

    /// Returns a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolves the tools and checks the inputs.
    ///
    /// Every problem found is reported in a single [`Error::Preflight`].
    pub async fn preflight(&self) -> Result<ResolvedTools> {
        let (tools, mut problems) = match resolve_tools(&self.settings) {
            Ok(tools) => (Some(tools), Vec::new()),
            Err(errors) => (None, errors),
        };
        problems.extend(check_inputs(&self.settings));

        match tools {
            Some(tools) if problems.is_empty() => {
                if let Some(pip) = &tools.pip {
                    probe_version(pip).await;
                }
                if let Some(pyinstaller) = &tools.pyinstaller {
                    probe_version(pyinstaller).await;
                }
                Ok(tools)
            }
            _ => Err(Error::Preflight(problems)),
        }
    }

    /// The invocations [`Packager::package`] would run, in order.
    pub fn plan(&self, tools: &ResolvedTools) -> Vec<(Step, Invocation)> {
        let mut plan = Vec::with_capacity(2);
        if let Some(pip) = &tools.pip {
            plan.push((Step::Install, install_invocation(pip, &self.settings)));
        }
        plan.push((
            Step::Package,
            pyinstaller_invocation(&tools.pyinstaller_or_default(), &self.settings),
        ));
        plan
    }

    /// Installs dependencies, freezes the entry script and verifies the artifact.
    ///
    /// Stops at the first failing step, so a failed install never reaches PyInstaller.
    /// A PyInstaller that preflight could not find is looked up again once the
    /// install has run.
    pub async fn package(&self, tools: &ResolvedTools) -> Result<PackagedArtifact> {
        if let Some(pip) = &tools.pip {
            run_install(&self.runner, pip, &self.settings).await?;
        } else {
            log::info!("Skipping dependency install");
        }

        let pyinstaller = match &tools.pyinstaller {
            Some(tool) => tool.clone(),
            None => {
                let tool = find_pyinstaller()?;
                probe_version(&tool).await;
                tool
            }
        };
        run_freeze(&self.runner, &pyinstaller, &self.settings).await?;

        self.verify_artifact().await
    }

    async fn verify_artifact(&self) -> Result<PackagedArtifact> {
        let executable = self.settings.artifact_path();
        if !executable.is_file() {
            return Err(Error::ArtifactMissing { path: executable });
        }

        // One-dir builds are reported as the whole folder
        let artifact = if self.settings.package().onefile {
            executable
        } else {
            self.settings
                .dist_dir()
                .join(self.settings.executable_name())
        };

        let size = artifact_size(&artifact).await?;
        let checksum = calculate_sha256(&artifact).await?;

        log::info!("✓ Created {} ({size} bytes)", artifact.display());

        Ok(PackagedArtifact {
            path: artifact,
            size,
            checksum,
        })
    }
}
