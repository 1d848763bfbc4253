//! Packaging pipeline: preflight, dependency install, freeze and verification.
//!
//! # Overview
//!
//! The [`Packager`]:
//! 1. Resolves pip and PyInstaller and checks the input artifacts
//! 2. Installs the requirements manifest
//! 3. Freezes the entry script into a single windowed executable
//! 4. Verifies the artifact and calculates its checksum
//!
//! Steps run strictly in order. A failing step aborts everything after it.
//!
//! # Example
//!
//! ```no_run
//! use timview_bundler::packager::{Packager, PackageSettings, SettingsBuilder, TokioRunner};
//! use timview_bundler::cli::OutputManager;
//!
//! # async fn example() -> timview_bundler::packager::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .working_dir(".")
//!     .package_settings(PackageSettings::default())
//!     .build()?;
//!
//! let packager = Packager::new(settings, TokioRunner::new(OutputManager::new(false, false)));
//! let tools = packager.preflight().await?;
//! let artifact = packager.package(&tools).await?;
//! println!("Created {} ({} bytes)", artifact.path.display(), artifact.size);
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod process;
mod settings;
mod steps;
mod utils;

pub use builder::{PackagedArtifact, Packager, ResolvedTools, check_inputs, resolve_tools};
pub use error::{Context, Error, ErrorExt, Result};
pub use process::{Invocation, ProcessRunner, StepOutcome, TokioRunner, Tool};
pub use settings::{
    DEFAULT_DIST_DIR, DEFAULT_ENTRY_SCRIPT, DEFAULT_EXECUTABLE_NAME, DEFAULT_ICON,
    DEFAULT_MANIFEST, DEFAULT_WORK_DIR, PackageSettings, Settings, SettingsBuilder, ToolSettings,
};
pub use steps::{
    COMPLETION_MESSAGE, Step, acknowledge, install_invocation, pyinstaller_invocation,
    wait_for_acknowledgement,
};
