//! Optional TOML config file.
//!
//! ```toml
//! [package]
//! name = "TIMViewer"
//! entry = "timview-v2.py"
//! icon = "icon.ico"
//! manifest = "requirements.txt"
//! onefile = true
//! windowed = true
//!
//! [tools]
//! python = "python3"
//! pyinstaller_args = ["--hidden-import=numpy"]
//! skip_install = false
//!
//! [output]
//! dist_dir = "dist"
//! work_dir = "build"
//! clean = false
//! ```
//!
//! Every key is optional; CLI flags override file values, which override defaults.

use crate::error::{BundlerError, CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "timview-bundle.toml";

/// Parsed config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleConfig {
    /// `[package]` table
    #[serde(default)]
    pub package: PackageSection,

    /// `[tools]` table
    #[serde(default)]
    pub tools: ToolsSection,

    /// `[output]` table
    #[serde(default)]
    pub output: OutputSection,
}

/// Package inputs.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    pub name: Option<String>,
    pub entry: Option<PathBuf>,
    pub icon: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub onefile: Option<bool>,
    pub windowed: Option<bool>,
}

/// Tool invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsSection {
    pub python: Option<PathBuf>,
    #[serde(default)]
    pub pyinstaller_args: Vec<String>,
    pub skip_install: Option<bool>,
}

/// Output locations.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub dist_dir: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub clean: Option<bool>,
}

/// Reads and parses a config file.
pub fn load_config(path: &Path) -> Result<BundleConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        BundlerError::Cli(CliError::ConfigUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    })?;

    let config: BundleConfig = toml::from_str(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Finds the config to use.
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
/// `working_dir` is used if present. No config at all is not an error.
pub fn discover(working_dir: &Path, explicit: Option<&Path>) -> Result<Option<BundleConfig>> {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            working_dir.join(path)
        };
        return load_config(&path).map(Some);
    }

    let default = working_dir.join(DEFAULT_CONFIG_FILE);
    if default.is_file() {
        load_config(&default).map(Some)
    } else {
        log::debug!("No {DEFAULT_CONFIG_FILE} in {}", working_dir.display());
        Ok(None)
    }
}
