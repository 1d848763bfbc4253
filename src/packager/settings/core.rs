//! Core Settings struct and implementations.

use super::{PackageSettings, ToolSettings};
use std::path::{Path, PathBuf};

/// Main settings for a packaging run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). All path
/// accessors return paths already resolved against the working directory.
///
/// # Examples
///
/// ```
/// use timview_bundler::packager::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> timview_bundler::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .working_dir("/work/timview")
///     .package_settings(PackageSettings::default())
///     .build()?;
/// assert_eq!(
///     settings.manifest_path(),
///     std::path::Path::new("/work/timview/requirements.txt")
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package inputs and freeze options.
    package: PackageSettings,

    /// Tool invocation settings.
    tools: ToolSettings,

    /// Directory the tools run in and relative paths resolve against.
    working_dir: PathBuf,

    /// PyInstaller `--distpath`.
    dist_dir: PathBuf,

    /// PyInstaller `--workpath`.
    work_dir: PathBuf,

    /// Pass `--clean` to PyInstaller.
    clean: bool,

    /// Skip the dependency installer step.
    skip_install: bool,
}

impl Settings {
    /// Returns the package settings.
    pub fn package(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the tool settings.
    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    /// Returns the output executable name.
    pub fn executable_name(&self) -> &str {
        &self.package.executable_name
    }

    /// Returns the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Returns the resolved dist directory.
    pub fn dist_dir(&self) -> PathBuf {
        self.resolve(&self.dist_dir)
    }

    /// Returns the resolved PyInstaller work directory.
    pub fn work_dir(&self) -> PathBuf {
        self.resolve(&self.work_dir)
    }

    /// Returns the resolved requirements manifest path.
    pub fn manifest_path(&self) -> PathBuf {
        self.resolve(&self.package.manifest)
    }

    /// Returns the resolved icon path.
    pub fn icon_path(&self) -> PathBuf {
        self.resolve(&self.package.icon)
    }

    /// Returns the resolved entry script path.
    pub fn entry_script_path(&self) -> PathBuf {
        self.resolve(&self.package.entry_script)
    }

    /// Whether PyInstaller should clear its cache first.
    pub fn clean(&self) -> bool {
        self.clean
    }

    /// Whether the dependency installer step is skipped.
    pub fn skip_install(&self) -> bool {
        self.skip_install
    }

    /// Returns the path PyInstaller is expected to produce.
    ///
    /// One-file builds produce `<dist>/<name>`, one-dir builds produce
    /// `<dist>/<name>/<name>`. The `.exe` suffix is appended on Windows.
    pub fn artifact_path(&self) -> PathBuf {
        let file_name = format!(
            "{}{}",
            self.package.executable_name,
            std::env::consts::EXE_SUFFIX
        );
        let dist = self.dist_dir();
        if self.package.onefile {
            dist.join(file_name)
        } else {
            dist.join(&self.package.executable_name).join(file_name)
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        tools: ToolSettings,
        working_dir: PathBuf,
        dist_dir: PathBuf,
        work_dir: PathBuf,
        clean: bool,
        skip_install: bool,
    ) -> Self {
        Self {
            package,
            tools,
            working_dir,
            dist_dir,
            work_dir,
            clean,
            skip_install,
        }
    }
}
