//! Builder for constructing Settings.

use super::{PackageSettings, Settings, ToolSettings};
use crate::packager::error::Error;
use std::path::{Component, Path, PathBuf};

/// Default PyInstaller `--distpath`, relative to the working directory.
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Default PyInstaller `--workpath`, relative to the working directory.
pub const DEFAULT_WORK_DIR: &str = "build";

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```
/// use timview_bundler::packager::{PackageSettings, SettingsBuilder, ToolSettings};
///
/// # fn example() -> timview_bundler::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .working_dir("/work/timview")
///     .package_settings(PackageSettings::default())
///     .tool_settings(ToolSettings {
///         python: Some("python3".into()),
///         ..Default::default()
///     })
///     .clean(true)
///     .build()?;
/// assert!(settings.clean());
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    working_dir: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
    tool_settings: ToolSettings,
    dist_dir: Option<PathBuf>,
    work_dir: Option<PathBuf>,
    clean: bool,
    skip_install: bool,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the working directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn working_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.working_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets package inputs and freeze options.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets tool invocation settings.
    ///
    /// Default: tools looked up on `PATH`, no extra arguments
    pub fn tool_settings(mut self, settings: ToolSettings) -> Self {
        self.tool_settings = settings;
        self
    }

    /// Sets the dist directory.
    ///
    /// Default: `dist`
    pub fn dist_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dist_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the PyInstaller work directory.
    ///
    /// Default: `build`
    pub fn work_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.work_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Clears the PyInstaller cache before freezing.
    ///
    /// Default: false
    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Skips the dependency installer step.
    ///
    /// Default: false
    pub fn skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing, the executable name
    /// is empty or contains a path separator, or `clean` is set on a work
    /// directory whose removal would take project files with it.
    pub fn build(self) -> crate::packager::Result<Settings> {
        use crate::packager::error::Context;

        let package = self
            .package_settings
            .context("package_settings is required")?;

        let name = package.executable_name.trim();
        if name.is_empty() {
            crate::bail!("executable name cannot be empty");
        }
        if name.contains(['/', '\\']) {
            crate::bail!("executable name cannot contain path separators: {name}");
        }

        let settings = Settings::new(
            package,
            self.tool_settings,
            self.working_dir.context("working_dir is required")?,
            self.dist_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR)),
            self.work_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_WORK_DIR)),
            self.clean,
            self.skip_install,
        );

        if settings.clean() {
            check_removable_work_dir(&settings)?;
        }
        Ok(settings)
    }
}

/// `--clean` deletes the work directory, so it must not hold anything else
/// the run depends on.
fn check_removable_work_dir(settings: &Settings) -> crate::packager::Result<()> {
    let work = normalize(&settings.work_dir());
    let unsafe_dir = |reason: &'static str| Error::UnsafeWorkDir {
        path: settings.work_dir(),
        reason,
    };

    if normalize(settings.working_dir()).starts_with(&work) {
        return Err(unsafe_dir("it is the working directory or one of its parents"));
    }

    let protected = [
        (settings.manifest_path(), "it contains the requirements manifest"),
        (settings.entry_script_path(), "it contains the entry script"),
        (settings.icon_path(), "it contains the icon"),
        (settings.dist_dir(), "it contains the dist directory"),
    ];
    for (path, reason) in protected {
        if normalize(&path).starts_with(&work) {
            return Err(unsafe_dir(reason));
        }
    }
    Ok(())
}

/// Resolves `.` and `..` lexically; the paths need not exist yet.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_working_dir_is_rejected() {
        let err = SettingsBuilder::new()
            .package_settings(PackageSettings::default())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("working_dir"));
    }

    #[test]
    fn defaults_fill_output_dirs() {
        let settings = SettingsBuilder::new()
            .working_dir("/w")
            .package_settings(PackageSettings::default())
            .build()
            .unwrap();
        assert_eq!(settings.dist_dir(), Path::new("/w/dist"));
        assert_eq!(settings.work_dir(), Path::new("/w/build"));
        assert!(!settings.clean());
        assert!(!settings.skip_install());
    }

    #[test]
    fn separator_in_name_is_rejected() {
        let err = SettingsBuilder::new()
            .working_dir("/w")
            .package_settings(PackageSettings {
                executable_name: "../evil".into(),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("path separators"));
    }

    fn clean_with_work_dir(work_dir: &str) -> crate::packager::Result<Settings> {
        SettingsBuilder::new()
            .working_dir("/w/project")
            .package_settings(PackageSettings::default())
            .work_dir(work_dir)
            .clean(true)
            .build()
    }

    #[cfg(unix)]
    #[test]
    fn clean_refuses_work_dir_holding_the_project() {
        for work_dir in [".", "..", "./", "/w", "sub/.."] {
            let err = clean_with_work_dir(work_dir).unwrap_err();
            assert!(
                matches!(err, Error::UnsafeWorkDir { .. }),
                "{work_dir} accepted"
            );
            assert_eq!(err.exit_code(), crate::error::EXIT_INVALID_INPUT);
        }
    }

    #[cfg(unix)]
    #[test]
    fn clean_refuses_work_dir_holding_inputs_or_output() {
        let err = SettingsBuilder::new()
            .working_dir("/w/project")
            .package_settings(PackageSettings {
                entry_script: "src/app.py".into(),
                ..Default::default()
            })
            .work_dir("src")
            .clean(true)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("entry script"));

        let err = SettingsBuilder::new()
            .working_dir("/w/project")
            .package_settings(PackageSettings::default())
            .dist_dir("out/dist")
            .work_dir("out")
            .clean(true)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("dist directory"));
    }

    #[cfg(unix)]
    #[test]
    fn clean_accepts_separate_work_dir() {
        assert!(clean_with_work_dir("build").is_ok());
        assert!(clean_with_work_dir("/tmp/timview-work").is_ok());
        // Without --clean nothing is deleted, so the guard does not apply
        assert!(
            SettingsBuilder::new()
                .working_dir("/w/project")
                .package_settings(PackageSettings::default())
                .work_dir(".")
                .build()
                .is_ok()
        );
    }
}
