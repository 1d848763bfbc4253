//! Package inputs and freeze options.

use std::path::PathBuf;

/// Default output executable name.
pub const DEFAULT_EXECUTABLE_NAME: &str = "TIMViewer";

/// Default entry-point script.
pub const DEFAULT_ENTRY_SCRIPT: &str = "timview-v2.py";

/// Default icon resource.
pub const DEFAULT_ICON: &str = "icon.ico";

/// Default requirements manifest.
pub const DEFAULT_MANIFEST: &str = "requirements.txt";

/// What gets frozen and how the result looks.
///
/// Relative paths are resolved against [`Settings::working_dir`](super::Settings::working_dir).
///
/// # Examples
///
/// ```
/// use timview_bundler::packager::PackageSettings;
///
/// let settings = PackageSettings {
///     executable_name: "TIMViewerDebug".into(),
///     windowed: false,
///     ..Default::default()
/// };
/// assert!(settings.onefile);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSettings {
    /// Output executable name (without platform suffix).
    pub executable_name: String,

    /// Entry-point script handed to PyInstaller.
    pub entry_script: PathBuf,

    /// Icon embedded into the executable.
    pub icon: PathBuf,

    /// Requirements manifest installed before freezing.
    pub manifest: PathBuf,

    /// Produce a single file instead of a directory.
    ///
    /// Default: true
    pub onefile: bool,

    /// Suppress the console window.
    ///
    /// Default: true
    pub windowed: bool,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            executable_name: DEFAULT_EXECUTABLE_NAME.to_string(),
            entry_script: PathBuf::from(DEFAULT_ENTRY_SCRIPT),
            icon: PathBuf::from(DEFAULT_ICON),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            onefile: true,
            windowed: true,
        }
    }
}
