//! How the external tools are invoked.

use std::path::PathBuf;

/// pip and PyInstaller invocation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSettings {
    /// Python interpreter.
    ///
    /// When set, tools run as `python -m pip` and `python -m PyInstaller`.
    /// Otherwise `pip` and `pyinstaller` are looked up on `PATH`.
    ///
    /// Default: None
    pub python: Option<PathBuf>,

    /// Extra arguments appended to the PyInstaller command line before the entry script.
    ///
    /// Default: Empty
    pub pyinstaller_args: Vec<String>,
}
