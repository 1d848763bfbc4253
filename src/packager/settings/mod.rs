//! Configuration structures for the packaging steps.
//!
//! [`PackageSettings`] describes what gets frozen, [`ToolSettings`] describes
//! how pip and PyInstaller are invoked, and [`Settings`] ties both to a working
//! directory through [`SettingsBuilder`].

mod builder;
mod core;
mod package;
mod tools;

// Re-export all public types
pub use builder::{DEFAULT_DIST_DIR, DEFAULT_WORK_DIR, SettingsBuilder};
pub use core::Settings;
pub use package::{
    DEFAULT_ENTRY_SCRIPT, DEFAULT_EXECUTABLE_NAME, DEFAULT_ICON, DEFAULT_MANIFEST, PackageSettings,
};
pub use tools::ToolSettings;
