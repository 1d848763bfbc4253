//! Packaging driver for the TIM Viewer desktop application
//!
//! This library reproduces a fixed packaging step:
//! - installs the packages listed in a requirements manifest (pip)
//! - freezes the entry script into a single windowed executable (PyInstaller)
//! - verifies the artifact and prints a completion notice
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod config;
pub mod error;
pub mod packager;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
