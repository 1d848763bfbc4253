//! Packaging orchestration and coordination.
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`Packager`] struct and step sequencing
//! - [`preflight`] - Input artifact checks
//! - [`tool_detection`] - pip / PyInstaller resolution and probing

mod checksum;
mod orchestrator;
mod preflight;
mod tool_detection;

pub use orchestrator::{PackagedArtifact, Packager};
pub use preflight::check_inputs;
pub use tool_detection::{ResolvedTools, resolve_tools};
