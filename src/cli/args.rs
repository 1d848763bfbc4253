//! Command line argument parsing and settings resolution.

use crate::config::BundleConfig;
use crate::error::{CliError, Result};
use crate::packager::{PackageSettings, Settings, SettingsBuilder, ToolSettings};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Packages the TIM Viewer application into a standalone executable
#[derive(Parser, Debug, Default)]
#[command(
    name = "timview-bundle",
    version,
    about = "Packages the TIM Viewer application into a standalone executable",
    long_about = "Installs requirements with pip, then freezes the entry script with PyInstaller
into a single windowed executable carrying the configured icon.

Run without arguments to package timview-v2.py as TIMViewer using requirements.txt and icon.ico.

Usage:
  timview-bundle
  timview-bundle --python python3 --clean
  timview-bundle --entry viewer.py --name Viewer --icon assets/viewer.ico --no-pause

Exit code 0 = artifact guaranteed to exist in the dist directory."
)]
pub struct Args {
    /// Config file (default: timview-bundle.toml in the current directory, if present)
    #[arg(short, long, value_name = "FILE", env = "TIMVIEW_BUNDLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Requirements manifest installed before packaging
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Icon (.ico) embedded into the executable
    #[arg(short, long, value_name = "FILE")]
    pub icon: Option<PathBuf>,

    /// Entry-point script to freeze
    #[arg(short, long, value_name = "FILE")]
    pub entry: Option<PathBuf>,

    /// Output executable name
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Run pip and PyInstaller as `<python> -m ...` instead of looking them up on PATH
    #[arg(long, value_name = "INTERPRETER")]
    pub python: Option<PathBuf>,

    /// PyInstaller --distpath
    #[arg(long, value_name = "DIR")]
    pub dist_dir: Option<PathBuf>,

    /// PyInstaller --workpath
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Remove the work directory and PyInstaller cache before freezing
    #[arg(long)]
    pub clean: bool,

    /// Skip the dependency install step
    #[arg(long)]
    pub skip_install: bool,

    /// Keep the console window attached to the executable
    #[arg(long)]
    pub console: bool,

    /// Produce a one-folder build instead of a single file
    #[arg(long)]
    pub onedir: bool,

    /// Do not wait for Enter before exiting
    #[arg(long)]
    pub no_pause: bool,

    /// Print the commands that would run and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Extra argument passed to PyInstaller (repeatable)
    #[arg(long = "pyinstaller-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub pyinstaller_args: Vec<String>,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only show errors and the final result
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(CliError::ConflictingArguments {
                arguments: vec!["--verbose".to_string(), "--quiet".to_string()],
            }
            .into());
        }

        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(CliError::InvalidArguments {
                reason: "--name cannot be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Merges flags over the config file over built-in defaults.
    pub fn to_settings(&self, working_dir: &Path, config: Option<BundleConfig>) -> Result<Settings> {
        let config = config.unwrap_or_default();
        let defaults = PackageSettings::default();

        let package = PackageSettings {
            executable_name: self
                .name
                .clone()
                .or(config.package.name)
                .unwrap_or(defaults.executable_name),
            entry_script: self
                .entry
                .clone()
                .or(config.package.entry)
                .unwrap_or(defaults.entry_script),
            icon: self
                .icon
                .clone()
                .or(config.package.icon)
                .unwrap_or(defaults.icon),
            manifest: self
                .manifest
                .clone()
                .or(config.package.manifest)
                .unwrap_or(defaults.manifest),
            onefile: !self.onedir && config.package.onefile.unwrap_or(defaults.onefile),
            windowed: !self.console && config.package.windowed.unwrap_or(defaults.windowed),
        };

        let mut pyinstaller_args = config.tools.pyinstaller_args;
        pyinstaller_args.extend(self.pyinstaller_args.iter().cloned());

        let tools = ToolSettings {
            python: self.python.clone().or(config.tools.python),
            pyinstaller_args,
        };

        let mut builder = SettingsBuilder::new()
            .working_dir(working_dir)
            .package_settings(package)
            .tool_settings(tools)
            .clean(self.clean || config.output.clean.unwrap_or(false))
            .skip_install(self.skip_install || config.tools.skip_install.unwrap_or(false));

        if let Some(dist) = self.dist_dir.clone().or(config.output.dist_dir) {
            builder = builder.dist_dir(dist);
        }
        if let Some(work) = self.work_dir.clone().or(config.output.work_dir) {
            builder = builder.work_dir(work);
        }

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputSection, PackageSection, ToolsSection};

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("timview-bundle").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn no_arguments_reproduce_fixed_defaults() {
        let settings = parse(&[]).to_settings(Path::new("/w"), None).unwrap();
        assert_eq!(settings.package(), &PackageSettings::default());
        assert!(!settings.clean());
        assert!(!settings.skip_install());
        assert_eq!(settings.tools(), &ToolSettings::default());
    }

    #[test]
    fn flags_override_file_which_overrides_defaults() {
        let config = BundleConfig {
            package: PackageSection {
                name: Some("FromFile".into()),
                icon: Some("file.ico".into()),
                windowed: Some(false),
                ..Default::default()
            },
            tools: ToolsSection {
                pyinstaller_args: vec!["--log-level=WARN".into()],
                ..Default::default()
            },
            output: OutputSection {
                dist_dir: Some("out".into()),
                ..Default::default()
            },
        };
        let args = parse(&["--name", "FromFlag", "--pyinstaller-arg", "--strip"]);
        let settings = args.to_settings(Path::new("/w"), Some(config)).unwrap();

        assert_eq!(settings.executable_name(), "FromFlag");
        assert_eq!(settings.package().icon, PathBuf::from("file.ico"));
        assert_eq!(settings.package().entry_script, PathBuf::from("timview-v2.py"));
        assert!(!settings.package().windowed);
        assert_eq!(settings.dist_dir(), Path::new("/w").join("out"));
        assert_eq!(
            settings.tools().pyinstaller_args,
            ["--log-level=WARN", "--strip"]
        );
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(parse(&["-v", "-q"]).validate().is_err());
        assert!(parse(&["-v"]).validate().is_ok());
    }

    #[test]
    fn blank_name_is_invalid() {
        assert!(parse(&["--name", "  "]).validate().is_err());
    }
}
