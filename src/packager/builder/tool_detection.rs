//! External tool detection and availability checking.
//!
//! Resolves pip and PyInstaller either on `PATH` or through an explicit
//! Python interpreter, and probes each with `--version`.

use crate::packager::{
    error::{Error, Result},
    process::Tool,
    settings::Settings,
};
use std::process::Stdio;
use tokio::process::Command;

/// PyInstaller's executable name on `PATH`.
pub const PYINSTALLER_PROGRAM: &str = "pyinstaller";

/// Tools a packaging run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTools {
    /// pip, absent when the install step is skipped
    pub pip: Option<Tool>,
    /// PyInstaller, absent when it is not on `PATH` yet and the install
    /// step may still provide it
    pub pyinstaller: Option<Tool>,
}

impl ResolvedTools {
    /// PyInstaller as it will be invoked, for display before it is resolved.
    pub fn pyinstaller_or_default(&self) -> Tool {
        self.pyinstaller
            .clone()
            .unwrap_or_else(|| Tool::direct(PYINSTALLER_PROGRAM))
    }
}

/// Resolves every tool the run needs.
///
/// All lookup failures are returned together so preflight can report them at once.
/// A PyInstaller missing from `PATH` is only a failure when the install step
/// is skipped; otherwise [`find_pyinstaller`] runs again after the install.
pub fn resolve_tools(settings: &Settings) -> std::result::Result<ResolvedTools, Vec<Error>> {
    let need_pip = !settings.skip_install();

    if let Some(python) = &settings.tools().python {
        let path = which::which(python).map_err(|e| {
            vec![Error::ToolNotFound {
                tool: python.display().to_string(),
                hint: format!("Python interpreter could not be resolved ({e})"),
            }]
        })?;
        log::debug!("Using Python interpreter at: {}", path.display());

        return Ok(ResolvedTools {
            pip: need_pip.then(|| Tool::module(path.clone(), "pip")),
            pyinstaller: Some(Tool::module(path, "PyInstaller")),
        });
    }

    let mut errors = Vec::new();

    let pip = if need_pip {
        find_on_path(&["pip", "pip3"], "install it with your Python distribution")
            .map_err(|e| errors.push(e))
            .ok()
    } else {
        None
    };
    let pyinstaller = match find_pyinstaller() {
        Ok(tool) => Some(tool),
        Err(e) if need_pip => {
            log::debug!("{e}; looking again after the dependency install");
            None
        }
        Err(e) => {
            errors.push(e);
            None
        }
    };

    if errors.is_empty() {
        Ok(ResolvedTools { pip, pyinstaller })
    } else {
        Err(errors)
    }
}

/// Looks up PyInstaller on `PATH`.
pub fn find_pyinstaller() -> Result<Tool> {
    find_on_path(
        &[PYINSTALLER_PROGRAM],
        "add `pyinstaller` to the requirements manifest or install it with `pip install pyinstaller`",
    )
}

fn find_on_path(candidates: &[&str], hint: &str) -> Result<Tool> {
    for name in candidates {
        match which::which(name) {
            Ok(path) => {
                log::debug!("Found {name} at: {}", path.display());
                return Ok(Tool::direct(path));
            }
            Err(e) => log::debug!("{name} not found in PATH: {e}"),
        }
    }

    Err(Error::ToolNotFound {
        tool: candidates[0].to_string(),
        hint: format!("not in PATH; {hint}"),
    })
}

/// Runs `tool --version` and returns its trimmed output.
///
/// A failing probe only warns; the step itself reports the real failure.
pub async fn probe_version(tool: &Tool) -> Option<String> {
    let rendered = tool.invocation(["--version"]);
    let output = Command::new(&rendered.program)
        .args(&rendered.args)
        .stdin(Stdio::null())
        .output()
        .await;

    match output {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            log::info!("✓ {rendered}: {version}");
            Some(version)
        }
        Ok(output) => {
            log::warn!(
                "`{rendered}` failed (exit code: {:?}). Stderr: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            None
        }
        Err(e) => {
            log::warn!("`{rendered}` could not be executed: {e}. Check file permissions.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::settings::{PackageSettings, SettingsBuilder, ToolSettings};

    fn settings_with_python(python: &str, skip_install: bool) -> Settings {
        SettingsBuilder::new()
            .working_dir(".")
            .package_settings(PackageSettings::default())
            .tool_settings(ToolSettings {
                python: Some(python.into()),
                ..Default::default()
            })
            .skip_install(skip_install)
            .build()
            .unwrap()
    }

    #[test]
    fn missing_interpreter_is_reported_once() {
        let settings = settings_with_python("/nonexistent/python-9f2c", false);
        let errors = resolve_tools(&settings).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], Error::ToolNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn interpreter_runs_tools_as_modules() {
        let settings = settings_with_python("/bin/sh", false);
        let tools = resolve_tools(&settings).unwrap();
        let pip = tools.pip.unwrap();
        assert_eq!(pip.prefix, ["-m", "pip"]);
        assert_eq!(tools.pyinstaller.unwrap().prefix, ["-m", "PyInstaller"]);
    }

    #[cfg(unix)]
    #[test]
    fn skipping_install_drops_pip() {
        let settings = settings_with_python("/bin/sh", true);
        let tools = resolve_tools(&settings).unwrap();
        assert!(tools.pip.is_none());
    }

    #[test]
    fn unresolved_pyinstaller_displays_as_path_lookup() {
        let tools = ResolvedTools {
            pip: Some(Tool::direct("pip")),
            pyinstaller: None,
        };
        assert_eq!(tools.pyinstaller_or_default(), Tool::direct("pyinstaller"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn version_check_returns_trimmed_stdout() {
        let tool = Tool {
            program: "/bin/sh".into(),
            prefix: vec!["-c".into(), "echo '  6.5.0  '".into()],
        };
        // `--version` lands in $0 of the script and is ignored
        assert_eq!(probe_version(&tool).await.as_deref(), Some("6.5.0"));
    }

    #[tokio::test]
    async fn version_of_missing_program_is_none() {
        let tool = Tool::direct("definitely-not-a-real-tool-7f3a");
        assert!(probe_version(&tool).await.is_none());
    }
}
