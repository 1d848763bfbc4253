//! External process invocation and output streaming.

use super::error::{Error, Result};
use crate::cli::OutputManager;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// A resolved external tool: a program plus the arguments that select it.
///
/// `pyinstaller` on `PATH` has no prefix, `python -m PyInstaller` has `["-m", "PyInstaller"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    /// Executable to spawn
    pub program: PathBuf,
    /// Arguments placed before call-specific arguments
    pub prefix: Vec<OsString>,
}

impl Tool {
    /// Tool run directly from `program`.
    pub fn direct(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            prefix: Vec::new(),
        }
    }

    /// Tool run as `interpreter -m module`.
    pub fn module(interpreter: impl Into<PathBuf>, module: &str) -> Self {
        Self {
            program: interpreter.into(),
            prefix: vec![OsString::from("-m"), OsString::from(module)],
        }
    }

    /// Builds an invocation of this tool with `args`.
    pub fn invocation<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut all = self.prefix.clone();
        all.extend(args.into_iter().map(Into::into));
        Invocation {
            program: self.program.clone(),
            args: all,
        }
    }
}

/// A fully specified command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable to spawn
    pub program: PathBuf,
    /// Arguments in order
    pub args: Vec<OsString>,
}

impl Invocation {
    /// Arguments as lossily converted strings.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(self.program.as_os_str()))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(arg: &OsStr) -> String {
    let s = arg.to_string_lossy();
    if s.is_empty() || s.contains(char::is_whitespace) {
        format!("\"{s}\"")
    } else {
        s.into_owned()
    }
}

/// Result of running one external command.
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    /// Whether the process exited successfully
    pub success: bool,
    /// Exit code, None when killed by a signal
    pub code: Option<i32>,
    /// Captured stderr lines
    pub stderr_lines: Vec<String>,
}

/// Runs invocations to completion.
///
/// The packager is generic over this so tests can substitute a recording runner.
pub trait ProcessRunner {
    /// Runs `invocation` in `working_dir` and waits for it to exit.
    ///
    /// A non-zero exit is reported through [`StepOutcome`], not as an error.
    /// Errors are reserved for failures to spawn or wait.
    fn run(
        &self,
        invocation: &Invocation,
        working_dir: &Path,
    ) -> impl Future<Output = Result<StepOutcome>>;
}

/// Runs commands with tokio, echoing their output through an [`OutputManager`].
#[derive(Debug, Clone)]
pub struct TokioRunner {
    output: OutputManager,
}

impl TokioRunner {
    /// Creates a runner that echoes child output through `output`.
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }
}

impl ProcessRunner for TokioRunner {
    async fn run(&self, invocation: &Invocation, working_dir: &Path) -> Result<StepOutcome> {
        log::debug!("Spawning: {invocation}");

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(working_dir)
            // pip must never wait on a prompt
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|error| Error::CommandFailed {
                command: invocation.to_string(),
                error,
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Drain both pipes concurrently so neither can fill up and block the child
        let (_, stderr_lines) = tokio::join!(
            async {
                if let Some(stdout) = stdout {
                    drain_lines(stdout, |line| self.output.indent(&line)).await;
                }
            },
            async {
                let mut captured = Vec::new();
                if let Some(stderr) = stderr {
                    drain_lines(stderr, |line| {
                        self.output.indent_err(&line);
                        captured.push(line);
                    })
                    .await;
                }
                captured
            }
        );

        let status = child.wait().await.map_err(|error| Error::CommandFailed {
            command: invocation.to_string(),
            error,
        })?;

        log::debug!("{} exited with {status}", invocation.program.display());

        Ok(StepOutcome {
            success: status.success(),
            code: status.code(),
            stderr_lines,
        })
    }
}

/// Reads `reader` to EOF, handing each line to `on_line`.
///
/// Lines are decoded lossily and only EOF or a read error ends the loop, so
/// the child never writes into a closed pipe.
async fn drain_lines<R: AsyncRead + Unpin>(reader: R, mut on_line: impl FnMut(String)) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                while buf.last().is_some_and(|b| *b == b'\n' || *b == b'\r') {
                    buf.pop();
                }
                on_line(String::from_utf8_lossy(&buf).into_owned());
            }
            Err(e) => {
                log::debug!("Stopped reading child output: {e}");
                break;
            }
        }
    }
}
