//! Colored terminal output for user-facing messages.
//!
//! Diagnostics go through `log`; this is only what the user is meant to read.

use std::io::{IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

#[derive(Debug, Clone, Copy)]
enum Target {
    Stdout,
    Stderr,
}

/// Writes progress, success, warning and error lines.
///
/// Write failures (closed pipe) are ignored: output is best-effort and must
/// never turn a successful build into a failure.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    stdout_color: ColorChoice,
    stderr_color: ColorChoice,
}

impl OutputManager {
    /// Creates an output manager.
    ///
    /// `quiet` hides everything except errors and the final success line.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            stdout_color: choice(std::io::stdout().is_terminal()),
            stderr_color: choice(std::io::stderr().is_terminal()),
        }
    }

    /// Print a message only in verbose mode
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            self.write(Target::Stdout, None, false, "  ", message);
        }
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) {
        if !self.quiet {
            self.write(Target::Stdout, Some(Color::Cyan), true, "==>", message);
        }
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        if !self.quiet {
            self.write(Target::Stdout, Some(Color::Blue), true, "\n##", title);
        }
    }

    /// Print indented text, typically a line of child process output
    pub fn indent(&self, message: &str) {
        if !self.quiet {
            self.write(Target::Stdout, None, false, "   ", message);
        }
    }

    /// Print indented text to stderr
    pub fn indent_err(&self, message: &str) {
        if !self.quiet {
            self.write(Target::Stderr, None, false, "   ", message);
        }
    }

    /// Print a success message. Shown even in quiet mode.
    pub fn success(&self, message: &str) {
        self.write(Target::Stdout, Some(Color::Green), true, "✓", message);
    }

    /// Print a warning
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            self.write(Target::Stderr, Some(Color::Yellow), true, "warning:", message);
        }
    }

    /// Print an error. Always shown.
    pub fn error(&self, message: &str) {
        self.write(Target::Stderr, Some(Color::Red), true, "error:", message);
    }

    fn write(&self, target: Target, color: Option<Color>, bold: bool, prefix: &str, message: &str) {
        let mut stream = match target {
            Target::Stdout => StandardStream::stdout(self.stdout_color),
            Target::Stderr => StandardStream::stderr(self.stderr_color),
        };
        let _ = stream.set_color(ColorSpec::new().set_fg(color).set_bold(bold));
        let _ = write!(stream, "{prefix}");
        let _ = stream.reset();
        let _ = writeln!(stream, " {message}");
    }
}

fn choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
