//! Completion notice step.

use std::io::{self, BufRead, IsTerminal, Write};

/// Printed after a verified, successful build.
pub const COMPLETION_MESSAGE: &str = "built!";

const PROMPT: &str = "Press Enter to continue...";

/// Writes the prompt and blocks until a line (or EOF) arrives on `input`.
pub fn acknowledge<R: BufRead, W: Write>(input: &mut R, prompt: &mut W) -> io::Result<()> {
    write!(prompt, "{PROMPT}")?;
    prompt.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

/// Pauses for the user before the process exits.
///
/// Skipped when `enabled` is false or stdin is not a terminal, so scripted
/// runs never hang.
pub fn wait_for_acknowledgement(enabled: bool) {
    let stdin = io::stdin();
    if !enabled || !stdin.is_terminal() {
        log::debug!("Skipping acknowledgement pause");
        return;
    }

    if let Err(e) = acknowledge(&mut stdin.lock(), &mut io::stdout()) {
        log::warn!("Could not read acknowledgement: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acknowledge_consumes_one_line() {
        let mut input = io::Cursor::new(b"\nrest".to_vec());
        let mut out = Vec::new();
        acknowledge(&mut input, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), PROMPT);
        assert_eq!(input.position(), 1);
    }

    #[test]
    fn acknowledge_returns_on_eof() {
        let mut input = io::Cursor::new(Vec::new());
        let mut out = Vec::new();
        assert!(acknowledge(&mut input, &mut out).is_ok());
    }
}
