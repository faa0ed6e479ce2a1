//! Terminal confirmation prompt.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use firmkit_core::application::ports::{Confirm, ConfirmPrompt};

/// Asks on the terminal before files are written.
///
/// The files are listed on stderr, then one answer is read. With the
/// `interactive` feature and a TTY the answer is read through `dialoguer`;
/// otherwise a plain line is read from stdin so answers can be piped in.
/// Failing to read counts as declining.
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl TerminalConfirm {
    pub fn new() -> Self {
        Self
    }

    fn read_answer(&self, question: &str) -> io::Result<String> {
        #[cfg(feature = "interactive")]
        {
            use std::io::IsTerminal;
            if io::stdin().is_terminal() && io::stderr().is_terminal() {
                return dialoguer::Input::<String>::new()
                    .with_prompt(question)
                    .allow_empty(true)
                    .interact_text()
                    .map_err(io::Error::other);
            }
        }

        let mut stderr = io::stderr();
        write!(stderr, "{question} ")?;
        stderr.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer)
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        let mut stderr = io::stderr();
        for file in &prompt.files {
            let _ = writeln!(stderr, "  {file}");
        }

        let question = format!("{} {}", prompt.message, prompt.kind.hint());
        match self.read_answer(&question) {
            Ok(answer) => {
                let accepted = prompt.kind.accepts(&answer);
                debug!(kind = ?prompt.kind, accepted, "Confirmation answered");
                accepted
            }
            Err(e) => {
                warn!("Could not read confirmation: {e}");
                false
            }
        }
    }
}
