//! Terminal implementation of the confirmation prompt.

use std::io::{self, BufRead, Write};

use dialoguer::Input;

use crate::core::confirm::Prompt;

/// Asks on the terminal, or reads one line from piped stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&self, message: &str) -> io::Result<String> {
        if atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stderr) {
            return Input::<String>::new()
                .with_prompt(message)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()));
        }

        eprint!("{} ", message);
        io::stderr().flush()?;

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed before an answer was given",
            ));
        }
        Ok(answer)
    }
}
