//! Input sources for `in` statements.
//!
//! Both sources hand out whitespace-delimited tokens. Words left over on a
//! line are kept for the next read.

use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Reads tokens from the process's standard input.
#[derive(Default)]
pub struct StdinInput {
    pending: VecDeque<String>,
}

impl StdinInput {
    pub fn read_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if io::stdin().lock().read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}

/// Pre-recorded input, for tests and embedding hosts.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    tokens: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new(text: &str) -> Self {
        ScriptedInput {
            tokens: text.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn read_token(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }
}

pub enum InputHandler {
    Stdin(StdinInput),
    Scripted(ScriptedInput),
}

impl InputHandler {
    pub fn stdin() -> Self {
        InputHandler::Stdin(StdinInput::default())
    }

    pub fn scripted(text: &str) -> Self {
        InputHandler::Scripted(ScriptedInput::new(text))
    }

    /// Next token, or `None` once the source is exhausted.
    pub fn read_token(&mut self) -> io::Result<Option<String>> {
        match self {
            Self::Stdin(h) => h.read_token(),
            Self::Scripted(h) => Ok(h.read_token()),
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::stdin()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
mod tests;
