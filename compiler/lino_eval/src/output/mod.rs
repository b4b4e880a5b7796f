//! Output sinks for `out` statements.
//!
//! Output goes through an enum rather than a trait object:
//! - `Stdout`: the terminal (default)
//! - `Buffer`: captured in memory for tests and embedding hosts
//! - `Silent`: discarded

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Writes to the process's standard output.
#[derive(Default)]
pub struct StdoutOutput;

impl StdoutOutput {
    pub fn write(&self, text: &str) -> io::Result<()> {
        io::stdout().lock().write_all(text.as_bytes())
    }

    pub fn flush(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

/// Captures output in memory.
pub struct BufferOutput {
    buffer: Mutex<String>,
}

impl BufferOutput {
    pub fn new() -> Self {
        BufferOutput {
            buffer: Mutex::new(String::new()),
        }
    }

    pub fn write(&self, text: &str) {
        self.buffer.lock().push_str(text);
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferOutput {
    fn default() -> Self {
        Self::new()
    }
}

pub enum OutputHandler {
    Stdout(StdoutOutput),
    Buffer(BufferOutput),
    Silent,
}

impl OutputHandler {
    /// Write without a newline.
    pub fn write(&self, text: &str) -> io::Result<()> {
        match self {
            Self::Stdout(h) => h.write(text),
            Self::Buffer(h) => {
                h.write(text);
                Ok(())
            }
            Self::Silent => Ok(()),
        }
    }

    /// Write followed by a newline.
    pub fn write_line(&self, text: &str) -> io::Result<()> {
        match self {
            Self::Stdout(h) => {
                let mut line = String::with_capacity(text.len() + 1);
                line.push_str(text);
                line.push('\n');
                h.write(&line)
            }
            Self::Buffer(h) => {
                h.write(text);
                h.write("\n");
                Ok(())
            }
            Self::Silent => Ok(()),
        }
    }

    pub fn flush(&self) -> io::Result<()> {
        match self {
            Self::Stdout(h) => h.flush(),
            Self::Buffer(_) | Self::Silent => Ok(()),
        }
    }

    /// Captured output. Empty for handlers that don't capture.
    pub fn contents(&self) -> String {
        match self {
            Self::Buffer(h) => h.contents(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Output handler shared between the engine and its host.
pub type SharedOutput = Arc<OutputHandler>;

pub fn stdout_output() -> SharedOutput {
    Arc::new(OutputHandler::Stdout(StdoutOutput))
}

pub fn buffer_output() -> SharedOutput {
    Arc::new(OutputHandler::Buffer(BufferOutput::new()))
}

pub fn silent_output() -> SharedOutput {
    Arc::new(OutputHandler::Silent)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
