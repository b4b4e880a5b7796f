//! Command handlers for the `lino` CLI.
//!
//! Handlers return `CliError`; `main` prints it as `Error: <message>` and
//! exits with status 1.

use std::io;

use lino_eval::{LinkError, RuntimeError};
use lino_lexer::LexError;
use thiserror::Error;

mod check;
mod debug;
mod run;

pub use check::check_file;
pub use debug::{lex_file, render_lines};
pub use run::{run_file, run_lines};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}
