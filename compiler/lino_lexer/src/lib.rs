//! Lino Lexer - splits source text into statement lines.
//!
//! A Lino program is line oriented: every non-blank, non-comment line is
//! one statement, and every whitespace-delimited word is one token. The
//! lexer does no classification; deciding whether a word is a number, a
//! string piece, an operator or a name is the linker's job.
//!
//! Files may pull in other files with `include <path>`. The path is
//! resolved against the directory of the including file and the included
//! statements are spliced in place, keeping their own file name and line
//! numbers for diagnostics.

mod error;
mod tokenize;

pub use error::LexError;
pub use tokenize::{tokenize_file, tokenize_source, INCLUDE_KEYWORD};
