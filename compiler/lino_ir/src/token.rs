//! Tokens produced by the tokenizer.

use std::fmt;

/// A single word of a statement line, tagged with where it came from.
///
/// `file` and `line` are only used for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub text: String,
    pub file: String,
    pub line: u32,
}

impl Token {
    pub fn new(text: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Token {
            text: text.into(),
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One statement: the keyword token followed by its operand tokens.
pub type StatementLine = Vec<Token>;
