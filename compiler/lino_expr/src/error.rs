//! Expression errors.

use thiserror::Error;

/// Failure while scanning, parsing or evaluating an expression.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExprError {
    // Scanning
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("unterminated string literal starting at offset {offset}")]
    UnterminatedString { offset: usize },
    #[error("invalid number literal '{text}'")]
    InvalidNumber { text: String },

    // Parsing
    #[error("empty expression")]
    Empty,
    #[error("unexpected {found} at offset {offset}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        offset: usize,
    },

    // Evaluation
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },
    #[error("operator `{op}` cannot be applied to {left} and {right}")]
    InvalidOperands {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    #[error("operator `{op}` cannot be applied to {operand}")]
    InvalidOperand {
        op: &'static str,
        operand: &'static str,
    },
}
