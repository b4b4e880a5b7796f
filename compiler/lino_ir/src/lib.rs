//! Lino IR - shared data types for the Lino interpreter.
//!
//! This crate holds the types that cross crate boundaries:
//! - `Token`: one whitespace-delimited word with its origin
//! - `Value`: the two runtime kinds, number and text
//! - `format_number`: the printable form of a number

mod token;
mod value;

pub use token::{StatementLine, Token};
pub use value::{format_number, Value, ValueKind};
