//! Statement operands.
//!
//! Every token after a statement's keyword becomes a `Parameter`. The
//! classifier runs left to right and joins the words of a quoted string
//! back together, since the tokenizer split them on whitespace.

use std::fmt;

use lino_ir::{Token, Value};

use crate::scope::{ScopeId, ScopeTree};

/// Operator symbols recognized as standalone operands.
pub const OPERATORS: [&str; 14] = [
    "==", "=", "!=", "<", ">", "<=", ">=", "+", "-", "/", "*", "%", "(", ")",
];

/// One classified operand of a statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Parameter {
    Number(String),
    /// A quoted literal, possibly spanning several words, quotes kept.
    Text(String),
    Variable(String),
    Operator(String),
}

impl Parameter {
    /// The text as written in the source.
    pub fn raw(&self) -> &str {
        match self {
            Parameter::Number(text)
            | Parameter::Text(text)
            | Parameter::Variable(text)
            | Parameter::Operator(text) => text,
        }
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        matches!(self, Parameter::Variable(_))
    }

    /// Printable form, resolving variables against `scope`.
    ///
    /// An unbound variable prints as the empty string.
    pub fn display(&self, scopes: &ScopeTree, scope: ScopeId) -> String {
        match self {
            Parameter::Text(text) => text.replace('"', ""),
            Parameter::Variable(name) => scopes
                .get(scope, name)
                .map(Value::display)
                .unwrap_or_default(),
            Parameter::Number(text) | Parameter::Operator(text) => text.clone(),
        }
    }

    /// Runtime value of the operand. `None` only for unbound variables.
    pub fn value(&self, scopes: &ScopeTree, scope: ScopeId) -> Option<Value> {
        match self {
            Parameter::Number(text) => Some(Value::Number(text.parse().unwrap_or_default())),
            Parameter::Text(text) => Some(Value::Text(text.replace('"', ""))),
            Parameter::Variable(name) => scopes.get(scope, name).cloned(),
            Parameter::Operator(symbol) => Some(Value::Text(symbol.clone())),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}

pub fn is_operator(text: &str) -> bool {
    OPERATORS.contains(&text)
}

/// Whether `text` is a numeric literal.
///
/// Requires an ASCII digit so `inf` and `nan` remain identifiers.
pub fn is_number_literal(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_digit()) && text.parse::<f64>().is_ok()
}

/// Classify a statement's operand tokens.
///
/// A quoted literal stays open while the number of `"` seen across the
/// parameters built so far is odd; following words are appended to it
/// with a single space.
pub fn classify<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> Vec<Parameter> {
    let mut params: Vec<Parameter> = Vec::new();
    let mut quotes = 0usize;

    for token in tokens {
        let text = token.text.as_str();
        quotes += text.matches('"').count();

        if is_number_literal(text) {
            params.push(Parameter::Number(text.to_string()));
            continue;
        }

        let inside = (quotes - text.matches('"').count()) % 2 == 1;
        if inside || text.starts_with('"') {
            match params.last_mut() {
                Some(Parameter::Text(literal)) if inside => {
                    literal.push(' ');
                    literal.push_str(text);
                }
                _ => params.push(Parameter::Text(text.to_string())),
            }
            continue;
        }

        if is_operator(text) {
            params.push(Parameter::Operator(text.to_string()));
        } else {
            params.push(Parameter::Variable(text.to_string()));
        }
    }

    params
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
