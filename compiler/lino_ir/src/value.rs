//! Runtime values.
//!
//! Lino has exactly two runtime kinds. Declarations fix the kind of a
//! variable; assignments and input branch on the variant tag.

use std::fmt;

/// A runtime value: a number or a piece of text.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

/// The kind of a value, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Number,
    Text,
}

impl ValueKind {
    /// The keyword that declares a variable of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            ValueKind::Number => "number",
            ValueKind::Text => "string",
        }
    }

    /// Parse a declaration keyword (`number` / `string`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "number" => Some(ValueKind::Number),
            "string" => Some(ValueKind::Text),
            _ => None,
        }
    }

    /// The zero value a fresh declaration starts with.
    pub fn zero(self) -> Value {
        match self {
            ValueKind::Number => Value::Number(0.0),
            ValueKind::Text => Value::Text(String::new()),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl Value {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::Text(_) => ValueKind::Text,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Number(_) => None,
        }
    }

    /// Printable form: numbers via `format_number`, text with all `"` removed.
    pub fn display(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.replace('"', ""),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Format a number with at most six fractional digits, trailing zeros trimmed.
///
/// `5.0` prints as `5`, `2.50` as `2.5`, `1.0 / 3.0` as `0.333333`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let mut text = format!("{n:.6}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
