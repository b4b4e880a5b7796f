//! Line splitting and the `include` directive.

use std::fs;
use std::path::{Path, PathBuf};

use lino_ir::{StatementLine, Token};

use crate::LexError;

/// Keyword of the line-level include directive.
pub const INCLUDE_KEYWORD: &str = "include";

/// Tokenize in-memory source.
///
/// `file` is only recorded on the tokens. Include directives are not
/// followed here since there is no file system context; an `include`
/// line is kept as an ordinary statement.
pub fn tokenize_source(source: &str, file: &str) -> Vec<StatementLine> {
    source
        .lines()
        .zip(1u32..)
        .filter_map(|(text, line)| split_line(text, file, line))
        .collect()
}

/// Tokenize a file, following `include` directives.
pub fn tokenize_file(path: impl AsRef<Path>) -> Result<Vec<StatementLine>, LexError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "tokenizing");

    let mut tokenizer = FileTokenizer::default();
    tokenizer.tokenize(path)?;

    tracing::debug!(lines = tokenizer.lines.len(), "statement lines processed");

    if tokenizer.lines.is_empty() {
        return Err(LexError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(tokenizer.lines)
}

/// Split one raw line into tokens; `None` for blank lines and comments.
fn split_line(text: &str, file: &str, line: u32) -> Option<StatementLine> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(
        trimmed
            .split_whitespace()
            .map(|word| Token::new(word, file, line))
            .collect(),
    )
}

/// Accumulates statement lines across nested includes.
#[derive(Default)]
struct FileTokenizer {
    lines: Vec<StatementLine>,
    /// Files currently being tokenized, outermost first.
    active: Vec<PathBuf>,
}

impl FileTokenizer {
    fn tokenize(&mut self, path: &Path) -> Result<(), LexError> {
        let source = fs::read_to_string(path).map_err(|source| LexError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let identity = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if self.active.contains(&identity) {
            return Err(LexError::IncludeCycle {
                path: path.to_path_buf(),
            });
        }
        self.active.push(identity);

        let file = path.display().to_string();
        for (text, line) in source.lines().zip(1u32..) {
            let Some(tokens) = split_line(text, &file, line) else {
                continue;
            };

            if let Some(target) = include_target(text, &tokens) {
                let included = path.parent().unwrap_or(Path::new("")).join(target);
                self.include(&included)?;
                continue;
            }

            self.lines.push(tokens);
        }

        self.active.pop();
        Ok(())
    }

    fn include(&mut self, path: &Path) -> Result<(), LexError> {
        tracing::debug!(path = %path.display(), "include directive found");
        match self.tokenize(path) {
            Err(LexError::Io { path, source }) => {
                tracing::warn!(
                    path = %path.display(),
                    "cannot open included file ({source}), skipping it"
                );
                Ok(())
            }
            other => other,
        }
    }
}

/// The path named by an `include` line, if this is one.
fn include_target<'a>(text: &'a str, tokens: &[Token]) -> Option<&'a str> {
    if tokens.len() < 2 || tokens[0].text != INCLUDE_KEYWORD {
        return None;
    }
    let rest = text.trim_start().strip_prefix(INCLUDE_KEYWORD)?;
    Some(rest.trim())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
mod tests;
