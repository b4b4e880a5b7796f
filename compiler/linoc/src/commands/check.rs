//! The `check` command: tokenize and link without running.

use super::CliError;

/// Tokenize and link `path`. Returns the number of statements.
pub fn check_file(path: &str) -> Result<usize, CliError> {
    let lines = lino_lexer::tokenize_file(path)?;
    let graph = lino_eval::link(&lines)?;
    Ok(graph.len())
}
