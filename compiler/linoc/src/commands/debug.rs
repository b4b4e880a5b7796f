//! The `lex` command: show the tokenized statement lines.

use std::fmt::Write as _;

use lino_ir::StatementLine;

use super::CliError;

/// Render each statement line as `file:line: word word ...`.
pub fn render_lines(lines: &[StatementLine]) -> String {
    let mut out = String::new();
    for line in lines {
        let Some(first) = line.first() else {
            continue;
        };
        let words: Vec<&str> = line.iter().map(|token| token.text.as_str()).collect();
        let _ = writeln!(out, "{}:{}: {}", first.file, first.line, words.join(" "));
    }
    out
}

/// Tokenize `path` and print its statement lines.
pub fn lex_file(path: &str) -> Result<(), CliError> {
    let lines = lino_lexer::tokenize_file(path)?;
    println!("Statements for '{path}' ({} lines):", lines.len());
    print!("{}", render_lines(&lines));
    Ok(())
}
