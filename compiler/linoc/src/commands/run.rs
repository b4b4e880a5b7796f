//! The `run` command: tokenize, link and execute a Lino file.

use std::io::{self, BufRead, Write};

use lino_eval::{Engine, TimingSummary};
use lino_ir::StatementLine;
use tracing::debug;

use super::CliError;
use crate::RunConfig;

/// Run a Lino source file.
pub fn run_file(path: &str, config: &RunConfig) -> Result<(), CliError> {
    let lines = lino_lexer::tokenize_file(path)?;
    debug!(path, statements = lines.len(), "tokenized");
    run_lines(&lines, config)
}

/// Link and run already tokenized lines on stdout / stdin.
pub fn run_lines(lines: &[StatementLine], config: &RunConfig) -> Result<(), CliError> {
    let graph = lino_eval::link(lines)?;
    let mut engine = Engine::new(graph, config.engine_options());

    let result = if config.debug {
        step_interactively(&mut engine)
    } else {
        engine.run().map_err(CliError::from)
    };

    if config.dump {
        dump_scope(&engine);
    }
    if let Some(timings) = engine.timings() {
        print_timings(&timings.summary(), engine.steps());
    }
    result
}

/// Debug mode on the terminal.
fn step_interactively(engine: &mut Engine) -> Result<(), CliError> {
    eprintln!("Debugging mode enabled, press Enter after each statement to continue.");
    step_with_pauses(engine, io::stdin().lock(), io::stderr())
}

/// Run one statement at a time, showing it and waiting for a line on
/// `pauses` after each.
///
/// When `pauses` is exhausted the rest of the program runs unpaused.
pub(crate) fn step_with_pauses(
    engine: &mut Engine,
    mut pauses: impl BufRead,
    mut prompt: impl Write,
) -> Result<(), CliError> {
    while let Some(id) = engine.current() {
        let more = engine.step()?;
        write!(prompt, "[debug] {} > ", engine.graph().node(id).trace)?;
        prompt.flush()?;
        if !more {
            writeln!(prompt)?;
            break;
        }

        let mut line = String::new();
        if pauses.read_line(&mut line)? == 0 {
            writeln!(prompt)?;
            debug!("debug input closed, running to completion");
            engine.run()?;
            break;
        }
    }
    Ok(())
}

/// Print the variables visible where execution stopped.
fn dump_scope(engine: &Engine) {
    let scope = engine
        .current()
        .map_or(engine.scopes().root(), |id| engine.graph().node(id).scope);
    eprintln!("Variables:");
    for (name, value) in engine.scopes().bindings(scope) {
        eprintln!("  {name} ({}) = {value}", value.kind());
    }
}

fn print_timings(rows: &[TimingSummary], steps: u64) {
    eprintln!("Timings ({steps} steps):");
    eprintln!("  {:<10} {:>8} {:>14} {:>14}", "statement", "count", "total", "mean");
    for row in rows {
        eprintln!(
            "  {:<10} {:>8} {:>14} {:>14}",
            row.label,
            row.count,
            format!("{:?}", row.total),
            format!("{:?}", row.mean)
        );
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
