#![allow(clippy::unwrap_used, clippy::expect_used)]
//! CLI command handlers against files on disk.

use std::fs;

use linoc::commands::{check_file, render_lines, run_file, CliError};
use linoc::RunConfig;
use lino_eval::{LinkErrorKind, RuntimeErrorKind};
use pretty_assertions::assert_eq;

fn write(dir: &tempfile::TempDir, name: &str, source: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, source).expect("write source");
    path.to_string_lossy().into_owned()
}

#[test]
fn check_counts_statements() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(
        &dir,
        "count.lino",
        "# counter\nnumber x\nwhile x < 3\nx = x + 1\nend\n",
    );
    assert_eq!(check_file(&path).expect("links"), 4);
}

#[test]
fn check_follows_includes() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(&dir, "lib.lino", "function twice number n\nn = n * 2\nend\n");
    let main = write(&dir, "main.lino", "include lib.lino\ncall twice 2\n");
    assert_eq!(check_file(&main).expect("links"), 4);
}

#[test]
fn check_reports_link_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(&dir, "bad.lino", "number x\nif x > 0\n");
    let err = check_file(&path).expect_err("unmatched");
    match err {
        CliError::Link(link) => {
            assert!(matches!(link.kind, LinkErrorKind::UnmatchedBlock { .. }));
            assert_eq!(link.trace.line, 2);
        }
        other => panic!("expected link error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_a_lex_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.lino");
    let err = check_file(&path.to_string_lossy()).expect_err("missing");
    assert!(matches!(err, CliError::Lex(_)));
    assert!(err.to_string().contains("absent.lino"), "{err}");
}

#[test]
fn run_surfaces_runtime_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(
        &dir,
        "deep.lino",
        "function loop_forever\ncall loop_forever\nend\ncall loop_forever\n",
    );
    let config = RunConfig {
        max_call_depth: Some(8),
        ..RunConfig::default()
    };
    let err = run_file(&path, &config).expect_err("depth limit");
    match err {
        CliError::Runtime(runtime) => {
            assert!(matches!(
                runtime.kind,
                RuntimeErrorKind::RecursionLimit { limit: 8 }
            ));
        }
        other => panic!("expected runtime error, got {other:?}"),
    }
}

#[test]
fn render_lines_shows_origin() {
    let lines = lino_lexer::tokenize_source("number x\n\nout \"a  b\"\n", "demo.lino");
    assert_eq!(
        render_lines(&lines),
        "demo.lino:1: number x\ndemo.lino:3: out \"a b\"\n"
    );
}
