use super::*;
use pretty_assertions::assert_eq;
use std::fs;

fn words(lines: &[StatementLine]) -> Vec<Vec<&str>> {
    lines
        .iter()
        .map(|line| line.iter().map(|t| t.text.as_str()).collect())
        .collect()
}

#[test]
fn splits_lines_into_words() {
    let lines = tokenize_source("number x\nx = 1 + 2\n", "main.lino");
    assert_eq!(words(&lines), vec![vec!["number", "x"], vec!["x", "=", "1", "+", "2"]]);
}

#[test]
fn skips_blank_lines_and_comments() {
    let source = "\n   \n# a comment\n  # indented comment\nout 1\n";
    let lines = tokenize_source(source, "main.lino");
    assert_eq!(words(&lines), vec![vec!["out", "1"]]);
}

#[test]
fn records_origin_of_each_token() {
    let lines = tokenize_source("# header\n\nout   \"hi\"\t there", "demo.lino");
    let tokens = &lines[0];
    assert_eq!(tokens.len(), 3);
    assert!(tokens.iter().all(|t| t.line == 3 && t.file == "demo.lino"));
}

#[test]
fn source_mode_keeps_include_lines() {
    let lines = tokenize_source("include other.lino", "main.lino");
    assert_eq!(words(&lines), vec![vec!["include", "other.lino"]]);
}

#[test]
fn include_splices_lines_with_their_own_origin() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("lib.lino"), "number shared\n").expect("write lib");
    fs::write(
        dir.path().join("main.lino"),
        "out 1\ninclude lib.lino\nout shared\n",
    )
    .expect("write main");

    let lines = tokenize_file(dir.path().join("main.lino")).expect("tokenize");
    assert_eq!(
        words(&lines),
        vec![vec!["out", "1"], vec!["number", "shared"], vec!["out", "shared"]]
    );
    assert!(lines[1][0].file.ends_with("lib.lino"));
    assert_eq!(lines[1][0].line, 1);
    assert_eq!(lines[2][0].line, 3);
}

#[test]
fn missing_include_is_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("main.lino"), "include nowhere.lino\nout 1\n").expect("write");

    let lines = tokenize_file(dir.path().join("main.lino")).expect("tokenize");
    assert_eq!(words(&lines), vec![vec!["out", "1"]]);
}

#[test]
fn include_cycle_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("a.lino"), "include b.lino\n").expect("write a");
    fs::write(dir.path().join("b.lino"), "include a.lino\n").expect("write b");

    let err = tokenize_file(dir.path().join("a.lino")).expect_err("cycle");
    assert!(matches!(err, LexError::IncludeCycle { .. }));
}

#[test]
fn empty_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("empty.lino"), "# nothing here\n").expect("write");

    let err = tokenize_file(dir.path().join("empty.lino")).expect_err("empty");
    assert!(matches!(err, LexError::Empty { .. }));
}

#[test]
fn unreadable_root_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = tokenize_file(dir.path().join("missing.lino")).expect_err("missing");
    assert!(matches!(err, LexError::Io { .. }));
}
