#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end scenarios: source text in, captured output out.

use lino_eval::{
    buffer_output, link, Engine, InputHandler, LinkErrorKind, RuntimeError, RuntimeErrorKind,
};
use lino_lexer::tokenize_source;
use pretty_assertions::assert_eq;

struct Run {
    output: String,
    result: Result<(), RuntimeError>,
}

fn run_with_input(source: &str, input: &str) -> Run {
    let graph = link(&tokenize_source(source, "scenario.lino")).expect("program links");
    let output = buffer_output();
    let mut engine = Engine::builder(graph)
        .output(output.clone())
        .input(InputHandler::scripted(input))
        .build();
    let result = engine.run();
    Run {
        output: output.contents(),
        result,
    }
}

fn run_ok(source: &str) -> String {
    let run = run_with_input(source, "");
    run.result.expect("program runs");
    run.output
}

#[test]
fn while_loop_counts() {
    let source = "\
number x
x = 0
while x < 2
x = x + 1
out x
end
";
    assert_eq!(run_ok(source), "1\n2\n");
}

#[test]
fn while_loop_prints_before_incrementing() {
    let source = "\
number x
x = 1
while x < 3
out x
x = x + 1
end
";
    assert_eq!(run_ok(source), "1\n2\n");
}

#[test]
fn string_input_echo() {
    let run = run_with_input("string s\nin s\nout s\n", "hello\n");
    run.result.expect("program runs");
    assert_eq!(run.output, "hello\n");
}

#[test]
fn function_call_and_continue() {
    let source = "\
function double number n
n = n * 2
out n
end
call double 5
out \"after\"
";
    assert_eq!(run_ok(source), "10\nafter\n");
}

#[test]
fn trailing_if_without_end_fails_to_link() {
    let lines = tokenize_source("number x\nout \"start\"\nif x > 0\n", "scenario.lino");
    let err = link(&lines).expect_err("unmatched block");
    assert_eq!(
        err.kind,
        LinkErrorKind::UnmatchedBlock {
            keyword: "if".into()
        }
    );
    assert_eq!(err.trace.line, 3);
    assert_eq!(
        err.to_string(),
        "`if` has no matching block (File: scenario.lino / Line: 3 / if)"
    );
}

#[test]
fn shadowing_leaves_outer_value_unchanged() {
    let source = "\
number x
x = 1
if x == 1
number x
x = 50
out x
end
out x
";
    assert_eq!(run_ok(source), "50\n1\n");
}

#[test]
fn nested_blocks_write_through_to_outer_scope() {
    let source = "\
number total
number i
while i < 3
i = i + 1
if i != 2
total = total + i
end
end
out total
";
    assert_eq!(run_ok(source), "4\n");
}

#[test]
fn calls_with_different_arguments_are_independent() {
    let source = "\
function square number n
n = n * n
out n
end
call square 3
call square 4
call square 3
";
    assert_eq!(run_ok(source), "9\n16\n9\n");
}

#[test]
fn string_parameters_and_concatenated_output() {
    let source = "\
function greet string who
out \"hello,\" who
end
string name
in name
call greet name
call greet \"big world\"
";
    let run = run_with_input(source, "ada");
    run.result.expect("program runs");
    assert_eq!(run.output, "hello,ada\nhello,big world\n");
}

#[test]
fn fizzbuzz_style_program() {
    let source = "\
# print multiples
number i
while i < 10
i = i + 1
if i % 3 == 0 && i % 5 != 0
out i \"fizz\"
end
end
";
    assert_eq!(run_ok(source), "3 fizz\n6 fizz\n9 fizz\n");
}

#[test]
fn division_prints_trimmed_decimals() {
    let source = "number x\nx = 1 / 3\nout x\nx = 10 / 4\nout x\nx = 1 / 0\nout x";
    assert_eq!(run_ok(source), "0.333333\n2.5\ninf\n");
}

#[test]
fn numeric_input_retries_until_valid() {
    let source = "number n\nin n\nn = n + 1\nout n";
    let run = run_with_input(source, "ten 1e1");
    run.result.expect("program runs");
    assert_eq!(run.output, "Please retry: invalid float literal\n11\n");
}

#[test]
fn runtime_error_keeps_earlier_output() {
    let source = "out \"one\"\nnumber a\nin a\nout \"two\"";
    let run = run_with_input(source, "");
    let err = run.result.expect_err("input closed");
    assert!(matches!(err.kind, RuntimeErrorKind::InputClosed { .. }));
    assert_eq!(run.output, "one\n");
}

#[test]
fn error_inside_function_carries_call_site() {
    let source = "\
function broken number n
n = n / missing
end
call broken 1
";
    let run = run_with_input(source, "");
    let err = run.result.expect_err("unbound variable");
    assert_eq!(err.trace.line, 2);
    assert_eq!(
        err.backtrace
            .iter()
            .map(|trace| trace.line)
            .collect::<Vec<_>>(),
        vec![4]
    );
}
