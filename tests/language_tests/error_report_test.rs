use exprun::{format_error, ErrorInfo, ErrorKind, Event, SourcePosition};
use pretty_assertions::assert_eq;

use crate::run_collecting;

fn single_report(source: &str) -> String {
    let (_, events, _) = run_collecting(source);
    match &events[..] {
        [.., Event::SyntaxError(report)] | [.., Event::RuntimeError(report)] => report.clone(),
        other => panic!("expected an error report, got {other:?}"),
    }
}

fn caret_column(report: &str) -> usize {
    let lines: Vec<&str> = report.lines().collect();
    let pointer = lines[3];
    let label_width = lines[2].find("| ").unwrap() + 2;
    pointer.find('^').unwrap() - label_width
}

#[test]
fn test_undefined_variable_report() {
    let report = single_report("print z");
    assert_eq!(
        report,
        [
            "Runtime Error: Undefined variable 'z'.",
            "Located at line 1, column 6:",
            "Line 1   | print z",
            "                 ^",
        ]
        .join("\n")
    );
    assert_eq!(caret_column(&report), 6);
}

#[test]
fn test_assert_blames_expression_not_keyword() {
    let report = single_report("x = 3\n  assert x < 2");
    assert!(report.starts_with("Runtime Error: Assertion failed.\n"));
    assert!(report.contains("Located at line 2, column 9:"));
    assert!(report.contains("Line 2   |   assert x < 2"));
    assert_eq!(caret_column(&report), 9);
}

#[test]
fn test_operator_errors_blame_operator() {
    let report = single_report("y = 10\ny % (y - 10)");
    assert!(report.starts_with("Runtime Error: Modulo by zero."));
    assert_eq!(caret_column(&report), 2);

    let report = single_report("(0 - 1) ^ 0.5");
    assert!(report.starts_with("Runtime Error: Invalid exponentiation."));
    assert_eq!(caret_column(&report), 8);
}

#[test]
fn test_syntax_error_report() {
    let report = single_report("a = 1\nprint (a + 2");
    assert_eq!(
        report,
        [
            "Syntax Error: mismatched input '<EOF>' expecting ')'",
            "Located at line 2, column 12:",
            "Line 2   | print (a + 2",
            "                       ^",
        ]
        .join("\n")
    );
}

#[test]
fn test_first_syntax_error_only() {
    let (_, events, _) = run_collecting("a = = 1\nb = = 2\nprint a");
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], Event::SyntaxError(r) if r.contains("line 1")));
}

#[test]
fn test_crlf_source_lines() {
    let report = single_report("a = 1\r\nprint a + q\r\n");
    assert!(report.contains("Line 2   | print a + q\n"));
    assert_eq!(caret_column(&report), 10);
}

#[test]
fn test_formatting_is_pure() {
    let info = ErrorInfo::new("Division by zero.", SourcePosition::new(12345, 3), "a / 0");
    let first = format_error(&info, ErrorKind::Runtime);
    let second = format_error(&info, ErrorKind::Runtime);
    assert_eq!(first, second);
    assert_eq!(caret_column(&first), 3);
    assert!(first.contains("Line 12345| a / 0"));
}
