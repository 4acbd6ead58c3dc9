use exprun::{Environment, ErrorKind, Event, Interpreter, OutputMode, Value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::run_collecting;

fn value_of(source: &str) -> Option<Value> {
    let (outcome, _, _) = run_collecting(source);
    assert!(outcome.is_success(), "{source:?} failed: {outcome:?}");
    outcome.value
}

#[test]
fn test_sequential_assignment() {
    let (outcome, events, interpreter) = run_collecting(
        "
        total = 0
        total = total + 5
        step = 2; total = total * step
        total
        ",
    );
    assert_eq!(outcome.value, Some(Value::Number(10.0)));
    assert!(events.is_empty());

    let env = interpreter.environment();
    assert_eq!(env.get("total"), Ok(Value::Number(10.0)));
    assert_eq!(env.get("step"), Ok(Value::Number(2.0)));
}

#[test]
fn test_print_and_display() {
    let (_, events, _) = run_collecting("x = 4 * 5\nprint x\nprint x / 8\nprint x > 3\nprint 1 x10^ 20");
    assert_eq!(
        events,
        vec![
            Event::Stdout("20.0".to_string()),
            Event::Stdout("2.5".to_string()),
            Event::Stdout("true".to_string()),
            Event::Stdout("1e20".to_string()),
        ]
    );
}

#[test]
fn test_scientific_literals() {
    assert_eq!(value_of("2 x10^ 3"), Some(Value::Number(2000.0)));
    assert_eq!(value_of("2 x10^ (1+1)"), Some(Value::Number(200.0)));
    // the exponent takes the whole expression that follows
    assert_eq!(value_of("2 x10^ 1 + 1"), Some(Value::Number(200.0)));
    assert_eq!(value_of("e = 2\n1.5 x10^ e"), Some(Value::Number(150.0)));
}

#[test]
fn test_chained_comparisons() {
    assert_eq!(value_of("1 < 2 < 3"), Some(Value::Boolean(true)));
    assert_eq!(value_of("1 < 2 < 1"), Some(Value::Boolean(false)));
    assert_eq!(value_of("1 <= 1 == 1 != 2"), Some(Value::Boolean(true)));
    // the third operand would fail if it were evaluated
    assert_eq!(value_of("3 < 2 < undefined_name"), Some(Value::Boolean(false)));
}

#[test]
fn test_comparison_without_operator_keeps_value() {
    assert_eq!(value_of("(7)"), Some(Value::Number(7.0)));
}

#[test]
fn test_assert_returns_value() {
    assert_eq!(value_of("assert 1 < 2"), Some(Value::Boolean(true)));
    assert_eq!(value_of("assert 0.5"), Some(Value::Number(0.5)));
}

#[test]
fn test_logical_operators() {
    assert_eq!(value_of("1 < 2 and 2 < 3"), Some(Value::Boolean(true)));
    assert_eq!(value_of("not 1 or 0"), Some(Value::Boolean(false)));
    assert_eq!(value_of("not (1 or 0)"), Some(Value::Boolean(false)));
    assert_eq!(value_of("0 or 0 or 3"), Some(Value::Boolean(true)));
    assert_eq!(value_of("1 or nope"), Some(Value::Boolean(true)));
}

#[test]
fn test_runtime_error_stops_execution() {
    let (outcome, events, interpreter) = run_collecting("a = 1\nprint a\nassert a > 1\nprint a\na = 2");
    assert_eq!(outcome.failure, Some(ErrorKind::Runtime));
    assert_eq!(outcome.value, None);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], Event::Stdout("1.0".to_string()));
    assert!(matches!(&events[1], Event::RuntimeError(_)));
    assert_eq!(interpreter.environment().get("a"), Ok(Value::Number(1.0)));
}

#[test]
fn test_division_by_zero_is_runtime_error() {
    let (outcome, events, _) = run_collecting("x = 1 / 0");
    assert_eq!(outcome.failure, Some(ErrorKind::Runtime));
    assert!(matches!(
        &events[..],
        [Event::RuntimeError(report)] if report.starts_with("Runtime Error: Division by zero.")
    ));
}

#[test]
fn test_seeded_environment() {
    let seed: Environment = [("rate", Value::Number(0.25)), ("on", Value::Boolean(true))]
        .into_iter()
        .collect();
    let mut interpreter = Interpreter::default().with_environment(seed);
    let mut events = Vec::new();
    let outcome = {
        let mut output = OutputMode::structured(|event| events.push(event));
        interpreter.run("print rate * 8\non and rate", &mut output).unwrap()
    };
    assert_eq!(outcome.value, Some(Value::Boolean(true)));
    assert_eq!(events, vec![Event::Stdout("2.0".to_string())]);
}

proptest! {
    #[test]
    fn prop_integer_arithmetic_matches_host(a in -1000i32..1000, b in -1000i32..1000, c in 1i32..100) {
        let source = format!("({a}) + ({b}) * ({c})");
        let expected = f64::from(a) + f64::from(b) * f64::from(c);
        prop_assert_eq!(value_of(&source), Some(Value::Number(expected)));
    }

    #[test]
    fn prop_assignment_then_read(name in "[a-z_][a-z0-9_]{0,8}", n in 0u32..100_000) {
        prop_assume!(!["assert", "print", "and", "or", "not"].contains(&name.as_str()));
        let source = format!("{name} = {n}\n{name}");
        prop_assert_eq!(value_of(&source), Some(Value::Number(f64::from(n))));
    }
}
