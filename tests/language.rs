use std::fs;

use rpncalc::{ExprError, Executor, calculate};
use walkdir::WalkDir;

/// Outcome a corpus line expects.
enum Expected {
    Value(f64),
    Error(String),
}

fn parse_case(line: &str) -> Option<(String, Expected)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let (expression, expected) = trimmed.rsplit_once("=>")
                                        .unwrap_or_else(|| panic!("Malformed case line: {line}"));
    let expected = expected.trim();
    let expected = match expected.strip_prefix("error:") {
        Some(kind) => Expected::Error(kind.to_string()),
        None => Expected::Value(expected.parse()
                                        .unwrap_or_else(|e| panic!("Bad value {expected}: {e}"))),
    };
    Some((expression.trim().to_string(), expected))
}

fn error_kind(error: &ExprError) -> &'static str {
    match error {
        ExprError::Lex(_) => "lex",
        ExprError::UnknownToken { .. } => "unknown_token",
        ExprError::UnknownVariable { .. } => "unknown_variable",
        ExprError::IncorrectExpression(_) => "incorrect",
        ExprError::DivisionByZero => "division_by_zero",
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn corpus_cases_hold() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/cases").into_iter()
                                   .filter_map(Result::ok)
                                   .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (expression, expected) in content.lines().filter_map(parse_case) {
            count += 1;
            let result = Executor::new().execute(&expression);
            match (expected, result) {
                (Expected::Value(want), Ok(got)) => {
                    assert!(approx_eq(want, got),
                            "{path:?}: '{expression}' gave {got}, expected {want}");
                },
                (Expected::Value(want), Err(e)) => {
                    panic!("{path:?}: '{expression}' failed with {e}, expected {want}");
                },
                (Expected::Error(kind), Ok(got)) => {
                    panic!("{path:?}: '{expression}' gave {got}, expected a {kind} error");
                },
                (Expected::Error(kind), Err(e)) => {
                    assert_eq!(error_kind(&e), kind, "{path:?}: '{expression}' failed with {e}");
                },
            }
        }
    }

    assert!(count > 0, "No cases found in tests/cases");
}

fn assert_value(src: &str, expected: f64) {
    match calculate(src) {
        Ok(v) => assert!(approx_eq(v, expected), "'{src}' gave {v}, expected {expected}"),
        Err(e) => panic!("'{src}' failed: {e}"),
    }
}

fn assert_failure(src: &str) {
    if let Ok(v) = calculate(src) {
        panic!("'{src}' gave {v} but was expected to fail")
    }
}

#[test]
fn precedence() {
    assert_value("2+3*4", 14.0);
    assert_value("(2+3)*4", 20.0);
}

#[test]
fn associativity() {
    assert_value("2-3-4", -5.0);
    assert_value("2^3^2", 512.0);
}

#[test]
fn unary_disambiguation() {
    assert_value("-2+3", 1.0);
    assert_value("3*-2", -6.0);
    assert_value("min(-1, -2)", -2.0);
}

#[test]
fn function_arity() {
    assert_value("min(3,5)", 3.0);
    assert!(matches!(calculate("min(3)"), Err(ExprError::IncorrectExpression(_))));
}

#[test]
fn unknown_variable_is_error() {
    assert!(matches!(calculate("x+1"),
                     Err(ExprError::UnknownVariable { name }) if name == "x"));
}

#[test]
fn malformed_input_is_error() {
    assert!(matches!(calculate("2+"), Err(ExprError::IncorrectExpression(_))));
    assert!(matches!(calculate("(2+3"), Err(ExprError::IncorrectExpression(_))));
    assert_failure("");
    assert_failure("   ");
}

#[test]
fn division_policy() {
    assert!(matches!(calculate("1/0"), Err(ExprError::DivisionByZero)));

    let mut executor = Executor::new();
    executor.set_division_by_zero_error(false);
    assert_eq!(executor.execute("1/0").unwrap(), f64::INFINITY);
    assert_eq!(executor.execute("-1/0").unwrap(), f64::NEG_INFINITY);
    assert!(executor.execute("0/0").unwrap().is_nan());
}

#[test]
fn determinism() {
    let mut executor = Executor::new();
    executor.set_var("x", 1.25);
    let first = executor.execute("sin(x) ^ 2 + cos(x) ^ 2").unwrap();
    let second = executor.execute("sin(x) ^ 2 + cos(x) ^ 2").unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}
