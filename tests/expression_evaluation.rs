//! End-to-end evaluation of infix expressions through the public API

use aapie::{Engine, FaultKind, Value};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

#[fixture]
fn engine() -> Engine {
    Engine::new().unwrap()
}

#[rstest]
#[case("3 + 7 / (4 * 5 - 6)", 3.5)]
#[case("1 - 2 - 3", -4.0)]
#[case("2 * 3 + 4 * 5", 26.0)]
#[case("(2 + 3) * 4", 20.0)]
#[case("8 / 4 / 2", 1.0)]
#[case("7 % 4 * 2", 6.0)]
#[case("-3+4", 1.0)]
#[case("3-4", -1.0)]
#[case("3*-4", -12.0)]
#[case("--3", 3.0)]
#[case("-(2 + 3)", -5.0)]
#[case("max(3,7)", 7.0)]
#[case("sqrt(16)", 4.0)]
#[case("max(min(1, 2), pow(2, 3))", 8.0)]
#[case("1 + max(2, 3) * 2", 7.0)]
#[case("\"\" + 5", 5.0)]
#[case("floor(2.7) + ceil(0.2)", 3.0)]
fn test_numeric_results(engine: Engine, #[case] expression: &str, #[case] expected: f64) {
    assert_eq!(engine.evaluate(expression).unwrap(), Value::Number(expected));
}

#[rstest]
#[case("\"a\" + \"b\"", Value::from("ab"))]
#[case("\"n = \" + 2", Value::from("n = 2.0"))]
#[case("3 > 2", Value::Boolean(true))]
#[case("1 + 1 = 2", Value::Boolean(true))]
#[case("2 <= 1", Value::Boolean(false))]
#[case("(1 > 0) = (2 > 1)", Value::Boolean(true))]
#[case("", Value::from(""))]
#[case("1 2", Value::Number(2.0))]
fn test_other_results(engine: Engine, #[case] expression: &str, #[case] expected: Value) {
    assert_eq!(engine.evaluate(expression).unwrap(), expected);
}

#[rstest]
fn test_division_by_zero_is_not_a_fault(engine: Engine) {
    assert_eq!(engine.evaluate("1 / 0").unwrap(), Value::Number(f64::INFINITY));
    assert!(engine.evaluate("0 / 0").unwrap().as_number().unwrap().is_nan());
    assert_eq!(engine.evaluate("1 / 0").unwrap().to_string(), "Infinity");
}

#[rstest]
#[case("(3+4", FaultKind::MissingRBracket)]
#[case("3+4)", FaultKind::MissingLBracket)]
#[case("1, 2", FaultKind::MissingLBracket)]
#[case("sqrt 4", FaultKind::MissingLBracket)]
#[case("\"a\" - \"b\"", FaultKind::MissingArg)]
#[case("\"a\"-1", FaultKind::MissingArg)]
#[case("1 +", FaultKind::MissingArg)]
#[case("-", FaultKind::MissingArg)]
#[case("max()", FaultKind::MissingArg)]
#[case("(1 > 0) + 1 > 2", FaultKind::MissingArg)]
#[case("(1 > 0) + (2 > 1)", FaultKind::MissingArg)]
#[case("-\"\"", FaultKind::MissingArg)]
#[case("nosuch(1)", FaultKind::FormulaError)]
#[case("sqrt(1, 2)", FaultKind::FormulaError)]
#[case("sqrt(\"x\")", FaultKind::FormulaError)]
#[case("\"open", FaultKind::UnterminatedString)]
#[case("1.2.3 + 1", FaultKind::InvalidNumber)]
fn test_faults(engine: Engine, #[case] expression: &str, #[case] expected: FaultKind) {
    assert_eq!(engine.evaluate(expression).unwrap_err().kind(), expected);
}

#[rstest]
fn test_fault_messages(engine: Engine) {
    let err = engine.evaluate("nosuch(1)").unwrap_err();
    assert_eq!(err.kind().user_message(), "No such library or function");

    let err = engine.evaluate("1 -").unwrap_err();
    assert_eq!(err.kind().user_message(), "Missing argument in expression");

    let err = engine.evaluate("(1").unwrap_err();
    assert_eq!(err.kind().user_message(), "Missing bracket in expression");
    assert_eq!(err.position(), Some(0));
}

#[rstest]
fn test_unknown_characters_are_dropped(engine: Engine) {
    assert_eq!(engine.evaluate("1$2 + 1").unwrap(), Value::Number(13.0));
    assert_eq!(engine.evaluate("2 # * 3").unwrap(), Value::Number(6.0));
}

#[rstest]
fn test_words_stop_at_digits(engine: Engine) {
    // `log10(x)` scans as `log` followed by `10`, which is not a call
    assert_eq!(
        engine.evaluate("log10(100)").unwrap_err().kind(),
        FaultKind::MissingLBracket
    );
}

#[rstest]
fn test_text_library(engine: Engine) {
    assert_eq!(engine.evaluate("length(\"abc\")").unwrap_err().kind(), FaultKind::FormulaError);

    engine.registry().register_library("text").unwrap();
    assert_eq!(engine.evaluate("length(\"abc\") * 2").unwrap(), Value::Number(6.0));
    assert_eq!(
        engine.evaluate("upper(substring(\"hello\", 1, 3))").unwrap(),
        Value::from("EL")
    );
    assert_eq!(
        engine.evaluate("substring(\"abc\", 9)").unwrap_err().kind(),
        FaultKind::FormulaError
    );
    assert_eq!(
        engine.evaluate("repeat(\"abcde\", 4000000000000000000)").unwrap_err().kind(),
        FaultKind::FormulaError
    );
}
