//! Core value type produced by expression evaluation

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved value on the evaluation stack
///
/// Expressions are dynamically typed: every literal, operator result and
/// function result is one of these three variants. Coercions between them are
/// performed by the evaluator, never by the value itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// IEEE-754 double precision number
    Number(f64),

    /// Text, either a literal or the result of a concatenation
    String(String),

    /// Result of a comparison
    Boolean(bool),
}

impl Value {
    /// Name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "Number",
            Self::String(_) => "String",
            Self::Boolean(_) => "Boolean",
        }
    }

    /// Numeric payload, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric payload as an integer, if it is finite and has no fraction
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Number(n)
                if n.is_finite() && n.fract() == 0.0 && n.abs() <= i64::MAX as f64 =>
            {
                Some(*n as i64)
            }
            _ => None,
        }
    }

    /// Text payload, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// True for the empty string, which arithmetic treats as zero
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Self::String(s) if s.is_empty())
    }

    /// Textual form used for output and for string concatenation
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::String(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// Formats a number so that integral values keep a trailing `.0` and very
/// large or very small magnitudes switch to `E` notation (`1.0E7`, `2.5E-4`).
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = n.abs();
    if n == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let mut text = format!("{n}");
        if !text.contains('.') {
            text.push_str(".0");
        }
        return text;
    }

    let scientific = format!("{n:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => scientific,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display() {
        assert_eq!(Value::Number(7.0).to_text(), "7.0");
        assert_eq!(Value::Number(4.5).to_text(), "4.5");
        assert_eq!(Value::Number(-12.0).to_text(), "-12.0");
        assert_eq!(Value::Number(0.0).to_text(), "0.0");
        assert_eq!(Value::Number(0.001).to_text(), "0.001");
    }

    #[test]
    fn test_number_display_scientific() {
        assert_eq!(Value::Number(1e7).to_text(), "1.0E7");
        assert_eq!(Value::Number(2.5e-4).to_text(), "2.5E-4");
        assert_eq!(Value::Number(-3.25e10).to_text(), "-3.25E10");
    }

    #[test]
    fn test_non_finite_display() {
        assert_eq!(Value::Number(f64::NAN).to_text(), "NaN");
        assert_eq!(Value::Number(f64::INFINITY).to_text(), "Infinity");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_text(), "-Infinity");
    }

    #[test]
    fn test_string_and_boolean_display() {
        assert_eq!(Value::from("ab").to_text(), "ab");
        assert_eq!(Value::Boolean(true).to_text(), "true");
    }

    #[test]
    fn test_integer_payload() {
        assert_eq!(Value::Number(3.0).as_integer(), Some(3));
        assert_eq!(Value::Number(-2.0).as_integer(), Some(-2));
        assert_eq!(Value::Number(2.5).as_integer(), None);
        assert_eq!(Value::Number(f64::NAN).as_integer(), None);
        assert_eq!(Value::from("3").as_integer(), None);
    }

    #[test]
    fn test_empty_string_detection() {
        assert!(Value::from("").is_empty_string());
        assert!(!Value::from(" ").is_empty_string());
        assert!(!Value::Number(0.0).is_empty_string());
    }

    #[test]
    fn test_serializes_untagged() {
        let json = serde_json::to_string(&Value::Number(4.5)).unwrap();
        assert_eq!(json, "4.5");
        let json = serde_json::to_string(&Value::from("ab")).unwrap();
        assert_eq!(json, "\"ab\"");
    }
}
