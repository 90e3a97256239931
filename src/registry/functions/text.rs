//! String functions of the `text` library

use crate::model::Value;
use crate::registry::error::RegistryResult;
use crate::registry::function::{
    FunctionError, FunctionResult, NativeFunction, integer_arg, string_arg,
};
use crate::registry::namespace::Namespace;
use crate::registry::signature::{FunctionSignature, ValueType};

/// Library name
pub const NAME: &str = "text";

/// Longest string `repeat` may produce, in bytes
pub const MAX_REPEAT_BYTES: usize = 1 << 24;

/// Build the `text` namespace
pub fn namespace() -> RegistryResult<Namespace> {
    use ValueType::{Any, Boolean, Integer, Number, String};

    Namespace::new(NAME)
        .with(function("length", &[String], Number, "Number of characters", |args| {
            Ok(Value::Number(string_arg(args, 0)?.chars().count() as f64))
        }))?
        .with(function("upper", &[String], String, "Upper case copy", |args| {
            Ok(Value::String(string_arg(args, 0)?.to_uppercase()))
        }))?
        .with(function("lower", &[String], String, "Lower case copy", |args| {
            Ok(Value::String(string_arg(args, 0)?.to_lowercase()))
        }))?
        .with(function("trim", &[String], String, "Strip surrounding whitespace", |args| {
            Ok(Value::String(string_arg(args, 0)?.trim().to_string()))
        }))?
        .with(function("concat", &[Any, Any], String, "Join the textual forms", |args| {
            Ok(Value::String(
                args.iter().map(Value::to_text).collect::<std::string::String>(),
            ))
        }))?
        .with(function("contains", &[String, String], Boolean, "Substring test", |args| {
            Ok(Value::Boolean(string_arg(args, 0)?.contains(string_arg(args, 1)?)))
        }))?
        .with(function("startsWith", &[String, String], Boolean, "Prefix test", |args| {
            Ok(Value::Boolean(string_arg(args, 0)?.starts_with(string_arg(args, 1)?)))
        }))?
        .with(function("endsWith", &[String, String], Boolean, "Suffix test", |args| {
            Ok(Value::Boolean(string_arg(args, 0)?.ends_with(string_arg(args, 1)?)))
        }))?
        .with(function(
            "substring",
            &[String, Integer],
            String,
            "Characters from start to the end",
            |args| {
                let text = string_arg(args, 0)?;
                let len = text.chars().count();
                let start = char_index(integer_arg(args, 1)?, len)?;
                substring(text, start, len)
            },
        ))?
        .with(function(
            "substring",
            &[String, Integer, Integer],
            String,
            "Characters from start up to, not including, end",
            |args| {
                let text = string_arg(args, 0)?;
                let len = text.chars().count();
                let start = char_index(integer_arg(args, 1)?, len)?;
                let end = char_index(integer_arg(args, 2)?, len)?;
                if start > end {
                    return Err(evaluation_error(format!(
                        "start {start} is after end {end}"
                    )));
                }
                substring(text, start, end)
            },
        ))?
        .with(function("repeat", &[String, Integer], String, "Repeat n times", |args| {
            let text = string_arg(args, 0)?;
            let count = usize::try_from(integer_arg(args, 1)?)
                .map_err(|_| evaluation_error("count must not be negative".to_string()))?;
            match text.len().checked_mul(count) {
                Some(bytes) if bytes <= MAX_REPEAT_BYTES => Ok(Value::String(text.repeat(count))),
                _ => Err(evaluation_error(format!(
                    "result would exceed {MAX_REPEAT_BYTES} bytes"
                ))),
            }
        }))
}

fn function(
    name: &str,
    parameters: &[ValueType],
    returns: ValueType,
    documentation: &str,
    body: impl Fn(&[Value]) -> FunctionResult<Value> + Send + Sync + 'static,
) -> NativeFunction {
    let signature = FunctionSignature::new(name, parameters.to_vec(), returns);
    NativeFunction::new(signature, body).with_documentation(documentation)
}

fn char_index(index: i64, len: usize) -> FunctionResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&index| index <= len)
        .ok_or_else(|| evaluation_error(format!("index {index} out of range 0..={len}")))
}

fn substring(text: &str, start: usize, end: usize) -> FunctionResult<Value> {
    Ok(Value::String(
        text.chars().skip(start).take(end - start).collect(),
    ))
}

fn evaluation_error(message: String) -> FunctionError {
    FunctionError::EvaluationError {
        name: String::new(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::function::Function;
    use pretty_assertions::assert_eq;

    fn call(name: &str, args: &[Value]) -> FunctionResult<Value> {
        let ns = namespace().unwrap();
        let function = ns.find_match(name, args).unwrap();
        function.evaluate(args)
    }

    #[test]
    fn test_string_functions() {
        assert_eq!(call("length", &["héllo".into()]), Ok(Value::Number(5.0)));
        assert_eq!(call("upper", &["ab".into()]), Ok("AB".into()));
        assert_eq!(call("trim", &["  a ".into()]), Ok("a".into()));
        assert_eq!(call("concat", &["n=".into(), Value::Number(2.0)]), Ok("n=2.0".into()));
        assert_eq!(call("contains", &["abc".into(), "bc".into()]), Ok(Value::Boolean(true)));
        assert_eq!(call("endsWith", &["abc".into(), "a".into()]), Ok(Value::Boolean(false)));
        assert_eq!(call("repeat", &["ab".into(), Value::Number(3.0)]), Ok("ababab".into()));
    }

    #[test]
    fn test_substring_overloads() {
        let text: Value = "héllo".into();
        assert_eq!(call("substring", &[text.clone(), Value::Number(1.0)]), Ok("éllo".into()));
        assert_eq!(
            call("substring", &[text.clone(), Value::Number(1.0), Value::Number(3.0)]),
            Ok("él".into())
        );
        assert_eq!(call("substring", &[text.clone(), Value::Number(5.0)]), Ok("".into()));
    }

    #[test]
    fn test_substring_out_of_range() {
        let text: Value = "abc".into();
        let err = call("substring", &[text.clone(), Value::Number(4.0)]).unwrap_err();
        assert_eq!(
            err,
            FunctionError::EvaluationError {
                name: "substring".to_string(),
                message: "index 4 out of range 0..=3".to_string(),
            }
        );
        assert!(call("substring", &[text.clone(), Value::Number(2.0), Value::Number(1.0)]).is_err());
        assert!(call("repeat", &[text, Value::Number(-1.0)]).is_err());
    }

    #[test]
    fn test_repeat_is_bounded() {
        let err = call("repeat", &["abcde".into(), Value::Number(4e18)]).unwrap_err();
        assert_eq!(
            err,
            FunctionError::EvaluationError {
                name: "repeat".to_string(),
                message: format!("result would exceed {MAX_REPEAT_BYTES} bytes"),
            }
        );
        assert_eq!(call("repeat", &["".into(), Value::Number(4e18)]), Ok("".into()));
    }

    #[test]
    fn test_fractional_index_is_rejected() {
        let ns = namespace().unwrap();
        assert!(ns.find_match("substring", &["abc".into(), Value::Number(1.5)]).is_none());
    }
}
