//! Operator semantics over dynamically typed values

use super::error::{EvaluationError, EvaluationResult};
use crate::model::Value;
use crate::parser::Token;

/// Apply a binary operator to two operands
///
/// Empty strings count as zero. Two numbers follow IEEE-754 arithmetic, so
/// division by zero yields an infinity or NaN instead of failing. Two booleans
/// only support equality. Any other pair can only be joined with `+`, which
/// concatenates their textual forms.
pub fn apply_binary(op: &Token, left: Value, right: Value) -> EvaluationResult<Value> {
    let left = coerce_empty(left);
    let right = coerce_empty(right);

    match (&left, &right) {
        (Value::Number(l), Value::Number(r)) => numeric(op, *l, *r),
        (Value::Boolean(l), Value::Boolean(r)) if *op == Token::Eq => Ok(Value::Boolean(l == r)),
        (Value::Boolean(_), Value::Boolean(_)) => Err(invalid_operands(op, &left, &right)),
        _ if *op == Token::Plus => Ok(Value::String(left.to_text() + &right.to_text())),
        _ => Err(invalid_operands(op, &left, &right)),
    }
}

/// Negate a numeric operand. Empty strings are not coerced here.
pub fn negate(operand: Value) -> EvaluationResult<Value> {
    match operand {
        Value::Number(n) => Ok(Value::Number(-n)),
        _ => Err(EvaluationError::MissingArg {
            operator: Token::UnaryMinus.symbol().to_string(),
        }),
    }
}

fn numeric(op: &Token, l: f64, r: f64) -> EvaluationResult<Value> {
    let value = match op {
        Token::Plus => Value::Number(l + r),
        Token::Minus => Value::Number(l - r),
        Token::Mult => Value::Number(l * r),
        Token::Div => Value::Number(l / r),
        Token::Mod => Value::Number(l % r),
        Token::Gt => Value::Boolean(l > r),
        Token::Lt => Value::Boolean(l < r),
        Token::Ge => Value::Boolean(l >= r),
        Token::Le => Value::Boolean(l <= r),
        Token::Eq => Value::Boolean(l == r),
        other => {
            return Err(EvaluationError::UnexpectedToken {
                token: other.symbol().to_string(),
            });
        }
    };
    Ok(value)
}

fn invalid_operands(op: &Token, left: &Value, right: &Value) -> EvaluationError {
    EvaluationError::InvalidOperands {
        operator: op.symbol().to_string(),
        left: left.type_name(),
        right: right.type_name(),
    }
}

fn coerce_empty(value: Value) -> Value {
    if value.is_empty_string() {
        Value::Number(0.0)
    } else {
        value
    }
}
