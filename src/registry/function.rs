//! Function trait and native function adapter

use crate::model::Value;
use crate::registry::signature::{FunctionSignature, ValueType};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for function operations
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Function lookup and evaluation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    /// No registered function has this name and arity
    #[error("Unknown function '{name}' with {arity} argument(s)")]
    NotFound {
        /// Function name
        name: String,
        /// Number of arguments supplied
        arity: usize,
    },

    /// Invalid argument type
    #[error("Function '{name}' argument {index} expects {expected}, got {actual}")]
    InvalidArgumentType {
        /// Function name
        name: String,
        /// Argument index
        index: usize,
        /// Expected type
        expected: ValueType,
        /// Actual type
        actual: String,
    },

    /// Runtime evaluation error
    #[error("Function '{name}' evaluation error: {message}")]
    EvaluationError {
        /// Function name
        name: String,
        /// Error message
        message: String,
    },
}

impl FunctionError {
    /// Fill in the function name for errors raised by argument helpers
    pub fn with_function_name(mut self, function: &str) -> Self {
        match &mut self {
            FunctionError::NotFound { name, .. }
            | FunctionError::InvalidArgumentType { name, .. }
            | FunctionError::EvaluationError { name, .. } => {
                if name.is_empty() {
                    *name = function.to_string();
                }
            }
        }
        self
    }
}

/// A callable function exposed to expressions
pub trait Function: Send + Sync {
    /// Get the function name
    fn name(&self) -> &str;

    /// Get the function signature
    fn signature(&self) -> &FunctionSignature;

    /// Evaluate the function with already type-checked arguments
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value>;

    /// Get function documentation
    fn documentation(&self) -> &str {
        ""
    }

    /// Validate arguments against the signature
    fn validate_args(&self, args: &[Value]) -> FunctionResult<()> {
        let signature = self.signature();
        if args.len() != signature.arity() {
            return Err(FunctionError::NotFound {
                name: self.name().to_string(),
                arity: args.len(),
            });
        }
        if let Some(index) = signature.first_mismatch(args) {
            return Err(FunctionError::InvalidArgumentType {
                name: self.name().to_string(),
                index,
                expected: signature.parameters[index],
                actual: args[index].type_name().to_string(),
            });
        }
        Ok(())
    }
}

type NativeBody = dyn Fn(&[Value]) -> FunctionResult<Value> + Send + Sync;

/// A function backed by a Rust closure
#[derive(Clone)]
pub struct NativeFunction {
    signature: FunctionSignature,
    documentation: String,
    body: Arc<NativeBody>,
}

impl NativeFunction {
    /// Wrap a closure taking the full argument slice
    pub fn new<F>(signature: FunctionSignature, body: F) -> Self
    where
        F: Fn(&[Value]) -> FunctionResult<Value> + Send + Sync + 'static,
    {
        Self {
            signature,
            documentation: String::new(),
            body: Arc::new(body),
        }
    }

    /// Number -> Number function
    pub fn unary(name: &str, op: fn(f64) -> f64) -> Self {
        let sig = FunctionSignature::new(name, vec![ValueType::Number], ValueType::Number);
        Self::new(sig, move |args| Ok(Value::Number(op(number_arg(args, 0)?))))
    }

    /// (Number, Number) -> Number function
    pub fn binary(name: &str, op: fn(f64, f64) -> f64) -> Self {
        let sig = FunctionSignature::new(
            name,
            vec![ValueType::Number, ValueType::Number],
            ValueType::Number,
        );
        Self::new(sig, move |args| {
            Ok(Value::Number(op(number_arg(args, 0)?, number_arg(args, 1)?)))
        })
    }

    /// Attach a documentation string
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }
}

impl Function for NativeFunction {
    fn name(&self) -> &str {
        &self.signature.name
    }

    fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        (self.body)(args).map_err(|err| err.with_function_name(self.name()))
    }

    fn documentation(&self) -> &str {
        &self.documentation
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Look up a numeric argument, reporting a type error if it is missing
pub(crate) fn number_arg(args: &[Value], index: usize) -> FunctionResult<f64> {
    args.get(index)
        .and_then(Value::as_number)
        .ok_or_else(|| argument_error(args, index, ValueType::Number))
}

/// Look up an integral argument
pub(crate) fn integer_arg(args: &[Value], index: usize) -> FunctionResult<i64> {
    args.get(index)
        .and_then(Value::as_integer)
        .ok_or_else(|| argument_error(args, index, ValueType::Integer))
}

/// Look up a text argument
pub(crate) fn string_arg(args: &[Value], index: usize) -> FunctionResult<&str> {
    args.get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| argument_error(args, index, ValueType::String))
}

fn argument_error(args: &[Value], index: usize, expected: ValueType) -> FunctionError {
    FunctionError::InvalidArgumentType {
        name: String::new(),
        index,
        expected,
        actual: args
            .get(index)
            .map_or("nothing", Value::type_name)
            .to_string(),
    }
}

/// Resolves a function call by name against the supplied arguments
///
/// The evaluator only depends on this trait, so tests and embedders can
/// substitute their own lookup.
pub trait FunctionResolver: Send + Sync {
    /// Find a function matching `name` and `args`, invoke it and return its value
    fn resolve(&self, name: &str, args: &[Value]) -> FunctionResult<Value>;
}
