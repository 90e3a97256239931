//! Function signatures for argument checking

use crate::model::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type accepted by a function parameter or produced by a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Any number
    Number,
    /// A number with no fractional part
    Integer,
    /// Text
    String,
    /// true or false
    Boolean,
    /// No restriction
    Any,
}

impl ValueType {
    /// Check if a value can be passed where this type is expected
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ValueType::Number => matches!(value, Value::Number(_)),
            ValueType::Integer => value.as_integer().is_some(),
            ValueType::String => matches!(value, Value::String(_)),
            ValueType::Boolean => matches!(value, Value::Boolean(_)),
            ValueType::Any => true,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Number => "Number",
            ValueType::Integer => "Integer",
            ValueType::String => "String",
            ValueType::Boolean => "Boolean",
            ValueType::Any => "Any",
        };
        f.write_str(name)
    }
}

/// Function signature used for overload resolution and type checking
///
/// A function is identified by its name and its arity. Two signatures with the
/// same name but a different number of parameters are distinct overloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Function name
    pub name: String,
    /// Parameter types in call order
    pub parameters: Vec<ValueType>,
    /// Return type
    pub return_type: ValueType,
}

impl FunctionSignature {
    /// Create a new function signature
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<ValueType>,
        return_type: ValueType,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type,
        }
    }

    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Index of the first argument this signature rejects
    ///
    /// Returns `None` when every argument is accepted. The caller is expected
    /// to have matched the arity already.
    pub fn first_mismatch(&self, args: &[Value]) -> Option<usize> {
        self.parameters
            .iter()
            .zip(args)
            .position(|(param, arg)| !param.accepts(arg))
    }

    /// Check if the arguments match both the arity and the parameter types
    pub fn matches(&self, args: &[Value]) -> bool {
        args.len() == self.arity() && self.first_mismatch(args).is_none()
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (index, param) in self.parameters.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}
