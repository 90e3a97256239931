// Error types for postfix evaluation

use crate::registry::FunctionError;
use thiserror::Error;

/// Result type for evaluation operations
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// Errors that can occur while evaluating a postfix sequence
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// Too few operands on the stack, or operands of the wrong type
    #[error("Missing argument for '{operator}'")]
    MissingArg {
        /// Operator or function that lacked an operand
        operator: String,
    },

    /// Operands present but no rule combines them
    #[error("Operator '{operator}' cannot combine {left} and {right}")]
    InvalidOperands {
        /// Operator symbol
        operator: String,
        /// Type of the left operand
        left: &'static str,
        /// Type of the right operand
        right: &'static str,
    },

    /// An opening bracket survived into the postfix sequence
    #[error("Unclosed '(' in postfix sequence")]
    MissingRBracket,

    /// A function token with no arity record left
    #[error("No argument count recorded for function '{function}'")]
    MissingArity {
        /// Function name
        function: String,
    },

    /// A token with no meaning in postfix order
    #[error("Unexpected token '{token}' in postfix sequence")]
    UnexpectedToken {
        /// The token's symbol
        token: String,
    },

    /// Function lookup or invocation failed
    #[error("Function error: {0}")]
    Function(#[from] FunctionError),
}
