//! Postfix evaluator
//!
//! Walks a [`Postfix`](crate::parser::Postfix) sequence once with a value
//! stack, applying operators directly and delegating function calls to a
//! [`FunctionResolver`](crate::registry::FunctionResolver).

#![warn(missing_docs)]

mod engine;
mod error;
mod operations;

pub use engine::{PostfixEvaluator, evaluate};
pub use error::{EvaluationError, EvaluationResult};
pub use operations::{apply_binary, negate};
