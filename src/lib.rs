//! Infix expression evaluator
//!
//! Text such as `3 + max(2, sqrt(16)) * -1` is tokenized, converted to
//! postfix order with the shunting-yard algorithm and evaluated on a stack.
//! Function calls are resolved through a [`FunctionRegistry`] holding named
//! libraries of functions.
//!
//! ```
//! use aapie::{Engine, Value};
//!
//! let engine = Engine::new().unwrap();
//! assert_eq!(engine.evaluate("3 + 7 / (4 * 5 - 6)").unwrap(), Value::Number(3.5));
//! ```

pub mod cli;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod registry;

pub use engine::{Engine, evaluate_expression};
pub use error::{AapieError, FaultKind, Result};
pub use model::Value;
pub use parser::{ParseError, Postfix, Token, parse};
pub use registry::{FunctionRegistry, create_standard_registry};
