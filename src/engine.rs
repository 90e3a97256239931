//! Expression engine - the main entry point for evaluating text

use crate::error::Result;
use crate::evaluator::evaluate;
use crate::model::Value;
use crate::parser::{Postfix, parse};
use crate::registry::{FunctionRegistry, FunctionResolver, create_standard_registry};
use std::sync::Arc;

/// Parses and evaluates expressions against a shared function registry
///
/// Cloning an engine is cheap and the clone shares the registry, so a library
/// registered through one handle is visible to all of them.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Arc<FunctionRegistry>,
}

impl Engine {
    /// Create an engine with the `math` library registered
    pub fn new() -> Result<Self> {
        Ok(Self::with_registry(Arc::new(create_standard_registry()?)))
    }

    /// Create an engine over an existing registry
    pub fn with_registry(registry: Arc<FunctionRegistry>) -> Self {
        Self { registry }
    }

    /// Registry used to resolve function calls
    pub fn registry(&self) -> &Arc<FunctionRegistry> {
        &self.registry
    }

    /// Evaluate an infix expression
    pub fn evaluate(&self, text: &str) -> Result<Value> {
        evaluate_expression(text, self.registry.as_ref())
    }

    /// Convert an infix expression to postfix form without evaluating it
    pub fn postfix(&self, text: &str) -> Result<Postfix> {
        Ok(parse(text)?)
    }
}

/// Run the whole pipeline: tokenize, convert and evaluate
pub fn evaluate_expression(text: &str, resolver: &dyn FunctionResolver) -> Result<Value> {
    let postfix = parse(text)?;
    Ok(evaluate(postfix, resolver)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaultKind;

    #[test]
    fn test_engine_evaluates_text() {
        let engine = Engine::new().unwrap();
        assert_eq!(engine.evaluate("sqrt(16)").unwrap(), Value::Number(4.0));
        assert_eq!(engine.postfix("1 + 2 * 3").unwrap().to_string(), "1 2 3 * +");
    }

    #[test]
    fn test_clones_share_the_registry() {
        let engine = Engine::new().unwrap();
        let other = engine.clone();
        assert_eq!(
            other.evaluate("upper(\"a\")").unwrap_err().kind(),
            FaultKind::FormulaError
        );

        engine.registry().register_library("text").unwrap();
        assert_eq!(other.evaluate("upper(\"a\")").unwrap(), Value::from("A"));
    }
}
