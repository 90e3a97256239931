//! Stack machine over postfix tokens

use super::error::{EvaluationError, EvaluationResult};
use super::operations::{apply_binary, negate};
use crate::model::Value;
use crate::parser::{Postfix, Token};
use crate::registry::FunctionResolver;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Evaluates a postfix sequence against a function resolver
///
/// The evaluator owns its value stack, so one instance serves exactly one
/// evaluation and can be dropped afterwards.
pub struct PostfixEvaluator<'r> {
    resolver: &'r dyn FunctionResolver,
    stack: Vec<Value>,
}

impl<'r> PostfixEvaluator<'r> {
    /// Create an evaluator that resolves calls through `resolver`
    pub fn new(resolver: &'r dyn FunctionResolver) -> Self {
        Self {
            resolver,
            stack: Vec::new(),
        }
    }

    /// Consume the postfix sequence and produce its value
    ///
    /// An empty sequence evaluates to the empty string. When more than one
    /// operand remains, the top of the stack is the result.
    pub fn run(mut self, postfix: Postfix) -> EvaluationResult<Value> {
        let (tokens, mut arities) = postfix.into_parts();

        for token in tokens {
            match token {
                Token::Number(n) => self.stack.push(Value::Number(n)),
                Token::String(s) => self.stack.push(Value::String(s)),
                Token::UnaryMinus => {
                    let operand = self.pop(&token)?;
                    self.stack.push(negate(operand)?);
                }
                Token::Word(name) => self.call(name, &mut arities)?,
                Token::LBracket => return Err(EvaluationError::MissingRBracket),
                Token::Eol => break,
                Token::RBracket | Token::Delim => {
                    return Err(EvaluationError::UnexpectedToken {
                        token: token.symbol().to_string(),
                    });
                }
                op => {
                    let right = self.pop(&op)?;
                    let left = self.pop(&op)?;
                    self.stack.push(apply_binary(&op, left, right)?);
                }
            }
        }

        if self.stack.len() > 1 {
            log::trace!("{} operand(s) left unused", self.stack.len() - 1);
        }
        Ok(self.stack.pop().unwrap_or_else(|| Value::String(String::new())))
    }

    fn call(&mut self, name: String, arities: &mut VecDeque<usize>) -> EvaluationResult<()> {
        let arity = arities
            .pop_front()
            .ok_or_else(|| EvaluationError::MissingArity {
                function: name.clone(),
            })?;
        if self.stack.len() < arity {
            return Err(EvaluationError::MissingArg { operator: name });
        }

        let args: SmallVec<[Value; 4]> = self.stack.drain(self.stack.len() - arity..).collect();
        log::trace!("resolving {name} with {arity} argument(s)");
        let value = self.resolver.resolve(&name, &args)?;
        self.stack.push(value);
        Ok(())
    }

    fn pop(&mut self, op: &Token) -> EvaluationResult<Value> {
        self.stack.pop().ok_or_else(|| EvaluationError::MissingArg {
            operator: op.symbol().to_string(),
        })
    }
}

/// Evaluate a postfix sequence, resolving calls through `resolver`
pub fn evaluate(postfix: Postfix, resolver: &dyn FunctionResolver) -> EvaluationResult<Value> {
    PostfixEvaluator::new(resolver).run(postfix)
}
