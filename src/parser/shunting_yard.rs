//! Infix to postfix conversion using the shunting-yard algorithm
//!
//! A series of tokens like `3 + 7 / (4 * 5 - 6)` is converted to
//! `3 7 4 5 * 6 - / +`. Function calls are tracked with a second stack that
//! counts the comma separated arguments of every open call; when the call's
//! closing bracket is reached the function name moves to the output and its
//! argument count is recorded as an arity.

use super::error::{ParseError, ParseResult};
use super::lexer::TokenStream;
use super::span::Spanned;
use super::tokenizer::Token;
use std::collections::VecDeque;
use std::fmt;

/// An expression in postfix order together with the arity of every call
///
/// Arities are stored in the order the calls closed, which is also the order
/// in which an evaluator meets the corresponding `Word` tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Postfix {
    tokens: VecDeque<Token>,
    arities: VecDeque<usize>,
}

impl Postfix {
    /// Assemble a postfix sequence by hand
    pub fn new(
        tokens: impl IntoIterator<Item = Token>,
        arities: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
            arities: arities.into_iter().collect(),
        }
    }

    /// Tokens in evaluation order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Argument counts, one per function call, in evaluation order
    pub fn arities(&self) -> impl Iterator<Item = usize> + '_ {
        self.arities.iter().copied()
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if there is nothing to evaluate
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub(crate) fn into_parts(self) -> (VecDeque<Token>, VecDeque<usize>) {
        (self.tokens, self.arities)
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Converter state, scoped to a single conversion
#[derive(Debug, Default)]
struct ShuntingYard {
    output: Vec<Token>,
    operators: Vec<Spanned<Token>>,
    arg_counts: Vec<usize>,
    arities: Vec<usize>,
    last_was_operand: bool,
}

impl ShuntingYard {
    fn convert(mut self, stream: &mut TokenStream) -> ParseResult<Postfix> {
        while let Some(spanned) = stream.next() {
            let Spanned { value: token, start, end } = spanned;

            match token {
                Token::Number(_) | Token::String(_) => {
                    self.output.push(token);
                    self.last_was_operand = true;
                }
                Token::Minus if !self.last_was_operand => {
                    self.operators.push(Spanned::new(Token::UnaryMinus, start, end));
                }
                Token::UnaryMinus => {
                    self.operators.push(Spanned::new(token, start, end));
                    self.last_was_operand = false;
                }
                Token::LBracket => {
                    if stream.next_is(&Token::RBracket)
                        && let Some(Spanned { value: Token::Word(name), start, .. }) =
                            self.operators.last()
                    {
                        return Err(ParseError::EmptyCall {
                            name: name.clone(),
                            position: *start,
                        });
                    }
                    self.operators.push(Spanned::new(token, start, end));
                    self.last_was_operand = false;
                }
                Token::RBracket => {
                    self.close_bracket(start)?;
                    self.last_was_operand = true;
                }
                Token::Delim => {
                    self.delimit_argument(start)?;
                    self.last_was_operand = false;
                }
                Token::Word(name) => {
                    if !stream.next_is(&Token::LBracket) {
                        return Err(ParseError::MissingCallBracket { name, position: start });
                    }
                    self.arg_counts.push(1);
                    self.operators.push(Spanned::new(Token::Word(name), start, end));
                    self.last_was_operand = false;
                }
                Token::Eol => self.drain_operators()?,
                // Binary arithmetic and comparison operators
                op => {
                    self.push_operator(Spanned::new(op, start, end));
                    self.last_was_operand = false;
                }
            }
        }

        // A hand-built stream may omit the trailing Eol
        self.drain_operators()?;

        let postfix = Postfix::new(self.output, self.arities);
        log::trace!("postfix: {postfix}");
        Ok(postfix)
    }

    /// Pop operators of greater or equal precedence, then push `op`
    fn push_operator(&mut self, op: Spanned<Token>) {
        let precedence = op.value.precedence();
        while self
            .operators
            .last()
            .is_some_and(|top| top.value.precedence() >= precedence)
        {
            if let Some(top) = self.operators.pop() {
                self.output.push(top.value);
            }
        }
        self.operators.push(op);
    }

    fn close_bracket(&mut self, position: usize) -> ParseResult<()> {
        loop {
            match self.operators.pop() {
                Some(Spanned { value: Token::LBracket, .. }) => break,
                Some(op) => self.output.push(op.value),
                None => return Err(ParseError::MissingLBracket { position }),
            }
        }

        if matches!(
            self.operators.last(),
            Some(Spanned { value: Token::Word(_), .. })
        ) {
            let arity = self
                .arg_counts
                .pop()
                .ok_or(ParseError::MissingLBracket { position })?;
            if let Some(word) = self.operators.pop() {
                self.output.push(word.value);
                self.arities.push(arity);
            }
        }
        Ok(())
    }

    fn delimit_argument(&mut self, position: usize) -> ParseResult<()> {
        let count = self
            .arg_counts
            .last_mut()
            .ok_or(ParseError::MissingLBracket { position })?;
        *count += 1;

        loop {
            match self.operators.last() {
                Some(Spanned { value: Token::LBracket, .. }) => return Ok(()),
                Some(_) => {
                    if let Some(op) = self.operators.pop() {
                        self.output.push(op.value);
                    }
                }
                None => return Err(ParseError::MissingLBracket { position }),
            }
        }
    }

    fn drain_operators(&mut self) -> ParseResult<()> {
        while let Some(op) = self.operators.pop() {
            if op.value == Token::LBracket {
                return Err(ParseError::MissingRBracket { position: op.start });
            }
            self.output.push(op.value);
        }
        Ok(())
    }
}

/// Convert an infix token stream into postfix order, draining the stream
pub fn to_postfix(stream: &mut TokenStream) -> ParseResult<Postfix> {
    ShuntingYard::default().convert(stream)
}
