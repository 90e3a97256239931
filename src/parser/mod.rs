//! Expression parser
//!
//! Scans infix text into tokens and converts them to postfix order with the
//! shunting-yard algorithm. The result is a [`Postfix`] sequence that the
//! evaluator consumes exactly once.

#![warn(missing_docs)]

pub mod error;
pub mod lexer;
pub mod shunting_yard;
pub mod span;
pub mod tokenizer;

pub use error::{ParseError, ParseResult};
pub use lexer::TokenStream;
pub use shunting_yard::{Postfix, to_postfix};
pub use span::Spanned;
pub use tokenizer::{Token, Tokenizer, tokenize};

/// Tokenize and convert an expression to postfix form in one step
pub fn parse(input: &str) -> ParseResult<Postfix> {
    let mut stream = tokenize(input)?;
    to_postfix(&mut stream)
}
