//! Parser error types

use thiserror::Error;

/// Result type for tokenizer and converter operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while scanning text or converting it to postfix form
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A `"` was opened but never closed
    #[error("Unterminated string literal starting at position {position}")]
    UnterminatedString {
        /// Offset of the opening quote
        position: usize,
    },

    /// Digits and dots that do not form a number, such as `1.2.3`
    #[error("Invalid number '{text}' at position {position}")]
    InvalidNumber {
        /// The scanned text
        text: String,
        /// Offset where the number started
        position: usize,
    },

    /// A `)` or `,` with no enclosing `(`
    #[error("Missing '(' for delimiter at position {position}")]
    MissingLBracket {
        /// Offset of the unmatched `)` or `,`
        position: usize,
    },

    /// A `(` that is never closed
    #[error("Missing ')' for bracket opened at position {position}")]
    MissingRBracket {
        /// Offset of the unclosed `(`
        position: usize,
    },

    /// An identifier used without a call bracket, such as `pi + 1`
    #[error("Function '{name}' at position {position} must be followed by '('")]
    MissingCallBracket {
        /// The identifier
        name: String,
        /// Offset of the identifier
        position: usize,
    },

    /// A call with no arguments, such as `max()`
    #[error("Function '{name}' at position {position} is called without arguments")]
    EmptyCall {
        /// Function name
        name: String,
        /// Offset of the function name
        position: usize,
    },
}

impl ParseError {
    /// Offset in the input the error refers to
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnterminatedString { position }
            | ParseError::InvalidNumber { position, .. }
            | ParseError::MissingLBracket { position }
            | ParseError::MissingRBracket { position }
            | ParseError::MissingCallBracket { position, .. }
            | ParseError::EmptyCall { position, .. } => *position,
        }
    }
}
