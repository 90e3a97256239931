//! Lexical analysis utilities

use super::span::Spanned;
use super::tokenizer::Token;
use std::collections::VecDeque;

/// Check if a character extends a number literal
#[inline]
pub fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Check if a character extends a function name
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphabetic()
}

/// Check if a character separates tokens without producing one
#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

/// Single-pass token stream with one token of lookahead
///
/// The stream hands out each token exactly once and cannot be rewound. After
/// the converter has drained it, [`TokenStream::is_exhausted`] returns true.
#[derive(Debug, Default)]
pub struct TokenStream {
    tokens: VecDeque<Spanned<Token>>,
}

impl TokenStream {
    /// Create a new token stream
    pub fn new(tokens: impl Into<VecDeque<Spanned<Token>>>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    /// Build a stream from bare tokens, giving each a zero-width span at its index
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens
                .into_iter()
                .enumerate()
                .map(|(index, token)| Spanned::new(token, index, index))
                .collect(),
        }
    }

    /// Peek at the current token without consuming
    pub fn peek(&self) -> Option<&Spanned<Token>> {
        self.tokens.front()
    }

    /// Check if the next token equals `expected`
    pub fn next_is(&self, expected: &Token) -> bool {
        self.peek().is_some_and(|token| token.value == *expected)
    }

    /// Consume a token if it matches the predicate
    pub fn consume_if<F>(&mut self, predicate: F) -> Option<Spanned<Token>>
    where
        F: FnOnce(&Token) -> bool,
    {
        if predicate(&self.peek()?.value) {
            return self.tokens.pop_front();
        }
        None
    }

    /// Check if every token has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens not yet consumed
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    /// Iterate over the tokens not yet consumed without consuming them
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().map(|spanned| &spanned.value)
    }
}

impl Iterator for TokenStream {
    type Item = Spanned<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tokens.len(), Some(self.tokens.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_classes() {
        assert!(is_number_char('0'));
        assert!(is_number_char('.'));
        assert!(!is_number_char('a'));

        assert!(is_word_char('a'));
        assert!(is_word_char('Z'));
        assert!(is_word_char('é'));
        assert!(!is_word_char('_'));
        assert!(!is_word_char('1'));

        assert!(is_whitespace('\x0c'));
        assert!(!is_whitespace('"'));
    }

    #[test]
    fn test_stream_is_single_pass() {
        let mut stream = TokenStream::from_tokens([Token::Number(1.0), Token::Plus, Token::Eol]);
        assert_eq!(stream.remaining(), 3);
        assert!(stream.next_is(&Token::Number(1.0)));

        assert_eq!(stream.next().map(Spanned::into_inner), Some(Token::Number(1.0)));
        assert!(stream.consume_if(|t| *t == Token::Eol).is_none());
        assert!(stream.consume_if(|t| *t == Token::Plus).is_some());
        assert_eq!(stream.iter().collect::<Vec<_>>(), vec![&Token::Eol]);

        assert!(stream.next().is_some());
        assert!(stream.is_exhausted());
        assert!(stream.next().is_none());
    }
}
