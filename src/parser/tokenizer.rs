//! Tokenizer for infix expressions
//!
//! Scanning is driven by a three state machine (`None`, `Number`, `Word`).
//! Digits, dots and letters accumulate in a pending buffer which is flushed
//! into a token whenever the state changes. Operators, brackets and the
//! argument delimiter are emitted directly.
//!
//! Characters that belong to no class are dropped without flushing the
//! buffer, so `1$2` scans as the single number `12`.

use super::error::{ParseError, ParseResult};
use super::lexer::{TokenStream, is_number_char, is_whitespace, is_word_char};
use super::span::Spanned;
use std::fmt;

/// A lexical token of an infix or postfix expression
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Numeric literal (e.g., 42, 3.5, .5)
    Number(f64),
    /// String literal copied verbatim from between double quotes
    String(String),
    /// Identifier, always a function name
    Word(String),

    // Arithmetic operators
    /// Addition or concatenation (+)
    Plus,
    /// Subtraction (-)
    Minus,
    /// Multiplication (*)
    Mult,
    /// Division (/)
    Div,
    /// Floating point remainder (%)
    Mod,
    /// Negation, produced by the converter from a `-` in prefix position
    UnaryMinus,

    // Comparison operators
    /// Greater than (>)
    Gt,
    /// Less than (<)
    Lt,
    /// Greater than or equal (>=)
    Ge,
    /// Less than or equal (<=)
    Le,
    /// Equality (= or ==)
    Eq,

    // Structure
    /// Left parenthesis (
    LBracket,
    /// Right parenthesis )
    RBracket,
    /// Argument delimiter (,)
    Delim,
    /// End of line, always the last token of a scanned sequence
    Eol,
}

impl Token {
    /// Operator precedence, higher binds tighter. Non-operators return 0.
    #[inline]
    pub fn precedence(&self) -> u8 {
        match self {
            Token::Gt | Token::Lt | Token::Ge | Token::Le | Token::Eq => 1,
            Token::Plus | Token::Minus => 2,
            Token::Mult | Token::Div | Token::Mod => 3,
            Token::UnaryMinus => 4,
            _ => 0,
        }
    }

    /// Source symbol of an operator or structural token
    pub fn symbol(&self) -> &'static str {
        match self {
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Mult => "*",
            Token::Div => "/",
            Token::Mod => "%",
            Token::UnaryMinus => "neg",
            Token::Gt => ">",
            Token::Lt => "<",
            Token::Ge => ">=",
            Token::Le => "<=",
            Token::Eq => "=",
            Token::LBracket => "(",
            Token::RBracket => ")",
            Token::Delim => ",",
            Token::Eol => "<eol>",
            Token::Number(_) => "number",
            Token::String(_) => "string",
            Token::Word(_) => "word",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::String(s) => write!(f, "\"{s}\""),
            Token::Word(name) => f.write_str(name),
            other => f.write_str(other.symbol()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    None,
    Number,
    Word,
}

/// Scanner turning expression text into a [`TokenStream`]
pub struct Tokenizer<'input> {
    input: &'input str,
    state: ScanState,
    buffer: String,
    buffer_start: usize,
    tokens: Vec<Spanned<Token>>,
}

impl<'input> Tokenizer<'input> {
    /// Create a tokenizer over the given text
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            state: ScanState::None,
            buffer: String::new(),
            buffer_start: 0,
            tokens: Vec::with_capacity(16),
        }
    }

    /// Scan the whole input, appending a single trailing `Eol`
    pub fn tokenize_all(mut self) -> ParseResult<TokenStream> {
        let mut chars = self.input.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            match ch {
                '*' => self.emit_single(Token::Mult, pos)?,
                '/' => self.emit_single(Token::Div, pos)?,
                '%' => self.emit_single(Token::Mod, pos)?,
                '+' => self.emit_single(Token::Plus, pos)?,
                '-' => self.emit_single(Token::Minus, pos)?,
                '(' => self.emit_single(Token::LBracket, pos)?,
                ')' => self.emit_single(Token::RBracket, pos)?,
                ',' => self.emit_single(Token::Delim, pos)?,
                '<' | '>' | '=' => {
                    self.set_state(ScanState::None, pos)?;
                    let doubled = chars.next_if(|&(_, next)| next == '=').is_some();
                    let token = match (ch, doubled) {
                        ('<', false) => Token::Lt,
                        ('<', true) => Token::Le,
                        ('>', false) => Token::Gt,
                        ('>', true) => Token::Ge,
                        _ => Token::Eq,
                    };
                    let end = if doubled { pos + 2 } else { pos + 1 };
                    self.tokens.push(Spanned::new(token, pos, end));
                }
                '"' => {
                    self.set_state(ScanState::None, pos)?;
                    let mut text = String::new();
                    let end = loop {
                        match chars.next() {
                            Some((close, '"')) => break close + 1,
                            Some((_, c)) => text.push(c),
                            None => return Err(ParseError::UnterminatedString { position: pos }),
                        }
                    };
                    self.tokens.push(Spanned::new(Token::String(text), pos, end));
                }
                c if is_whitespace(c) => self.set_state(ScanState::None, pos)?,
                c if is_number_char(c) => {
                    self.set_state(ScanState::Number, pos)?;
                    self.buffer.push(c);
                }
                c if is_word_char(c) => {
                    self.set_state(ScanState::Word, pos)?;
                    self.buffer.push(c);
                }
                _ => {}
            }
        }

        let end = self.input.len();
        self.set_state(ScanState::None, end)?;
        self.tokens.push(Spanned::new(Token::Eol, end, end));

        log::trace!("tokenized {:?} into {} tokens", self.input, self.tokens.len());
        Ok(TokenStream::new(self.tokens))
    }

    /// Flush any pending literal, then emit a one-character token
    #[inline]
    fn emit_single(&mut self, token: Token, pos: usize) -> ParseResult<()> {
        self.set_state(ScanState::None, pos)?;
        self.tokens.push(Spanned::new(token, pos, pos + 1));
        Ok(())
    }

    /// Change the scan state, flushing the buffer when the state differs
    fn set_state(&mut self, state: ScanState, pos: usize) -> ParseResult<()> {
        if self.state != state {
            self.flush(pos)?;
            self.buffer_start = pos;
        }
        self.state = state;
        Ok(())
    }

    fn flush(&mut self, end: usize) -> ParseResult<()> {
        let text = std::mem::take(&mut self.buffer);
        let token = match self.state {
            ScanState::None => return Ok(()),
            ScanState::Number => {
                let value = text.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                    text: text.clone(),
                    position: self.buffer_start,
                })?;
                Token::Number(value)
            }
            ScanState::Word => Token::Word(text),
        };
        self.tokens.push(Spanned::new(token, self.buffer_start, end));
        Ok(())
    }
}

/// Scan expression text into a token stream ending with `Eol`
pub fn tokenize(input: &str) -> ParseResult<TokenStream> {
    Tokenizer::new(input).tokenize_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().map(Spanned::into_inner).collect()
    }

    #[test]
    fn test_arithmetic_tokens() {
        assert_eq!(
            kinds("3 + 7 / (4 * 5 - 6) % 2"),
            vec![
                Token::Number(3.0),
                Token::Plus,
                Token::Number(7.0),
                Token::Div,
                Token::LBracket,
                Token::Number(4.0),
                Token::Mult,
                Token::Number(5.0),
                Token::Minus,
                Token::Number(6.0),
                Token::RBracket,
                Token::Mod,
                Token::Number(2.0),
                Token::Eol,
            ]
        );
    }

    #[test]
    fn test_function_call_tokens() {
        assert_eq!(
            kinds("max(3,.5)"),
            vec![
                Token::Word("max".to_string()),
                Token::LBracket,
                Token::Number(3.0),
                Token::Delim,
                Token::Number(0.5),
                Token::RBracket,
                Token::Eol,
            ]
        );
    }

    #[test]
    fn test_comparison_tokens() {
        assert_eq!(
            kinds("1<2 <= 3>4>=5=6==7"),
            vec![
                Token::Number(1.0),
                Token::Lt,
                Token::Number(2.0),
                Token::Le,
                Token::Number(3.0),
                Token::Gt,
                Token::Number(4.0),
                Token::Ge,
                Token::Number(5.0),
                Token::Eq,
                Token::Number(6.0),
                Token::Eq,
                Token::Number(7.0),
                Token::Eol,
            ]
        );
    }

    #[test]
    fn test_state_change_splits_words_and_numbers() {
        assert_eq!(
            kinds("log10"),
            vec![
                Token::Word("log".to_string()),
                Token::Number(10.0),
                Token::Eol
            ]
        );
    }

    #[test]
    fn test_string_literal_is_verbatim() {
        assert_eq!(
            kinds("\"a b\\n(c)\"+1"),
            vec![
                Token::String("a b\\n(c)".to_string()),
                Token::Plus,
                Token::Number(1.0),
                Token::Eol,
            ]
        );
        assert_eq!(kinds("\"\""), vec![Token::String(String::new()), Token::Eol]);
    }

    #[test]
    fn test_unknown_characters_are_dropped() {
        assert_eq!(kinds("1$2"), vec![Token::Number(12.0), Token::Eol]);
        assert_eq!(
            kinds("a_b(1)"),
            vec![
                Token::Word("ab".to_string()),
                Token::LBracket,
                Token::Number(1.0),
                Token::RBracket,
                Token::Eol,
            ]
        );
    }

    #[test]
    fn test_single_trailing_eol() {
        assert_eq!(kinds(""), vec![Token::Eol]);
        assert_eq!(kinds(" \t\r\n\x0c"), vec![Token::Eol]);
        let tokens = kinds("sqrt(16) + 1");
        assert_eq!(tokens.iter().filter(|t| **t == Token::Eol).count(), 1);
        assert_eq!(tokens.last(), Some(&Token::Eol));
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            tokenize("1 + \"abc").unwrap_err(),
            ParseError::UnterminatedString { position: 4 }
        );
    }

    #[test]
    fn test_invalid_number() {
        assert_eq!(
            tokenize("2 * 1.2.3").unwrap_err(),
            ParseError::InvalidNumber {
                text: "1.2.3".to_string(),
                position: 4,
            }
        );
        assert!(matches!(
            tokenize(".").unwrap_err(),
            ParseError::InvalidNumber { .. }
        ));
    }

    #[test]
    fn test_spans() {
        let tokens: Vec<_> = tokenize("12 + abc").unwrap().collect();
        assert_eq!((tokens[0].start, tokens[0].end), (0, 2));
        assert_eq!((tokens[1].start, tokens[1].end), (3, 4));
        assert_eq!((tokens[2].start, tokens[2].end), (5, 8));
        assert_eq!((tokens[3].start, tokens[3].end), (8, 8));
    }
}
