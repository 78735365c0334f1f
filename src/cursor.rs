//! Single-lookahead cursor over the token stream
//!
//! The grammar is LL(1): every parsing decision needs at most the next
//! token. The cursor keeps exactly one token materialized ahead of the
//! consumed position and never rewinds.

use crate::error::ParseError;
use crate::lexer::{tokenize, Token, Tokens};

/// Forward-only cursor with one buffered token of lookahead.
///
/// Tokens are pulled from the lexer on demand, so a lex error surfaces
/// through `peek` or `pop` only once the scan actually reaches the bad
/// input. An exhausted stream answers `UnexpectedEnd`.
pub struct TokenCursor<'a> {
    text: &'a str,
    tokens: Tokens<'a>,
    head: Option<Result<Token, ParseError>>,
}

impl<'a> TokenCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut tokens = tokenize(text);
        let head = tokens.next();
        Self { text, tokens, head }
    }

    /// True when no further tokens remain
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The next token, without consuming it
    pub fn peek(&self) -> Result<&Token, ParseError> {
        match self.head.as_ref() {
            Some(Ok(token)) => Ok(token),
            Some(Err(error)) => Err(error.clone()),
            None => Err(self.unexpected_end()),
        }
    }

    /// The next token, consuming it and advancing by exactly one
    pub fn pop(&mut self) -> Result<Token, ParseError> {
        match self.head.take() {
            Some(head) => {
                self.head = self.tokens.next();
                head
            }
            None => Err(self.unexpected_end()),
        }
    }

    fn unexpected_end(&self) -> ParseError {
        ParseError::UnexpectedEnd {
            text: self.text.to_string(),
        }
    }
}
