//! Error types for markup extension parsing

use std::fmt;

use crate::lexer::Token;

/// Errors raised while tokenizing or parsing a markup extension expression.
///
/// Every variant carries the full original text so a failure can be reported
/// without the caller keeping the input around. All variants are fatal to the
/// parse call that raised them; there is no recovery and no partial result.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// No token rule matched at the given byte offset
    Lex { text: String, offset: usize },
    /// A token was required but the stream was exhausted
    UnexpectedEnd { text: String },
    /// The next token did not match what the grammar required
    Syntax {
        text: String,
        expected: String,
        found: String,
        offset: usize,
    },
    /// A literal token could not be converted to its typed value
    Coercion { text: String, token: Token },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex { text, offset } => {
                write!(
                    f,
                    "Can't parse \"{}\", no token rule matches at index {}",
                    text, offset
                )
            }
            ParseError::UnexpectedEnd { text } => {
                write!(f, "Can't parse \"{}\", stream was terminated unexpectedly", text)
            }
            ParseError::Syntax {
                text,
                expected,
                found,
                offset,
            } => {
                write!(
                    f,
                    "Can't parse \"{}\", {} is expected, \"{}\" was found at index {}",
                    text, expected, found, offset
                )
            }
            ParseError::Coercion { text, token } => {
                write!(
                    f,
                    "Can't parse \"{}\", \"{}\" is not a valid {} literal at index {}",
                    text, token.text, token.kind, token.start
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}
