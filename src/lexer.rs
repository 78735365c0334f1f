//! Tokenizer for markup extension expressions
//!
//! Expressions like `{Binding Path=Name, Mode=TwoWay}` are cut into tokens by
//! an ordered table of regex rules. At each position the rules are tried in
//! declaration order and the first rule matching a non-empty prefix wins, so
//! precedence is encoded entirely by the table: terminals first, then the
//! literal kinds, then identifiers, whose pattern is the most permissive.
//!
//! Whitespace between tokens is skipped before each match attempt and never
//! emitted; whitespace inside a quoted string is consumed by the string rule
//! itself. A position where no rule matches ends the stream with a lex error
//! carrying the byte offset.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;

/// The classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TokenKind {
    /// One of the structural characters `{` `}` `=` `,`
    Terminal,
    /// A type, attribute, or enum-like name; may carry `:` and `.` separators
    Identifier,
    /// A single-quoted string literal, `''` escaping a quote
    String,
    /// `true` or `false`, first letter in either case
    Boolean,
    /// A run of digits
    Integer,
    /// A fraction with an optional integer part, such as `.5`
    Decimal,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Terminal => "terminal",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Boolean => "boolean",
            TokenKind::Integer => "integer",
            TokenKind::Decimal => "decimal",
        };
        write!(f, "{}", name)
    }
}

/// A single token cut from an expression
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Token {
    /// What the rule table classified this text as
    pub kind: TokenKind,

    /// The matched text, exactly as written in the expression
    pub text: String,

    /// Byte offset of the first character within the original expression
    pub start: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: String, start: usize) -> Self {
        Self { kind, text, start }
    }
}

/// Token rules as regex patterns paired with the kind they produce.
/// Order matters: rules are tried in declaration order and the first rule
/// matching a non-empty prefix at the scan position wins.
const TOKEN_PATTERNS: &[(TokenKind, &str)] = &[
    // Structural characters
    (TokenKind::Terminal, r"[{}=,]"),
    // Boolean literals, before identifiers which would also match them
    (TokenKind::Boolean, r"true|True|false|False"),
    // Single-quoted strings; a doubled quote stands for one quote
    (TokenKind::String, r"'([^']|'')*'"),
    // Integers before decimals: a digit run is cut as an integer even when
    // a fraction follows, so only leading-dot decimals survive as one token
    (TokenKind::Integer, r"[0-9]+"),
    (TokenKind::Decimal, r"[0-9]*\.[0-9]+"),
    // Identifiers last; the `*` quantifier can match empty text, which the
    // scan loop treats as no match
    (TokenKind::Identifier, r"[A-Za-z0-9_:().]*"),
];

/// Compiled rule table, each pattern anchored at the scan position
static TOKEN_TABLE: Lazy<Vec<(TokenKind, Regex)>> = Lazy::new(|| {
    TOKEN_PATTERNS
        .iter()
        .map(|(kind, pattern)| (*kind, Regex::new(&format!(r"\A(?:{})", pattern)).unwrap()))
        .collect()
});

/// Cut `text` into tokens.
///
/// Tokens are produced lazily; an offset where no rule matches surfaces as an
/// error item when the iterator reaches it, after which the stream ends.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { text, pos: 0 }
}

/// Lazy token iterator over one expression
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();

        if self.pos >= self.text.len() {
            return None;
        }

        for (kind, regex) in TOKEN_TABLE.iter() {
            if let Some(matched) = regex.find(&self.text[self.pos..]) {
                if matched.as_str().is_empty() {
                    continue;
                }

                let token = Token::new(*kind, matched.as_str().to_string(), self.pos);
                self.pos += matched.end();
                return Some(Ok(token));
            }
        }

        let offset = self.pos;
        self.pos = self.text.len();
        Some(Err(ParseError::Lex {
            text: self.text.to_string(),
            offset,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(text: &str) -> Vec<Token> {
        tokenize(text)
            .collect::<Result<Vec<_>, _>>()
            .expect("expected the text to tokenize cleanly")
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_simple_extension() {
        let tokens = lex_all("{Binding Path=Name}");

        assert_eq!(
            texts(&tokens),
            vec!["{", "Binding", "Path", "=", "Name", "}"]
        );
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Terminal,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Terminal,
                TokenKind::Identifier,
                TokenKind::Terminal,
            ]
        );
    }

    #[test]
    fn test_offsets_point_at_first_byte() {
        let tokens = lex_all("{A B=1}");

        let starts: Vec<usize> = tokens.iter().map(|t| t.start).collect();
        assert_eq!(starts, vec![0, 1, 3, 4, 5, 6]);

        for token in &tokens {
            assert_eq!(&"{A B=1}"[token.start..token.start + token.text.len()], token.text);
        }
    }

    #[test]
    fn test_whitespace_is_skipped_not_emitted() {
        let tokens = lex_all("  {  A  ,  B  }  ");

        assert_eq!(texts(&tokens), vec!["{", "A", ",", "B", "}"]);
        assert_eq!(tokens[0].start, 2);
        assert_eq!(tokens[1].start, 5);
    }

    #[test]
    fn test_whitespace_inside_string_is_preserved() {
        let tokens = lex_all("'a b  c'");

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "'a b  c'");
    }

    #[test]
    fn test_doubled_quote_stays_inside_one_string_token() {
        let tokens = lex_all("'it''s'");

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "'it''s'");
    }

    #[test]
    fn test_adjacent_strings_are_two_tokens() {
        let tokens = lex_all("'a' 'b'");

        assert_eq!(texts(&tokens), vec!["'a'", "'b'"]);
    }

    #[test]
    fn test_string_may_contain_structural_characters() {
        let tokens = lex_all("'{x}, y=z'");

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::String);
    }

    #[test]
    fn test_boolean_rule_wins_over_identifier() {
        let tokens = lex_all("true True false False");

        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Boolean; 4],
        );
    }

    #[test]
    fn test_boolean_prefix_splits_an_identifier() {
        // First match wins: the boolean rule cuts "true" out of "truex"
        // before the identifier rule gets a chance at the whole word.
        let tokens = lex_all("truex");

        assert_eq!(texts(&tokens), vec!["true", "x"]);
        assert_eq!(kinds(&tokens), vec![TokenKind::Boolean, TokenKind::Identifier]);
    }

    #[test]
    fn test_integer_rule_splits_a_dotted_number() {
        // The integer rule runs before the decimal rule, so "3.14" is an
        // integer followed by a leading-dot decimal.
        let tokens = lex_all("3.14");

        assert_eq!(texts(&tokens), vec!["3", ".14"]);
        assert_eq!(kinds(&tokens), vec![TokenKind::Integer, TokenKind::Decimal]);
    }

    #[test]
    fn test_leading_dot_decimal_is_one_token() {
        let tokens = lex_all(".5");

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Decimal);
        assert_eq!(tokens[0].text, ".5");
    }

    #[test]
    fn test_identifier_accepts_separators() {
        let tokens = lex_all("x:Grid.Row StaticResource()");

        assert_eq!(texts(&tokens), vec!["x:Grid.Row", "StaticResource()"]);
        assert_eq!(kinds(&tokens), vec![TokenKind::Identifier; 2]);
    }

    #[test]
    fn test_unmatched_character_is_a_lex_error() {
        let mut tokens = tokenize("{A @}");

        assert!(matches!(tokens.next(), Some(Ok(_))));
        assert!(matches!(tokens.next(), Some(Ok(_))));
        assert_eq!(
            tokens.next(),
            Some(Err(ParseError::Lex {
                text: "{A @}".to_string(),
                offset: 3,
            }))
        );
        assert_eq!(tokens.next(), None);
    }

    #[test]
    fn test_empty_and_blank_input_produce_no_tokens() {
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize("   \t ").count(), 0);
    }
}
