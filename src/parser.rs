//! Recursive-descent parser for markup extension expressions
//!
//! The grammar, LL(1) over the token cursor:
//!
//!     Element           -> '{' Identifier AttributeList '}'
//!     AttributeList     -> Attribute AttributeListTail | e      (e when next is '}')
//!     AttributeListTail -> ',' Attribute AttributeListTail | e  (e when next is '}')
//!     Attribute         -> Identifier NamedValueSuffix | Value
//!     NamedValueSuffix  -> '=' Value | e    (e: the identifier is the value)
//!     Value             -> Element | Identifier | String | Boolean | Integer | Decimal
//!
//! Each production is one method. There is no backtracking: an identifier in
//! attribute position is consumed first and becomes either the attribute's
//! name or, when no `=` follows, its positional value. The first violated
//! expectation unwinds as an error; there is no recovery.

use crate::ast::{Attribute, Element, Value};
use crate::cursor::TokenCursor;
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use crate::name::{Namespaces, QualifiedName};

/// Two-character prefix that escapes text which would otherwise read as an
/// extension
const ESCAPE_MARKER: &str = "{}";

/// Parse one attribute value.
///
/// Text carrying the escape marker is returned as a string with the marker
/// stripped, even when the remainder looks like an extension. Text shaped
/// like `{...}` after trimming is parsed as an extension, over the full
/// untrimmed text. Anything else is returned verbatim as a string.
pub fn parse(text: &str, namespaces: &Namespaces) -> Result<Value, ParseError> {
    if let Some(escaped) = text.strip_prefix(ESCAPE_MARKER) {
        return Ok(Value::String(escaped.to_string()));
    }

    if is_extension(text) {
        return ExtensionParser::new(text, namespaces).parse();
    }

    Ok(Value::String(text.to_string()))
}

/// An extension starts with `{` and ends with `}`, ignoring surrounding
/// whitespace
fn is_extension(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.starts_with('{') && trimmed.ends_with('}')
}

struct ExtensionParser<'a> {
    text: &'a str,
    namespaces: &'a Namespaces,
    tokens: TokenCursor<'a>,
}

impl<'a> ExtensionParser<'a> {
    fn new(text: &'a str, namespaces: &'a Namespaces) -> Self {
        Self {
            text,
            namespaces,
            tokens: TokenCursor::new(text),
        }
    }

    fn parse(mut self) -> Result<Value, ParseError> {
        let root = self.match_element()?;

        if !self.tokens.is_empty() {
            let trailing = self.tokens.peek()?;
            return Err(ParseError::Syntax {
                text: self.text.to_string(),
                expected: "end of stream".to_string(),
                found: trailing.text.clone(),
                offset: trailing.start,
            });
        }

        Ok(Value::Element(root))
    }

    // Element -> '{' Identifier AttributeList '}'
    fn match_element(&mut self) -> Result<Element, ParseError> {
        self.match_terminal("{")?;
        let type_name = self.match_identifier()?;
        let attributes = self.match_attribute_list()?;
        self.match_terminal("}")?;

        Ok(Element::new(self.element_name(&type_name), attributes))
    }

    // AttributeList -> Attribute AttributeListTail | e
    fn match_attribute_list(&mut self) -> Result<Vec<Attribute>, ParseError> {
        let mut attributes = Vec::new();

        if self.tokens.peek()?.text != "}" {
            attributes.push(self.match_attribute()?);
            self.match_attribute_list_tail(&mut attributes)?;
        }

        Ok(attributes)
    }

    // AttributeListTail -> ',' Attribute AttributeListTail | e
    fn match_attribute_list_tail(
        &mut self,
        attributes: &mut Vec<Attribute>,
    ) -> Result<(), ParseError> {
        while self.tokens.peek()?.text != "}" {
            self.match_terminal(",")?;
            attributes.push(self.match_attribute()?);
        }

        Ok(())
    }

    // Attribute -> Identifier NamedValueSuffix | Value
    //
    // An identifier is consumed before it is known whether it names the
    // attribute or is itself a positional value; when no `=` follows, the
    // consumed text is reused as the value without re-lexing.
    fn match_attribute(&mut self) -> Result<Attribute, ParseError> {
        if self.tokens.peek()?.kind == TokenKind::Identifier {
            let identifier = self.match_identifier()?;

            return Ok(match self.match_named_value()? {
                Some(value) => Attribute::new(QualifiedName::unqualified(identifier), value),
                None => Attribute::positional(Value::String(identifier)),
            });
        }

        Ok(Attribute::positional(self.match_value()?))
    }

    // NamedValueSuffix -> '=' Value | e
    fn match_named_value(&mut self) -> Result<Option<Value>, ParseError> {
        let token = self.tokens.peek()?;
        if token.kind != TokenKind::Terminal || token.text != "=" {
            return Ok(None);
        }

        self.match_terminal("=")?;
        self.match_value().map(Some)
    }

    // Value -> Element | Identifier | String | Boolean | Integer | Decimal
    //
    // Any terminal in value position is taken as the start of a nested
    // element; match_element reports the mismatch when it is not `{`.
    fn match_value(&mut self) -> Result<Value, ParseError> {
        if self.tokens.peek()?.kind == TokenKind::Terminal {
            return self.match_element().map(Value::Element);
        }

        let token = self.tokens.pop()?;
        coerce_literal(self.text, token)
    }

    fn match_identifier(&mut self) -> Result<String, ParseError> {
        let token = self.tokens.pop()?;

        if token.kind != TokenKind::Identifier {
            return Err(self.syntax_error("identifier", &token));
        }

        Ok(token.text)
    }

    fn match_terminal(&mut self, terminal: &str) -> Result<(), ParseError> {
        let token = self.tokens.pop()?;

        if token.kind != TokenKind::Terminal || token.text != terminal {
            return Err(self.syntax_error(&format!("\"{}\"", terminal), &token));
        }

        Ok(())
    }

    /// Split the element's type identifier at the first `:` and resolve the
    /// prefix, or the empty prefix when there is none, through the namespace
    /// table. The lookup answers the empty namespace for unregistered
    /// prefixes; it never fails the parse.
    fn element_name(&self, type_full_name: &str) -> QualifiedName {
        let (prefix, local_name) = match type_full_name.split_once(':') {
            Some((prefix, local_name)) => (prefix, local_name),
            None => ("", type_full_name),
        };

        QualifiedName::new(
            local_name.to_string(),
            self.namespaces.get(prefix).to_string(),
        )
    }

    fn syntax_error(&self, expected: &str, found: &Token) -> ParseError {
        ParseError::Syntax {
            text: self.text.to_string(),
            expected: expected.to_string(),
            found: found.text.clone(),
            offset: found.start,
        }
    }
}

/// Convert a literal token to its typed value.
///
/// String tokens lose their quote delimiters and collapse doubled quotes;
/// booleans compare case-insensitively against `true` and `false`; integers
/// parse as `i32` and decimals as `f64`. `text` is the full expression,
/// carried into errors.
fn coerce_literal(text: &str, token: Token) -> Result<Value, ParseError> {
    match token.kind {
        TokenKind::Identifier => Ok(Value::String(token.text)),
        TokenKind::String => Ok(Value::String(unescape_string(&token.text))),
        TokenKind::Boolean => match token.text.to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(coercion_error(text, token)),
        },
        TokenKind::Integer => match token.text.parse::<i32>() {
            Ok(value) => Ok(Value::Int32(value)),
            Err(_) => Err(coercion_error(text, token)),
        },
        TokenKind::Decimal => match token.text.parse::<f64>() {
            Ok(value) => Ok(Value::Float64(value)),
            Err(_) => Err(coercion_error(text, token)),
        },
        TokenKind::Terminal => Err(ParseError::Syntax {
            text: text.to_string(),
            expected: "value".to_string(),
            found: token.text,
            offset: token.start,
        }),
    }
}

/// Strip the quote delimiters and collapse doubled quotes. The string rule
/// guarantees both delimiters are present.
fn unescape_string(quoted: &str) -> String {
    quoted[1..quoted.len() - 1].replace("''", "'")
}

fn coercion_error(text: &str, token: Token) -> ParseError {
    ParseError::Coercion {
        text: text.to_string(),
        token,
    }
}
