//! # markex
//!
//! A parser for markup extension expressions: the `{...}` mini-language
//! embedded inside attribute values of declarative UI markup, as in
//! `{Binding Path=Name, Mode=TwoWay}`.
//!
//! [`parse`] takes one attribute value and a read-only namespace table and
//! answers a [`Value`]: a literal (string, bool, i32, f64) or an [`Element`]
//! tree of positional and named attributes, nested to any depth. Text that
//! is not extension-shaped passes through as a string, and the `{}` escape
//! marker forces that even for text starting with a brace:
//!
//!     {Binding Path=Name}   element "Binding" with Path = "Name"
//!     {}{Binding}           the literal string "{Binding}"
//!     plain text            the literal string "plain text"
//!
//! Failures are [`ParseError`]s carrying the full input, the offending
//! token, and its byte offset.

pub mod ast;
pub mod cursor;
pub mod error;
pub mod lexer;
pub mod name;
pub mod parser;
pub mod testing;

pub use ast::{Attribute, Element, Value};
pub use error::ParseError;
pub use name::{Namespaces, QualifiedName};
pub use parser::parse;
