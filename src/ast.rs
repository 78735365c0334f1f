//! Syntax tree produced by the extension parser
//!
//! A parsed attribute value is a [`Value`]: either a literal leaf or an
//! [`Element`] whose attributes may nest further elements, to any depth the
//! input provides. Nodes are immutable once built.

use std::fmt;

use crate::name::QualifiedName;

/// A parsed value
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    /// A nested `{...}` construct
    Element(Element),
    String(String),
    Bool(bool),
    Int32(i32),
    Float64(f64),
}

impl Value {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Value::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    /// The variant name, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Element(_) => "Element",
            Value::String(_) => "String",
            Value::Bool(_) => "Bool",
            Value::Int32(_) => "Int32",
            Value::Float64(_) => "Float64",
        }
    }

    /// Render the tree as pretty-printed JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Element(element) => element.fmt(f),
            Value::String(text) => write!(f, "'{}'", text.replace('\'', "''")),
            Value::Bool(value) => write!(f, "{}", value),
            Value::Int32(value) => write!(f, "{}", value),
            Value::Float64(value) => write!(f, "{}", value),
        }
    }
}

/// One `{Type ...}` construct
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Element {
    pub name: QualifiedName,
    pub attributes: Vec<Attribute>,
}

impl Element {
    pub fn new(name: QualifiedName, attributes: Vec<Attribute>) -> Self {
        Self { name, attributes }
    }

    /// The first attribute carrying `local_name`, ignoring namespaces
    pub fn attribute(&self, local_name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name.local_name == local_name)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}", self.name)?;
        for (index, attribute) in self.attributes.iter().enumerate() {
            if index == 0 {
                write!(f, " {}", attribute)?;
            } else {
                write!(f, ", {}", attribute)?;
            }
        }
        write!(f, "}}")
    }
}

/// A name/value pair inside an element; an empty name marks a positional
/// attribute, whose meaning is given by its position alone
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Attribute {
    pub name: QualifiedName,
    pub value: Value,
}

impl Attribute {
    pub fn new(name: QualifiedName, value: Value) -> Self {
        Self { name, value }
    }

    pub fn positional(value: Value) -> Self {
        Self {
            name: QualifiedName::empty(),
            value,
        }
    }

    pub fn is_positional(&self) -> bool {
        self.name.is_empty()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_positional() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{}={}", self.name, self.value)
        }
    }
}
