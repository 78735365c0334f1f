//! Fluent assertion API for parsed values
//!
//! Integration tests assert whole-tree shape through these helpers instead
//! of hand-unwrapping the value enum.

use crate::ast::{Attribute, Element, Value};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a value expected to be an element
pub fn assert_element(value: &Value) -> ElementAssertion<'_> {
    match value {
        Value::Element(element) => ElementAssertion {
            element,
            context: "root".to_string(),
        },
        other => panic!("root: Expected Element, found {}", other.kind_name()),
    }
}

// ============================================================================
// Element Assertions
// ============================================================================

pub struct ElementAssertion<'a> {
    element: &'a Element,
    context: String,
}

impl<'a> ElementAssertion<'a> {
    /// Assert the element's local type name
    pub fn local_name(self, expected: &str) -> Self {
        assert_eq!(
            self.element.name.local_name, expected,
            "{}: Expected local name '{}', but got '{}'",
            self.context, expected, self.element.name.local_name
        );
        self
    }

    /// Assert the element's namespace name
    pub fn namespace(self, expected: &str) -> Self {
        assert_eq!(
            self.element.name.namespace_name, expected,
            "{}: Expected namespace '{}', but got '{}'",
            self.context, expected, self.element.name.namespace_name
        );
        self
    }

    /// Assert the number of attributes, positional and named together
    pub fn attribute_count(self, expected: usize) -> Self {
        let actual = self.element.attributes.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} attributes, found {} attributes: [{}]",
            self.context,
            expected,
            actual,
            summarize_attributes(&self.element.attributes)
        );
        self
    }

    /// Assert on the value of the named attribute `name`
    pub fn named<F>(self, name: &str, assertion: F) -> Self
    where
        F: FnOnce(ValueAssertion<'a>),
    {
        let attribute = self
            .element
            .attributes
            .iter()
            .find(|attribute| attribute.name.local_name == name);

        match attribute {
            Some(attribute) => assertion(ValueAssertion {
                value: &attribute.value,
                context: format!("{}.{}", self.context, name),
            }),
            None => panic!(
                "{}: No attribute named '{}', found: [{}]",
                self.context,
                name,
                summarize_attributes(&self.element.attributes)
            ),
        }
        self
    }

    /// Assert on the value of the positional attribute at `index`, counting
    /// positional attributes only
    pub fn positional<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ValueAssertion<'a>),
    {
        let attribute = self
            .element
            .attributes
            .iter()
            .filter(|attribute| attribute.is_positional())
            .nth(index);

        match attribute {
            Some(attribute) => assertion(ValueAssertion {
                value: &attribute.value,
                context: format!("{}[{}]", self.context, index),
            }),
            None => panic!(
                "{}: No positional attribute at index {}, found: [{}]",
                self.context,
                index,
                summarize_attributes(&self.element.attributes)
            ),
        }
        self
    }
}

// ============================================================================
// Value Assertions
// ============================================================================

pub struct ValueAssertion<'a> {
    value: &'a Value,
    context: String,
}

impl<'a> ValueAssertion<'a> {
    /// Assert this value is a String with the expected content
    pub fn string(self, expected: &str) {
        match self.value {
            Value::String(actual) => assert_eq!(
                actual, expected,
                "{}: Expected string '{}', but got '{}'",
                self.context, expected, actual
            ),
            other => panic!(
                "{}: Expected String, found {}",
                self.context,
                other.kind_name()
            ),
        }
    }

    /// Assert this value is a Bool with the expected content
    pub fn bool(self, expected: bool) {
        match self.value {
            Value::Bool(actual) => assert_eq!(
                *actual, expected,
                "{}: Expected {}, but got {}",
                self.context, expected, actual
            ),
            other => panic!(
                "{}: Expected Bool, found {}",
                self.context,
                other.kind_name()
            ),
        }
    }

    /// Assert this value is an Int32 with the expected content
    pub fn int32(self, expected: i32) {
        match self.value {
            Value::Int32(actual) => assert_eq!(
                *actual, expected,
                "{}: Expected {}, but got {}",
                self.context, expected, actual
            ),
            other => panic!(
                "{}: Expected Int32, found {}",
                self.context,
                other.kind_name()
            ),
        }
    }

    /// Assert this value is a Float64 with the expected content
    pub fn float64(self, expected: f64) {
        match self.value {
            Value::Float64(actual) => assert_eq!(
                *actual, expected,
                "{}: Expected {}, but got {}",
                self.context, expected, actual
            ),
            other => panic!(
                "{}: Expected Float64, found {}",
                self.context,
                other.kind_name()
            ),
        }
    }

    /// Assert this value is a nested Element and return element assertions
    pub fn element(self) -> ElementAssertion<'a> {
        match self.value {
            Value::Element(element) => ElementAssertion {
                element,
                context: self.context,
            },
            other => panic!(
                "{}: Expected Element, found {}",
                self.context,
                other.kind_name()
            ),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Summarize attributes as "Path, Mode, <positional>"
fn summarize_attributes(attributes: &[Attribute]) -> String {
    attributes
        .iter()
        .map(|attribute| {
            if attribute.is_positional() {
                "<positional>".to_string()
            } else {
                attribute.name.local_name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Tests
// ============================================================================
