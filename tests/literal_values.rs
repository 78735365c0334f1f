//! Tests for the non-grammar half of `parse`: the escape marker, plain-text
//! passthrough, and the coercion of literal tokens into typed values.

use markex::{parse, Namespaces, ParseError, Value};
use rstest::rstest;

fn parse_default(text: &str) -> Result<Value, ParseError> {
    parse(text, &Namespaces::new())
}

mod passthrough {
    use super::*;

    #[rstest]
    #[case("plain text")]
    #[case("Name")]
    #[case("")]
    #[case("  spaced  ")]
    #[case("a {brace} inside")]
    #[case("{unclosed")]
    #[case("unopened}")]
    fn test_non_extension_text_is_returned_verbatim(#[case] text: &str) {
        assert_eq!(
            parse_default(text).unwrap(),
            Value::String(text.to_string())
        );
    }

    #[test]
    fn test_escape_marker_is_stripped_and_the_rest_kept() {
        assert_eq!(
            parse_default("{}{Binding Path=Name}").unwrap(),
            Value::String("{Binding Path=Name}".to_string())
        );
    }

    #[test]
    fn test_escape_marker_applies_to_plain_text_too() {
        assert_eq!(
            parse_default("{}no braces here").unwrap(),
            Value::String("no braces here".to_string())
        );
    }

    #[test]
    fn test_escape_marker_alone_is_the_empty_string() {
        assert_eq!(parse_default("{}").unwrap(), Value::String(String::new()));
    }

    #[test]
    fn test_escape_marker_must_lead() {
        // A marker after leading whitespace is not a marker; the text is not
        // extension-shaped either, so it passes through whole.
        assert_eq!(
            parse_default(" {}x").unwrap(),
            Value::String(" {}x".to_string())
        );
    }
}

mod strings {
    use super::*;

    #[rstest]
    #[case("{A V='hi'}", "hi")]
    #[case("{A V=''}", "")]
    #[case("{A V='it''s'}", "it's")]
    #[case("{A V=''''}", "'")]
    #[case("{A V='a, b=c {d}'}", "a, b=c {d}")]
    #[case("{A V='  padded  '}", "  padded  ")]
    fn test_quoted_string_values(#[case] text: &str, #[case] expected: &str) {
        let value = parse_default(text).unwrap();
        let element = value.as_element().unwrap();

        assert_eq!(
            element.attribute("V").unwrap().value,
            Value::String(expected.to_string())
        );
    }
}

mod booleans {
    use super::*;

    #[rstest]
    #[case("{A V=true}", true)]
    #[case("{A V=True}", true)]
    #[case("{A V=false}", false)]
    #[case("{A V=False}", false)]
    fn test_boolean_values(#[case] text: &str, #[case] expected: bool) {
        let value = parse_default(text).unwrap();
        let element = value.as_element().unwrap();

        assert_eq!(element.attribute("V").unwrap().value, Value::Bool(expected));
    }

    #[test]
    fn test_all_caps_boolean_is_an_identifier_not_a_boolean() {
        // "TRUE" never matches the boolean rule, so it reaches the value as
        // an identifier and stays a string.
        let value = parse_default("{A V=TRUE}").unwrap();
        let element = value.as_element().unwrap();

        assert_eq!(
            element.attribute("V").unwrap().value,
            Value::String("TRUE".to_string())
        );
    }
}

mod numbers {
    use super::*;

    #[rstest]
    #[case("{A V=0}", 0)]
    #[case("{A V=42}", 42)]
    #[case("{A V=2147483647}", i32::MAX)]
    fn test_integer_values(#[case] text: &str, #[case] expected: i32) {
        let value = parse_default(text).unwrap();
        let element = value.as_element().unwrap();

        assert_eq!(element.attribute("V").unwrap().value, Value::Int32(expected));
    }

    #[rstest]
    #[case("{A V=.5}", 0.5)]
    #[case("{A V=.125}", 0.125)]
    fn test_decimal_values(#[case] text: &str, #[case] expected: f64) {
        let value = parse_default(text).unwrap();
        let element = value.as_element().unwrap();

        assert_eq!(
            element.attribute("V").unwrap().value,
            Value::Float64(expected)
        );
    }

    #[test]
    fn test_integer_overflow_is_a_coercion_error() {
        let error = parse_default("{A V=2147483648}").unwrap_err();

        match error {
            ParseError::Coercion { text, token } => {
                assert_eq!(text, "{A V=2147483648}");
                assert_eq!(token.text, "2147483648");
                assert_eq!(token.start, 5);
            }
            other => panic!("expected a coercion error, got {:?}", other),
        }
    }

    #[test]
    fn test_coercion_error_message_names_the_token() {
        let error = parse_default("{A V=2147483648}").unwrap_err();

        assert_eq!(
            error.to_string(),
            "Can't parse \"{A V=2147483648}\", \"2147483648\" is not a valid integer literal at index 5"
        );
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_literal_value_round_trips_through_json() {
        let value = parse_default("{A S='x', B=true, I=7, F=.5}").unwrap();

        let json = serde_json::to_string(&value).unwrap();
        let restored: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value, restored);
    }

    #[test]
    fn test_plain_string_serializes_as_the_string_variant() {
        let value = parse_default("plain").unwrap();

        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            "{\"String\":\"plain\"}"
        );
    }
}
