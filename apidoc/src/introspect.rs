//! Resolution of a field's schema type, format, and example value.
//!
//! Classification always looks through pointer layers first, so
//! `Option<Box<u32>>` resolves exactly like `u32`.

use serde_json::{Number, Value};
use tracing::debug;

use crate::model::{EnumDescriptor, ObjectDescriptor, TypeDescriptor};

/// Schema-relevant shape of a descriptor once pointers are stripped.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    /// An inline scalar or temporal value.
    Leaf {
        schema_type: Option<&'static str>,
        format: Option<&'static str>,
    },
    /// A sequence of the given element.
    Array(&'a TypeDescriptor),
    /// A nested object that is referenced (or flattened).
    Object(&'static ObjectDescriptor),
    /// A string enumeration.
    Enum(&'static EnumDescriptor),
    /// No serialized form; the field is dropped.
    Ignored(&'static str),
}

/// Classifies a descriptor.
pub fn classify(descriptor: &TypeDescriptor) -> Shape<'_> {
    match descriptor {
        TypeDescriptor::Pointer(inner) => classify(inner),
        TypeDescriptor::Primitive(primitive) => Shape::Leaf {
            schema_type: primitive.schema_type(),
            format: None,
        },
        TypeDescriptor::Temporal(temporal) => {
            let (schema_type, format) = temporal.schema_type();
            Shape::Leaf {
                schema_type: Some(schema_type),
                format,
            }
        }
        TypeDescriptor::Array(element) => Shape::Array(element),
        TypeDescriptor::Object(object) => Shape::Object(object),
        TypeDescriptor::Enum(enumeration) => Shape::Enum(enumeration),
        TypeDescriptor::Ignored(kind) => Shape::Ignored(kind),
    }
}

/// The normalized `(type, format)` pair for a descriptor.
pub fn schema_type(descriptor: &TypeDescriptor) -> (Option<&'static str>, Option<&'static str>) {
    match classify(descriptor) {
        Shape::Leaf {
            schema_type,
            format,
        } => (schema_type, format),
        Shape::Array(_) => (Some("array"), None),
        Shape::Object(_) => (Some("object"), None),
        Shape::Enum(_) => (Some("string"), None),
        Shape::Ignored(_) => (None, None),
    }
}

/// Parses raw example text according to a resolved schema type.
///
/// Never fails: text that does not parse as the numeric type degrades to that
/// type's zero value, and anything other than the literal `true` is `false`
/// for booleans.
pub fn parse_example(schema_type: Option<&str>, raw: &str) -> Value {
    match schema_type {
        Some("integer") => match raw.parse::<i64>() {
            Ok(number) => Value::from(number),
            Err(_) => {
                debug!(raw, "Example is not an integer, substituting 0");
                Value::from(0)
            }
        },
        Some("boolean") => Value::Bool(raw == "true"),
        Some("number") => match raw.parse::<f64>().ok().and_then(Number::from_f64) {
            Some(number) => Value::Number(number),
            None => {
                debug!(raw, "Example is not a finite number, substituting 0.0");
                Value::from(0.0)
            }
        },
        _ => Value::String(raw.to_string()),
    }
}

/// The example synthesized for a field without one.
///
/// `0`, `false`, `0.0`, and `""` for the scalar types; nothing for objects,
/// date-times, dates, maps, and untyped values.
pub fn zero_example(descriptor: &TypeDescriptor) -> Option<Value> {
    match classify(descriptor) {
        Shape::Leaf {
            schema_type,
            format,
        } => match (schema_type, format) {
            (Some("integer"), _) => Some(Value::from(0)),
            (Some("boolean"), _) => Some(Value::Bool(false)),
            (Some("number"), _) => Some(Value::from(0.0)),
            (Some("string"), None) => Some(Value::String(String::new())),
            _ => None,
        },
        _ => None,
    }
}

/// The example for a value of `descriptor`, from raw text when present.
pub fn example(raw: Option<&str>, descriptor: &TypeDescriptor) -> Option<Value> {
    match raw {
        Some(raw) => Some(parse_example(schema_type(descriptor).0, raw)),
        None => zero_example(descriptor),
    }
}

/// Parses `|`-separated enum values according to the descriptor's type.
pub fn enum_values(raw: &str, descriptor: &TypeDescriptor) -> Vec<Value> {
    let (schema_type, _) = schema_type(descriptor);
    raw.split('|')
        .filter(|value| !value.is_empty())
        .map(|value| parse_example(schema_type, value))
        .collect()
}
