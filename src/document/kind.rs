//! Value classification
//!
//! Classifies arbitrary document values into a closed set of semantic
//! kinds. Precedence: arrays classify as `Array` before any object or
//! numeric reading; integral numbers classify as `Integer`, all other
//! numbers as `Number`.

use serde_json::Value;

/// Semantic kind of a document value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Object,
    Array,
    Integer,
    Number,
    String,
    Boolean,
    Null,
    /// The value is absent altogether
    Undefined,
}

impl ValueKind {
    /// Classifies a present value.
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    ValueKind::Integer
                } else {
                    ValueKind::Number
                }
            }
            Value::String(_) => ValueKind::String,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Null => ValueKind::Null,
        }
    }

    /// Classifies a possibly-absent value.
    pub fn of(value: Option<&Value>) -> Self {
        value.map(Self::classify).unwrap_or(ValueKind::Undefined)
    }

    /// Kind name for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::Integer => "integer",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::Null => "null",
            ValueKind::Undefined => "undefined",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
