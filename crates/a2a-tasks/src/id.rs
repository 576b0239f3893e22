//! Identifiers — JSON-RPC request ids and the id-generation capability.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A JSON-RPC request identifier, either a string or an integer.
///
/// An absent id is modelled as `Option<StringOrInt>::None` and encodes as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum StringOrInt {
    String(String),
    Int(i64),
}

impl From<String> for StringOrInt {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for StringOrInt {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for StringOrInt {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl std::fmt::Display for StringOrInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StringOrInt::String(s) => f.write_str(s),
            StringOrInt::Int(i) => write!(f, "{i}"),
        }
    }
}

/// Source of opaque identifiers for requests, tasks and sessions.
///
/// Implementations only promise a non-empty string that is unique with
/// overwhelming probability; callers must not parse it.
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> String;
}

/// Default generator backed by random UUID v4 values.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate_id(&self) -> String {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_or_int_wire_shape() {
        assert_eq!(
            serde_json::to_string(&StringOrInt::from("r1")).unwrap(),
            r#""r1""#
        );
        assert_eq!(serde_json::to_string(&StringOrInt::Int(7)).unwrap(), "7");

        let parsed: Option<StringOrInt> = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, None);
        let parsed: StringOrInt = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, StringOrInt::Int(42));
    }

    #[test]
    fn test_generators() {
        let a = UuidGenerator.generate_id();
        let b = UuidGenerator.generate_id();
        assert!(!a.is_empty());
        assert_ne!(a, b);

        let fixed = || "fixed-id".to_string();
        assert_eq!(fixed.generate_id(), "fixed-id");
    }
}
