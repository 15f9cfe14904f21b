//! Loosely-typed configuration values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest integral magnitude an `f64` holds exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A value stored in a configuration snapshot.
///
/// Sheet cells and fallback files are loosely typed, so values are kept in this closed
/// variant and converted on read (see [`crate::coerce`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum ConfigValue {
    /// Explicit null or empty cell.
    #[default]
    Null,
    /// Text cell.
    Text(String),
    /// Numeric cell.
    Number(f64),
    /// Boolean cell.
    Flag(bool),
}

impl ConfigValue {
    /// Whether this value is [`ConfigValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Canonical textual form, `None` for null.
    pub fn as_text(&self) -> Option<String> {
        match self {
            ConfigValue::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Build from a JSON value. Arrays and objects are kept as their JSON text.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Flag(b),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(ConfigValue::Number)
                .unwrap_or_else(|| ConfigValue::Text(n.to_string())),
            serde_json::Value::String(s) => ConfigValue::Text(s),
            nested => ConfigValue::Text(nested.to_string()),
        }
    }

    /// Convert to a JSON value.
    ///
    /// Integral numbers are written without a fractional part. Returns `None` for
    /// NaN and infinities, which JSON cannot represent.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            ConfigValue::Null => Some(serde_json::Value::Null),
            ConfigValue::Flag(b) => Some(serde_json::Value::Bool(*b)),
            ConfigValue::Text(s) => Some(serde_json::Value::String(s.clone())),
            ConfigValue::Number(n) => {
                if !n.is_finite() {
                    None
                } else if is_exact_integer(*n) {
                    Some(serde_json::Value::from(*n as i64))
                } else {
                    serde_json::Number::from_f64(*n).map(serde_json::Value::Number)
                }
            }
        }
    }
}

fn is_exact_integer(n: f64) -> bool {
    n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::Text(s) => write!(f, "{}", s),
            ConfigValue::Number(n) if is_exact_integer(*n) => write!(f, "{}", *n as i64),
            ConfigValue::Number(n) => write!(f, "{}", n),
            ConfigValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Text(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Text(s)
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Number(n)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Number(n as f64)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Flag(b)
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(ConfigValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_integral_number() {
        assert_eq!(ConfigValue::Number(123.0).to_string(), "123");
        assert_eq!(ConfigValue::Number(-4.0).to_string(), "-4");
        assert_eq!(ConfigValue::Number(45.5).to_string(), "45.5");
    }

    #[test]
    fn test_display_flag_and_text() {
        assert_eq!(ConfigValue::Flag(true).to_string(), "true");
        assert_eq!(ConfigValue::from("apple").to_string(), "apple");
    }

    #[test]
    fn test_as_text_null() {
        assert_eq!(ConfigValue::Null.as_text(), None);
        assert_eq!(ConfigValue::Number(1.5).as_text(), Some("1.5".to_string()));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(ConfigValue::from_json(json!(null)), ConfigValue::Null);
        assert_eq!(ConfigValue::from_json(json!(123)), ConfigValue::Number(123.0));
        assert_eq!(ConfigValue::from_json(json!(true)), ConfigValue::Flag(true));
        assert_eq!(
            ConfigValue::from_json(json!([1, 2])),
            ConfigValue::Text("[1,2]".to_string())
        );
    }

    #[test]
    fn test_to_json_integral_number_has_no_fraction() {
        let value = ConfigValue::Number(789.0).to_json().unwrap();
        assert_eq!(value.to_string(), "789");
    }

    #[test]
    fn test_to_json_rejects_non_finite() {
        assert!(ConfigValue::Number(f64::NAN).to_json().is_none());
        assert!(ConfigValue::Number(f64::INFINITY).to_json().is_none());
    }

    #[test]
    fn test_from_option() {
        let none: Option<&str> = None;
        assert_eq!(ConfigValue::from(none), ConfigValue::Null);
        assert_eq!(ConfigValue::from(Some(true)), ConfigValue::Flag(true));
    }
}
