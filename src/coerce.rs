//! Best-effort conversion of stored values to concrete types.
//!
//! Every conversion is total: an absent key, a null value, or a value that does not
//! parse as the requested type all resolve to the caller-supplied default.
//!
//! | Target | Accepted input |
//! |--------|----------------|
//! | `String` | any non-null value, via its canonical text |
//! | `i32` / `i64` | anything that parses as `f64`, rounded half-up |
//! | `f32` / `f64` | decimal or scientific notation |
//! | `bool` | `"true"` / `"false"`, case-insensitive, nothing else |

use crate::value::ConfigValue;

/// Conversion from a stored [`ConfigValue`].
pub trait FromConfigValue: Sized {
    /// Convert a non-null value, or `None` when it does not parse.
    fn from_config_value(value: &ConfigValue) -> Option<Self>;
}

/// Coerce an optional raw value, falling back to `default`.
pub fn coerce<T: FromConfigValue>(raw: Option<&ConfigValue>, default: Option<T>) -> Option<T> {
    match raw {
        None | Some(ConfigValue::Null) => default,
        Some(value) => T::from_config_value(value).or(default),
    }
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        value.as_text()
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Flag(b) => Some(*b),
            ConfigValue::Text(s) => {
                if s.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl FromConfigValue for f64 {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Number(n) => Some(*n),
            ConfigValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl FromConfigValue for f32 {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Number(n) => Some(*n as f32),
            ConfigValue::Text(s) => s.trim().parse::<f32>().ok(),
            _ => None,
        }
    }
}

impl FromConfigValue for i64 {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        let rounded = round_half_up(f64::from_config_value(value)?)?;
        // i64::MAX is not representable as f64; 2^63 is the first value out of range.
        if rounded >= -9_223_372_036_854_775_808.0 && rounded < 9_223_372_036_854_775_808.0 {
            Some(rounded as i64)
        } else {
            None
        }
    }
}

impl FromConfigValue for i32 {
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        let rounded = round_half_up(f64::from_config_value(value)?)?;
        if rounded >= i32::MIN as f64 && rounded <= i32::MAX as f64 {
            Some(rounded as i32)
        } else {
            None
        }
    }
}

/// Round to the nearest integer, ties toward positive infinity.
fn round_half_up(n: f64) -> Option<f64> {
    if n.is_finite() {
        Some((n + 0.5).floor())
    } else {
        None
    }
}
