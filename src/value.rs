//! src/value.rs
//! Loosely typed arguments received from the script runtime.

use std::borrow::Cow;
use std::fmt;

/// A value passed across the host boundary.
///
/// Log functions never reject their arguments. Each accessor below coerces
/// whatever the host passed into the shape the emitter needs.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HostValue {
    /// Absent argument or explicit nil.
    #[default]
    Nil,
    /// Boolean.
    Boolean(bool),
    /// Integer number.
    Integer(i64),
    /// Floating point number.
    Number(f64),
    /// String.
    String(String),
}

impl HostValue {
    /// Coerces a source-file argument.
    ///
    /// Strings pass through, numbers are stringified, anything else becomes
    /// the empty string.
    pub fn as_file(&self) -> Cow<'_, str> {
        match self {
            Self::String(text) => Cow::Borrowed(text),
            Self::Integer(value) => Cow::Owned(value.to_string()),
            Self::Number(value) => Cow::Owned(number_text(*value)),
            Self::Nil | Self::Boolean(_) => Cow::Borrowed(""),
        }
    }

    /// Coerces a line-number argument.
    ///
    /// Floats truncate toward zero and saturate at the `i64` range. Strings
    /// holding a number are parsed. Anything else becomes `0`.
    pub fn as_line(&self) -> i64 {
        match self {
            Self::Integer(value) => *value,
            Self::Number(value) => truncate(*value),
            Self::String(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().map(truncate))
                    .unwrap_or(0)
            }
            Self::Nil | Self::Boolean(_) => 0,
        }
    }

    /// Coerces a message argument.
    ///
    /// Strings pass through; every other value uses its textual form.
    pub fn as_message(&self) -> Cow<'_, str> {
        match self {
            Self::String(text) => Cow::Borrowed(text),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Number(value) => f.write_str(&number_text(*value)),
            Self::String(text) => f.write_str(text),
        }
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for HostValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

// Numbers print the way Lua 5.1 `tostring` does, with C's `%.14g`.
const SIGNIFICANT_DIGITS: i32 = 14;

fn number_text(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    let precision = (SIGNIFICANT_DIGITS - 1) as usize;
    let scientific = format!("{value:.precision$e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
    } else {
        let decimals = usize::try_from(SIGNIFICANT_DIGITS - 1 - exponent).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_owned()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn truncate(value: f64) -> i64 {
    // `as` truncates toward zero, saturates, and maps NaN to 0.
    value as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_coercion() {
        assert_eq!(HostValue::from("a/b.lua").as_file(), "a/b.lua");
        assert_eq!(HostValue::Integer(42).as_file(), "42");
        assert_eq!(HostValue::Number(1.5).as_file(), "1.5");
        assert_eq!(HostValue::Nil.as_file(), "");
        assert_eq!(HostValue::Boolean(true).as_file(), "");
    }

    #[test]
    fn line_coercion() {
        assert_eq!(HostValue::Integer(-7).as_line(), -7);
        assert_eq!(HostValue::Number(12.9).as_line(), 12);
        assert_eq!(HostValue::Number(-12.9).as_line(), -12);
        assert_eq!(HostValue::Number(f64::NAN).as_line(), 0);
        assert_eq!(HostValue::Number(f64::INFINITY).as_line(), i64::MAX);
        assert_eq!(HostValue::from(" 31 ").as_line(), 31);
        assert_eq!(HostValue::from("8.75").as_line(), 8);
        assert_eq!(HostValue::from("ten").as_line(), 0);
        assert_eq!(HostValue::Nil.as_line(), 0);
        assert_eq!(HostValue::Boolean(true).as_line(), 0);
    }

    #[test]
    fn message_coercion() {
        assert_eq!(HostValue::from("hello").as_message(), "hello");
        assert_eq!(HostValue::Integer(3).as_message(), "3");
        assert_eq!(HostValue::Number(2.0).as_message(), "2");
        assert_eq!(HostValue::Number(0.25).as_message(), "0.25");
        assert_eq!(HostValue::Boolean(false).as_message(), "false");
        assert_eq!(HostValue::Nil.as_message(), "nil");
    }

    #[test]
    fn numbers_render_like_lua_tostring() {
        let text = |value: f64| HostValue::Number(value).to_string();
        assert_eq!(text(0.1 + 0.2), "0.3");
        assert_eq!(text(-0.5), "-0.5");
        assert_eq!(text(0.0), "0");
        assert_eq!(text(123_456.789), "123456.789");
        assert_eq!(text(1e14), "1e+14");
        assert_eq!(text(123_456_789_012_344.0), "1.2345678901234e+14");
        assert_eq!(text(0.0001), "0.0001");
        assert_eq!(text(0.000_012_5), "1.25e-05");
        assert_eq!(text(f64::INFINITY), "inf");
        assert_eq!(text(f64::NEG_INFINITY), "-inf");
        assert_eq!(text(f64::NAN), "nan");
    }

    #[test]
    fn option_maps_none_to_nil() {
        assert_eq!(HostValue::from(None::<i64>), HostValue::Nil);
        assert_eq!(HostValue::from(Some(5_i64)), HostValue::Integer(5));
    }
}
