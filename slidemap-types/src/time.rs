use serde::{Deserialize, Serialize};
use std::fmt;

/// A time value attached to a marker.
///
/// Time values are opaque comparables: they are compared with strict equality
/// on the raw value and never normalized. `Text("1")` and `Number(1.0)` are
/// different values, and two text values that name the same instant in
/// different time zones are different values too.
///
/// # Examples
///
/// ```
/// use slidemap_types::time::TimeValue;
///
/// assert_eq!(TimeValue::from("2020-01-01"), TimeValue::from("2020-01-01"));
/// assert_ne!(TimeValue::from("1"), TimeValue::from(1.0));
/// assert_eq!(TimeValue::from(1_577_872_800_000.0).to_string(), "1577872800000");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// Numeric timestamp (epoch seconds or milliseconds, caller's choice)
    Number(f64),
    /// Textual timestamp, usually ISO 8601
    Text(String),
}

impl TimeValue {
    /// Returns the textual form if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TimeValue::Text(text) => Some(text),
            TimeValue::Number(_) => None,
        }
    }

    /// Returns the numeric form if this is a number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TimeValue::Number(n) => Some(*n),
            TimeValue::Text(_) => None,
        }
    }

    /// Convert a JSON value into a time value.
    ///
    /// Only non-empty strings and numbers qualify. `null`, `""`, booleans,
    /// arrays and objects count as "no time value".
    ///
    /// ```
    /// use slidemap_types::time::TimeValue;
    /// use serde_json::json;
    ///
    /// assert_eq!(TimeValue::from_json(&json!("T0")), Some(TimeValue::from("T0")));
    /// assert_eq!(TimeValue::from_json(&json!(42)), Some(TimeValue::from(42.0)));
    /// assert_eq!(TimeValue::from_json(&json!("")), None);
    /// assert_eq!(TimeValue::from_json(&json!(null)), None);
    /// ```
    #[cfg(feature = "json")]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(text) if !text.is_empty() => {
                Some(TimeValue::Text(text.clone()))
            }
            serde_json::Value::Number(n) => n.as_f64().map(TimeValue::Number),
            _ => None,
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeValue::Text(text) => f.write_str(text),
            // Integral numbers print without a trailing ".0"
            TimeValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{:.0}", n)
            }
            TimeValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for TimeValue {
    fn from(value: &str) -> Self {
        TimeValue::Text(value.to_string())
    }
}

impl From<String> for TimeValue {
    fn from(value: String) -> Self {
        TimeValue::Text(value)
    }
}

impl From<f64> for TimeValue {
    fn from(value: f64) -> Self {
        TimeValue::Number(value)
    }
}

impl From<i64> for TimeValue {
    fn from(value: i64) -> Self {
        TimeValue::Number(value as f64)
    }
}
