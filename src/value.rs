//! Dynamically shaped response values.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use serde::Serialize;

use crate::error::ProviderError;

/// A single value of a flattened response or of the output variables.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Number(f64),
    String(String),

    /// Unix timestamp in seconds.
    Timestamp(i64),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Integral interpretation, truncating fractional numbers.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Null => None,
            Self::Number(number) => truncate(*number),
            Self::String(string) => {
                let string = string.trim();
                string.parse().ok().or_else(|| string.parse().ok().and_then(truncate))
            }
            Self::Timestamp(timestamp) => Some(*timestamp),
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Number(number) => Some(*number),
            Self::String(string) => string.trim().parse().ok(),
            #[expect(clippy::cast_precision_loss)]
            Self::Timestamp(timestamp) => Some(*timestamp as f64),
        }
    }
}

#[expect(clippy::cast_possible_truncation)]
fn truncate(number: f64) -> Option<i64> {
    number.is_finite().then(|| number.trunc() as i64)
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Number(number) => Display::fmt(number, f),
            Self::String(string) => f.write_str(string),
            Self::Timestamp(timestamp) => Display::fmt(timestamp, f),
        }
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Self {
        Self::String(string.to_owned())
    }
}

/// Flat string-keyed map of values, sorted by key.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Serialize, derive_more::Deref, derive_more::DerefMut)]
pub struct ValueMap(BTreeMap<String, Value>);

/// Output variables written by the field extractor.
pub type Variables = ValueMap;

impl ValueMap {
    /// Parse a JSON object into a flat map.
    ///
    /// Nested objects and arrays are flattened by joining the path with `_`:
    /// `{"data": {"1717250400": [1.5, 3.0]}}` turns into `data_1717250400_0` and `data_1717250400_1`.
    pub fn from_json_str(body: &str) -> Result<Self, ProviderError> {
        match serde_json::from_str(body)? {
            serde_json::Value::Object(object) => {
                let mut map = Self::default();
                for (key, value) in object {
                    map.flatten(key, value);
                }
                Ok(map)
            }
            other => Err(ProviderError::MalformedResponse(format!(
                "expected a JSON object, got `{other}`"
            ))),
        }
    }

    /// Get the value or [`Value::Null`] when the key is absent.
    pub fn get_or_null(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&Value::Null)
    }

    fn flatten(&mut self, path: String, value: serde_json::Value) {
        match value {
            serde_json::Value::Object(object) => {
                for (key, value) in object {
                    self.flatten(format!("{path}_{key}"), value);
                }
            }
            serde_json::Value::Array(array) => {
                for (index, value) in array.into_iter().enumerate() {
                    self.flatten(format!("{path}_{index}"), value);
                }
            }
            serde_json::Value::Null => {
                self.0.insert(path, Value::Null);
            }
            serde_json::Value::Bool(flag) => {
                self.0.insert(path, Value::String(flag.to_string()));
            }
            serde_json::Value::Number(number) => {
                self.0.insert(path, number.as_f64().map_or(Value::Null, Value::Number));
            }
            serde_json::Value::String(string) => {
                self.0.insert(path, Value::String(string));
            }
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
    }
}
