//! serde support for [`Value`].
//!
//! `Value` serializes as the JSON data model: records become maps, lists
//! become sequences. Symbol-keyed fields have no serialized form and are
//! dropped.

use ::serde::de::DeserializeOwned;
use ::serde::ser::{SerializeMap, SerializeSeq};
use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Key, Value};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Str(value) => serializer.serialize_str(value),
            Self::List(list) => {
                let mut sequence = serializer.serialize_seq(Some(list.len()))?;
                for element in list {
                    sequence.serialize_element(element)?;
                }
                sequence.end()
            }
            Self::Record(record) => {
                let named = record.iter().filter_map(|(key, value)| key.as_name().map(|name| (name, value)));
                let mut map = serializer.serialize_map(None)?;
                for (name, value) in named {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map(Self::Int)
                .or_else(|| number.as_f64().map(Self::Float))
                .unwrap_or_default(),
            serde_json::Value::String(value) => Self::from(value),
            serde_json::Value::Array(values) => values.into_iter().map(Self::from).collect(),
            serde_json::Value::Object(fields) => Self::record(
                fields
                    .into_iter()
                    .map(|(name, value)| (Key::from(name), Self::from(value))),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(value) => Self::Bool(*value),
            Value::Int(value) => Self::from(*value),
            Value::Float(value) => serde_json::Number::from_f64(*value).map_or(Self::Null, Self::Number),
            Value::Str(value) => Self::String(value.to_string()),
            Value::List(list) => Self::Array(list.iter().map(Self::from).collect()),
            Value::Record(record) => {
                let mut dropped = 0_usize;
                let fields = record
                    .iter()
                    .filter_map(|(key, value)| {
                        let name = key.as_name();
                        if name.is_none() {
                            dropped += 1;
                        }
                        name.map(|name| (name.to_owned(), Self::from(value)))
                    })
                    .collect();
                if dropped > 0 {
                    tracing::debug!(dropped, "symbol-keyed fields dropped from JSON output");
                }
                Self::Object(fields)
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

/// Converts any serializable value into a buffer.
///
/// # Errors
///
/// The serializer's error if `input` cannot be represented as JSON.
///
/// # Examples
///
/// ```
/// use proform::value::json;
///
/// #[derive(serde::Serialize)]
/// struct Person { name: String }
///
/// let buffer = json::to_value(&Person { name: "Alice".into() }).unwrap();
/// assert_eq!(buffer.get("name").and_then(|name| name.as_str()), Some("Alice"));
/// ```
pub fn to_value<T: Serialize + ?Sized>(input: &T) -> Result<Value, serde_json::Error> {
    serde_json::to_value(input).map(Value::from)
}

/// Converts a buffer into any deserializable value.
///
/// # Errors
///
/// The deserializer's error if the buffer does not have the shape of `T`.
pub fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(serde_json::Value::from(value))
}
