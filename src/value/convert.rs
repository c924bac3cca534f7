//! Conversions between typed Rust data and [`Value`] buffers.
//!
//! `#[derive(Buffer)]` implements both traits for named structs by delegating
//! to the field types' implementations.

use super::{Key, Kind, Value};
use crate::error::FromValueError;

/// Converts a typed value into a buffer node.
pub trait IntoValue {
    /// Performs the conversion.
    fn into_value(self) -> Value;
}

/// Reads a typed value back out of a buffer node.
pub trait FromValue: Sized {
    /// Performs the conversion.
    ///
    /// # Errors
    ///
    /// [`FromValueError`] naming the location and kind of the first node
    /// that does not have the expected shape.
    fn from_value(value: &Value) -> Result<Self, FromValueError>;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, FromValueError> {
        Ok(value.clone())
    }
}

macro_rules! impl_small_integer {
    ($($integer:ty),*) => {
        $(
            impl IntoValue for $integer {
                fn into_value(self) -> Value {
                    Value::Int(i64::from(self))
                }
            }

            impl FromValue for $integer {
                fn from_value(value: &Value) -> Result<Self, FromValueError> {
                    value
                        .as_i64()
                        .and_then(|integer| <$integer>::try_from(integer).ok())
                        .ok_or_else(|| FromValueError::type_mismatch(stringify!($integer), value.kind()))
                }
            }
        )*
    };
}

impl_small_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_wide_integer {
    ($($integer:ty),*) => {
        $(
            impl IntoValue for $integer {
                #[allow(clippy::cast_precision_loss)]
                fn into_value(self) -> Value {
                    i64::try_from(self).map_or(Value::Float(self as f64), Value::Int)
                }
            }

            impl FromValue for $integer {
                fn from_value(value: &Value) -> Result<Self, FromValueError> {
                    value
                        .as_i64()
                        .and_then(|integer| <$integer>::try_from(integer).ok())
                        .ok_or_else(|| FromValueError::type_mismatch(stringify!($integer), value.kind()))
                }
            }
        )*
    };
}

impl_wide_integer!(u64, usize);

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, FromValueError> {
        value
            .as_bool()
            .ok_or_else(|| FromValueError::type_mismatch("bool", value.kind()))
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, FromValueError> {
        value
            .as_f64()
            .ok_or_else(|| FromValueError::type_mismatch("f64", value.kind()))
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Float(f64::from(self))
    }
}

impl FromValue for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> Result<Self, FromValueError> {
        value
            .as_f64()
            .map(|float| float as Self)
            .ok_or_else(|| FromValueError::type_mismatch("f32", value.kind()))
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::from(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::from(self)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, FromValueError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| FromValueError::type_mismatch("string", value.kind()))
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        self.map_or(Value::Null, IntoValue::into_value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, FromValueError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, FromValueError> {
        let Value::List(list) = value else {
            return Err(FromValueError::type_mismatch("list", value.kind()));
        };
        list.iter()
            .enumerate()
            .map(|(index, element)| {
                T::from_value(element).map_err(|error| error.with_prefix(Key::Index(index)))
            })
            .collect()
    }
}

/// Reads the field `name` of a record for a derived [`FromValue`].
///
/// A missing field converts from `Null`, so `Option` fields may be omitted.
///
/// # Errors
///
/// A mismatch at the root if `value` is not a record, or the field's own
/// conversion error prefixed with `name`.
#[doc(hidden)]
pub fn field<T: FromValue>(value: &Value, name: &str) -> Result<T, FromValueError> {
    let Value::Record(record) = value else {
        return Err(FromValueError::type_mismatch("record", value.kind()));
    };
    let key = Key::from(name);
    let field = record.get(&key).unwrap_or(&Value::Null);
    T::from_value(field).map_err(|error| error.with_prefix(key))
}

/// Checks that `value` is a record, for derived [`FromValue`] on field-less structs.
///
/// # Errors
///
/// A mismatch at the root if `value` is not a record.
#[doc(hidden)]
pub fn expect_record(value: &Value) -> Result<(), FromValueError> {
    if value.kind() == Kind::Record {
        Ok(())
    } else {
        Err(FromValueError::type_mismatch("record", value.kind()))
    }
}
