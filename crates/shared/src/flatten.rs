//! Record flattening contracts.
//!
//! A record is flattened into a plain JSON object keyed by snake_case field
//! names. Nested records become nested objects, unset optional records become
//! `null`, and scalars pass through unchanged. Implementations are normally
//! generated with `#[derive(Flatten)]` from `kvlog-flatten-derive`, which
//! resolves the record/optional/scalar decision per field at compile time
//! through [`FieldValue`].

use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

/// Flattened record: snake_case key to JSON value, nesting to arbitrary depth.
pub type FlattenedRecord = Map<String, Value>;

/// A structured record that can be flattened into a [`FlattenedRecord`].
pub trait Flatten {
    /// Flatten the visible fields of the record.
    fn flatten(&self) -> FlattenedRecord;
}

/// Conversion of a single field value into its flattened JSON form.
pub trait FieldValue {
    /// Convert the field value.
    fn to_field_value(&self) -> Value;
}

/// Flatten an optional record reference.
///
/// An unset reference is never dereferenced and yields an empty record. This
/// differs from an unset optional *field* inside a record, which flattens to
/// `null` under its key.
pub fn flatten_optional<T>(record: Option<&T>) -> FlattenedRecord
where
    T: Flatten + ?Sized,
{
    record.map_or_else(FlattenedRecord::new, Flatten::flatten)
}

impl<T: Flatten + ?Sized> Flatten for &T {
    fn flatten(&self) -> FlattenedRecord {
        (**self).flatten()
    }
}

impl<T: Flatten + ?Sized> Flatten for Box<T> {
    fn flatten(&self) -> FlattenedRecord {
        (**self).flatten()
    }
}

impl<T: Flatten + ?Sized> Flatten for Arc<T> {
    fn flatten(&self) -> FlattenedRecord {
        (**self).flatten()
    }
}

macro_rules! impl_field_value_from_copy {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn to_field_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_field_value_from_copy!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
);

impl FieldValue for char {
    fn to_field_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl FieldValue for str {
    fn to_field_value(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl FieldValue for String {
    fn to_field_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldValue for Cow<'_, str> {
    fn to_field_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl FieldValue for Value {
    fn to_field_value(&self) -> Value {
        self.clone()
    }
}

impl FieldValue for () {
    fn to_field_value(&self) -> Value {
        Value::Null
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_field_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_field_value)
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn to_field_value(&self) -> Value {
        (**self).to_field_value()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Box<T> {
    fn to_field_value(&self) -> Value {
        (**self).to_field_value()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Rc<T> {
    fn to_field_value(&self) -> Value {
        (**self).to_field_value()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Arc<T> {
    fn to_field_value(&self) -> Value {
        (**self).to_field_value()
    }
}

impl<T: FieldValue> FieldValue for [T] {
    fn to_field_value(&self) -> Value {
        Value::Array(self.iter().map(FieldValue::to_field_value).collect())
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_field_value(&self) -> Value {
        self.as_slice().to_field_value()
    }
}

impl<T: FieldValue> FieldValue for BTreeMap<String, T> {
    fn to_field_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_field_value()))
                .collect(),
        )
    }
}

impl<T: FieldValue, S: BuildHasher> FieldValue for HashMap<String, T, S> {
    fn to_field_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_field_value()))
                .collect(),
        )
    }
}
