//! Codec types and traits
//!
//! Defines how option types declare their body and query fields.

use super::builders::{BodyFields, QueryFields};
use super::time::Timestamp;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Trait for option types that produce a JSON request body
pub trait BodyOptions {
    /// Declare the body fields of this value, in wire order
    fn body_fields(&self) -> BodyFields;
}

/// Trait for option types that produce a query string
pub trait QueryOptions {
    /// Declare the query parameters of this value
    fn query_fields(&self) -> QueryFields;
}

impl QueryOptions for () {
    fn query_fields(&self) -> QueryFields {
        QueryFields::new()
    }
}

impl<T: QueryOptions + ?Sized> QueryOptions for &T {
    fn query_fields(&self) -> QueryFields {
        (**self).query_fields()
    }
}

impl<T: BodyOptions + ?Sized> BodyOptions for &T {
    fn body_fields(&self) -> BodyFields {
        (**self).body_fields()
    }
}

/// A value that can appear in a request body or query string.
///
/// `is_zero` mirrors the zero value of the field's type: empty strings,
/// `0`, `false`, empty collections and `None`. `Option<T>` is only zero
/// when it is `None`, so `Some(String::new())` is sent as an explicit clear.
pub trait FieldValue {
    /// Whether this is the zero value of its type
    fn is_zero(&self) -> bool;

    /// JSON representation for request bodies
    fn to_json(&self) -> Value;

    /// Text representation for query strings (one entry per repeated parameter)
    fn to_query_values(&self) -> Vec<String>;
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn to_json(&self) -> Value {
        (**self).to_json()
    }

    fn to_query_values(&self) -> Vec<String> {
        (**self).to_query_values()
    }
}

impl FieldValue for str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }

    fn to_query_values(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl FieldValue for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }

    fn to_query_values(&self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl FieldValue for bool {
    fn is_zero(&self) -> bool {
        !*self
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }

    fn to_query_values(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}

macro_rules! impl_field_value_for_int {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn to_json(&self) -> Value {
                    Value::from(*self)
                }

                fn to_query_values(&self) -> Vec<String> {
                    vec![self.to_string()]
                }
            }
        )*
    };
}

impl_field_value_for_int!(i32, i64, u8, u16, u32, u64, usize);

impl FieldValue for f64 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }

    fn to_query_values(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn to_json(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_json)
    }

    fn to_query_values(&self) -> Vec<String> {
        self.as_ref()
            .map(FieldValue::to_query_values)
            .unwrap_or_default()
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(FieldValue::to_json).collect())
    }

    fn to_query_values(&self) -> Vec<String> {
        self.iter().flat_map(FieldValue::to_query_values).collect()
    }
}

impl<T: FieldValue> FieldValue for [T] {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(FieldValue::to_json).collect())
    }

    fn to_query_values(&self) -> Vec<String> {
        self.iter().flat_map(FieldValue::to_query_values).collect()
    }
}

impl FieldValue for BTreeMap<String, String> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_json(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }

    // Maps travel as a single `{'k':'v','k2':'v2'}` parameter
    fn to_query_values(&self) -> Vec<String> {
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("'{k}':'{v}'")).collect();
        vec![format!("{{{}}}", pairs.join(","))]
    }
}

impl FieldValue for HashMap<String, String> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_json(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }

    fn to_query_values(&self) -> Vec<String> {
        let sorted: BTreeMap<String, String> =
            self.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        sorted.to_query_values()
    }
}

impl FieldValue for Value {
    fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
        }
    }

    fn to_json(&self) -> Value {
        self.clone()
    }

    fn to_query_values(&self) -> Vec<String> {
        match self {
            Value::Null => vec![],
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => items.iter().flat_map(FieldValue::to_query_values).collect(),
            other => vec![other.to_string()],
        }
    }
}

impl FieldValue for Timestamp {
    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn to_json(&self) -> Value {
        self.to_rfc3339_milli().map_or(Value::Null, Value::String)
    }

    fn to_query_values(&self) -> Vec<String> {
        self.to_rfc3339_milli().into_iter().collect()
    }
}
