//! Body and query builders
//!
//! Option types fill a [`BodyFields`] or [`QueryFields`] list; the free
//! functions validate the list and produce the wire payload.

use super::types::{BodyOptions, FieldValue, QueryOptions};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

// ============================================================================
// Request Bodies
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    /// Error when zero
    Required,
    /// Omitted when zero
    Optional,
    /// Sent even when zero
    Always,
}

#[derive(Debug)]
struct BodyEntry {
    key: String,
    value: Value,
    zero: bool,
    presence: Presence,
}

/// Ordered list of body fields declared by an option type
#[derive(Debug, Default)]
pub struct BodyFields {
    entries: Vec<BodyEntry>,
    error: Option<Error>,
}

impl BodyFields {
    /// Create an empty field list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field that must not be zero
    #[must_use]
    pub fn required<V: FieldValue + ?Sized>(self, key: &str, value: &V) -> Self {
        self.push(key, value, Presence::Required)
    }

    /// Add a field that is omitted when zero
    #[must_use]
    pub fn optional<V: FieldValue + ?Sized>(self, key: &str, value: &V) -> Self {
        self.push(key, value, Presence::Optional)
    }

    /// Add a field that is sent even when zero (e.g. `false` flags)
    #[must_use]
    pub fn field<V: FieldValue + ?Sized>(self, key: &str, value: &V) -> Self {
        self.push(key, value, Presence::Always)
    }

    /// Embed another option type as a nested object.
    ///
    /// Validation failures inside the nested value are reported with a
    /// dotted field path. An empty nested object is omitted.
    #[must_use]
    pub fn nested<O: BodyOptions + ?Sized>(mut self, key: &str, opts: &O) -> Self {
        match opts.body_fields().into_map() {
            Ok(map) => {
                self.entries.push(BodyEntry {
                    key: key.to_string(),
                    zero: map.is_empty(),
                    value: Value::Object(map),
                    presence: Presence::Optional,
                });
            }
            Err(Error::Validation { field, message }) if self.error.is_none() => {
                self.error = Some(Error::validation(format!("{key}.{field}"), message));
            }
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
        self
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no field was declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push<V: FieldValue + ?Sized>(mut self, key: &str, value: &V, presence: Presence) -> Self {
        self.entries.push(BodyEntry {
            key: key.to_string(),
            value: value.to_json(),
            zero: value.is_zero(),
            presence,
        });
        self
    }

    /// Validate the fields and collect them into a JSON object
    pub fn into_map(self) -> Result<Map<String, Value>> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let mut map = Map::new();
        for entry in self.entries {
            match (entry.presence, entry.zero) {
                (Presence::Required, true) => return Err(Error::missing_field(entry.key)),
                (Presence::Optional, true) => {}
                _ => {
                    map.insert(entry.key, entry.value);
                }
            }
        }
        Ok(map)
    }
}

/// Build a request body from an option value.
///
/// Fields are nested under `root_key`, or placed at the top level when
/// `root_key` is empty. Fails before any request is made when a required
/// field is zero-valued.
pub fn build_body<O: BodyOptions + ?Sized>(opts: &O, root_key: &str) -> Result<Value> {
    let map = opts.body_fields().into_map()?;

    if root_key.is_empty() {
        return Ok(Value::Object(map));
    }

    let mut wrapped = Map::new();
    wrapped.insert(root_key.to_string(), Value::Object(map));
    Ok(Value::Object(wrapped))
}

// ============================================================================
// Query Strings
// ============================================================================

#[derive(Debug)]
struct QueryEntry {
    key: String,
    values: Vec<String>,
    zero: bool,
    required: bool,
}

/// List of query parameters declared by an option type
#[derive(Debug, Default)]
pub struct QueryFields {
    entries: Vec<QueryEntry>,
}

impl QueryFields {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter that must not be zero
    #[must_use]
    pub fn required<V: FieldValue + ?Sized>(self, key: &str, value: &V) -> Self {
        self.push(key, value, true)
    }

    /// Add a parameter that is skipped when zero
    #[must_use]
    pub fn optional<V: FieldValue + ?Sized>(self, key: &str, value: &V) -> Self {
        self.push(key, value, false)
    }

    fn push<V: FieldValue + ?Sized>(mut self, key: &str, value: &V, required: bool) -> Self {
        self.entries.push(QueryEntry {
            key: key.to_string(),
            values: value.to_query_values(),
            zero: value.is_zero(),
            required,
        });
        self
    }

    /// Validate the parameters and return `(key, value)` pairs sorted by key.
    ///
    /// Repeated values of one key keep their declared order.
    pub fn into_pairs(self) -> Result<Vec<(String, String)>> {
        let mut pairs = Vec::new();
        for entry in self.entries {
            if entry.zero {
                if entry.required {
                    return Err(Error::missing_field(entry.key));
                }
                continue;
            }
            for value in entry.values {
                pairs.push((entry.key.clone(), value));
            }
        }
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(pairs)
    }
}

/// Build a `?k=v&...` query string from an option value.
///
/// Returns an empty string when no parameter survives.
pub fn build_query<O: QueryOptions + ?Sized>(opts: &O) -> Result<String> {
    let pairs = opts.query_fields().into_pairs()?;
    if pairs.is_empty() {
        return Ok(String::new());
    }

    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    Ok(format!("?{encoded}"))
}
