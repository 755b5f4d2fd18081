//! Record factory contract and the raw payload schema it reads through.
//!
//! Gateway payloads arrive as loosely typed JSON objects. Every record is built
//! by checking its mandatory keys for *presence* first (a present `null` still
//! counts), then reading each field with a coercion to the record's storage type.

use serde_json::{Map, Value};

use crate::error::MappingError;

/// A typed gateway record built from a raw JSON payload.
pub trait Record: Sized {
    /// Name reported in a [`MappingError`].
    const KIND: &'static str;

    /// Validates `raw` and builds the record.
    fn create(raw: &Value) -> Result<Self, MappingError>;

    /// Projects the record into its outbound mapping.
    ///
    /// Key names may differ from the raw payload. Optional fields are always
    /// present (as `null` or an empty collection).
    fn to_mapping(&self) -> Map<String, Value>;
}

/// Read-only view over a raw payload object for a given record kind.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    kind: &'static str,
    fields: &'a Map<String, Value>,
}

impl<'a> RawRecord<'a> {
    /// Wraps `raw`, failing when it is not a JSON object.
    pub fn parse(kind: &'static str, raw: &'a Value) -> Result<Self, MappingError> {
        match raw {
            Value::Object(fields) => Ok(Self { kind, fields }),
            _ => Err(MappingError::new(kind)),
        }
    }

    /// Fails unless every key in `keys` is present.
    pub fn require(&self, keys: &[&str]) -> Result<(), MappingError> {
        if keys.iter().all(|key| self.fields.contains_key(*key)) {
            Ok(())
        } else {
            Err(MappingError::new(self.kind))
        }
    }

    pub fn error(&self) -> MappingError {
        MappingError::new(self.kind)
    }

    /// Text value, `""` when absent or null.
    pub fn text(&self, key: &str) -> String {
        self.opt_text(key).unwrap_or_default()
    }

    /// Text value, `None` when absent or null.
    pub fn opt_text(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(coerce_text)
    }

    /// Integer value, `0` when absent or null.
    pub fn int(&self, key: &str) -> i64 {
        self.opt_int(key).unwrap_or(0)
    }

    /// Integer value, `None` when absent or null.
    pub fn opt_int(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(coerce_int)
    }

    /// Raw value, `Value::Null` when absent.
    pub fn value(&self, key: &str) -> Value {
        self.fields.get(key).cloned().unwrap_or(Value::Null)
    }

    /// Raw value, `None` when absent or null.
    pub fn opt_value(&self, key: &str) -> Option<Value> {
        self.fields.get(key).filter(|v| !v.is_null()).cloned()
    }

    /// Raw value only when it is truthy (non-null, non-empty, non-zero, not false).
    pub fn truthy(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|v| is_truthy(v))
    }

    /// Builds a nested record from the value under `key`.
    pub fn record<R: Record>(&self, key: &str) -> Result<R, MappingError> {
        R::create(self.fields.get(key).unwrap_or(&Value::Null))
    }

    /// Builds a nested record when the value under `key` is present and non-null.
    pub fn opt_record<R: Record>(&self, key: &str) -> Result<Option<R>, MappingError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(raw) => R::create(raw).map(Some),
        }
    }

    /// Builds every element under `key`, preserving order.
    ///
    /// Absent or null yields an empty list; an object is read by its values.
    pub fn records<R: Record>(&self, key: &str) -> Result<Vec<R>, MappingError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items.iter().map(R::create).collect(),
            Some(Value::Object(items)) => items.values().map(R::create).collect(),
            Some(_) => Err(MappingError::new(R::KIND)),
        }
    }
}

/// Unwraps a `json!` object literal.
pub(crate) fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            Some(
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                    .unwrap_or(0),
            )
        }
        Value::Array(_) | Value::Object(_) => Some(0),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
