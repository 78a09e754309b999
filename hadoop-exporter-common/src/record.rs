//! Loosely typed upstream records with explicit optional-field accessors.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::metric::MetricValue;

/// An untyped key/value document fetched from an upstream daemon.
///
/// `context` names the record in error messages (e.g. `clusterMetrics`,
/// `LiveNodes[dn1:9866]`).
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    context: String,
    fields: Map<String, Value>,
}

impl RawRecord {
    pub fn new(context: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            context: context.into(),
            fields,
        }
    }

    /// Wrap a JSON value, which must be an object.
    pub fn from_value(context: impl Into<String>, value: Value) -> Result<Self> {
        let context = context.into();
        match value {
            Value::Object(fields) => Ok(Self::new(context, fields)),
            other => Err(Error::invalid(
                context,
                "<record>",
                format!("expected an object, got {}", json_type(&other)),
            )),
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// Raw access. `null` counts as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    /// A numeric field if present. Present but non-numeric is an error.
    pub fn number(&self, field: &str) -> Result<Option<MetricValue>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Number(n)) => Ok(Some(MetricValue::from_number(n))),
            Some(other) => Err(Error::invalid(
                &self.context,
                field,
                format!("expected a number, got {}", json_type(other)),
            )),
        }
    }

    /// A numeric field that must be present.
    pub fn require_number(&self, field: &str) -> Result<MetricValue> {
        self.number(field)?.ok_or_else(|| Error::missing(&self.context, field))
    }

    /// A string field if present and of string type.
    pub fn str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// A string usable as a label value: present and non-empty.
    pub fn label(&self, field: &str) -> Option<&str> {
        self.str(field).filter(|s| !s.is_empty())
    }

    /// A string field that must be present.
    pub fn require_str(&self, field: &str) -> Result<&str> {
        match self.get(field) {
            None => Err(Error::missing(&self.context, field)),
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(Error::invalid(
                &self.context,
                field,
                format!("expected a string, got {}", json_type(other)),
            )),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
