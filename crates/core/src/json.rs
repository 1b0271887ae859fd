//! Conversion between page objects and flat JSON dicts.
//!
//! The JSON shape is the one pdfplumber consumers expect: one object per
//! record, `object_type` plus every present field, with curve vertices
//! emitted under both `points` and `pts`.

use serde_json::{Map, Number, Value};
use smol_str::SmolStr;

use crate::error::{Result, SchemaViolation};
use crate::model::{FieldMap, FieldValue, PageObject};

/// Render a record as a JSON object.
pub fn to_value(object: &PageObject) -> Value {
    let map: Map<String, Value> = object
        .fields()
        .into_iter()
        .map(|(key, value)| (key.to_string(), field_to_json(value)))
        .collect();
    Value::Object(map)
}

/// Validate a JSON object as a record.
pub fn from_value(value: &Value) -> Result<PageObject> {
    let Value::Object(map) = value else {
        return Err(SchemaViolation::FieldType {
            field: "<record>".to_string(),
            expected: "object",
            got: json_type_name(value),
        });
    };
    PageObject::from_fields(&fields_from_json(map)?)
}

/// Convert a JSON object into a field map.
pub fn fields_from_json(map: &Map<String, Value>) -> Result<FieldMap> {
    map.iter()
        .map(|(key, value)| json_to_field(key, value).map(|v| (SmolStr::new(key), v)))
        .collect()
}

fn field_to_json(value: FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Bool(b) => Value::Bool(b),
        FieldValue::Int(n) => Value::Number(n.into()),
        FieldValue::Real(n) => Number::from_f64(n).map_or(Value::Null, Value::Number),
        FieldValue::Str(s) => Value::String(s),
        FieldValue::Array(items) => Value::Array(items.into_iter().map(field_to_json).collect()),
        FieldValue::Bytes(b) => Value::Array(b.iter().map(|&byte| Value::from(byte)).collect()),
    }
}

fn json_to_field(key: &str, value: &Value) -> Result<FieldValue> {
    Ok(match value {
        Value::Null => FieldValue::Null,
        Value::Bool(b) => FieldValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => FieldValue::Int(i),
            None => FieldValue::Real(n.as_f64().ok_or_else(|| SchemaViolation::FieldType {
                field: key.to_string(),
                expected: "number representable as f64",
                got: "number",
            })?),
        },
        Value::String(s) => FieldValue::Str(s.clone()),
        Value::Array(items) => FieldValue::Array(
            items
                .iter()
                .map(|item| json_to_field(key, item))
                .collect::<Result<_>>()?,
        ),
        Value::Object(_) => {
            return Err(SchemaViolation::FieldType {
                field: key.to_string(),
                expected: "scalar or array",
                got: "object",
            });
        }
    })
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
