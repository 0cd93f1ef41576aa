//! Typed decoding of untyped JSON values.
//!
//! Every decoder takes the value (`None` when the field is absent) and the
//! property path used in error messages. Paths compose as the decoders nest:
//! `sState.sCPConfig.sControlSets[2].controlIds[0]`.

use rustc_hash::FxHashMap;
use serde_json::{Map, Number, Value};

use crate::error::DecodeError;

/// A decoded JSON object.
pub type JsonObject = Map<String, Value>;

// =============================================================================
// PATHS
// =============================================================================

/// `path.name`
pub fn field_path(path: &str, name: &str) -> String {
    format!("{path}.{name}")
}

/// `path[index]`
pub fn index_path(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

/// `path['key']`
pub fn key_path(path: &str, key: &str) -> String {
    format!("{path}['{key}']")
}

/// `path(vN)`, marks which versioned decoder produced the nested paths.
pub fn version_path(path: &str, version: u64) -> String {
    format!("{path}(v{version})")
}

/// Short name of a value's JSON type, as used in error messages.
pub fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

fn mismatch(value: Option<&Value>, path: &str, expected: &'static str) -> DecodeError {
    DecodeError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: type_name(value),
    }
}

/// Parses raw text into a JSON value.
pub fn parse_json(text: &str, context: &str) -> Result<Value, DecodeError> {
    serde_json::from_str(text).map_err(|e| DecodeError::MalformedJson {
        context: context.to_string(),
        message: e.to_string(),
    })
}

// =============================================================================
// PRIMITIVES
// =============================================================================

/// Decodes a string.
pub fn decode_string(value: Option<&Value>, path: &str) -> Result<String, DecodeError> {
    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        other => Err(mismatch(other, path, "string")),
    }
}

/// Decodes a number.
pub fn decode_number(value: Option<&Value>, path: &str) -> Result<f64, DecodeError> {
    match value {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| mismatch(value, path, "number")),
        other => Err(mismatch(other, path, "number")),
    }
}

/// Returns the number as a non-negative integer, accepting integral floats
/// such as `2.0`.
pub fn as_non_negative_integer(n: &Number) -> Option<u64> {
    if let Some(v) = n.as_u64() {
        return Some(v);
    }
    match n.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Some(f as u64),
        _ => None,
    }
}

/// Decodes a non-negative integer that fits in `u32`.
pub fn decode_u32(value: Option<&Value>, path: &str) -> Result<u32, DecodeError> {
    const EXPECTED: &str = "non-negative integer";
    match value {
        Some(Value::Number(n)) => as_non_negative_integer(n)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or(DecodeError::TypeMismatch {
                path: path.to_string(),
                expected: EXPECTED,
                found: "number",
            }),
        other => Err(mismatch(other, path, EXPECTED)),
    }
}

/// Decodes a boolean.
pub fn decode_boolean(value: Option<&Value>, path: &str) -> Result<bool, DecodeError> {
    match value {
        Some(Value::Bool(b)) => Ok(*b),
        other => Err(mismatch(other, path, "boolean")),
    }
}

/// Decodes an object (a non-null, non-array mapping).
pub fn decode_object<'a>(
    value: Option<&'a Value>,
    path: &str,
) -> Result<&'a JsonObject, DecodeError> {
    match value {
        Some(Value::Object(obj)) => Ok(obj),
        other => Err(mismatch(other, path, "object")),
    }
}

/// Decodes an array, applying `decode_item` to each element.
///
/// Fails on the first element that fails; no partial result is returned.
pub fn decode_array<T, F>(
    value: Option<&Value>,
    path: &str,
    mut decode_item: F,
) -> Result<Vec<T>, DecodeError>
where
    F: FnMut(Option<&Value>, &str) -> Result<T, DecodeError>,
{
    let items = match value {
        Some(Value::Array(items)) => items,
        other => return Err(mismatch(other, path, "array")),
    };

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        out.push(decode_item(Some(item), &index_path(path, i))?);
    }
    Ok(out)
}

/// Decodes an object used as a map, applying `decode_entry` to each value.
///
/// The entry decoder also receives the key.
pub fn decode_map<T, F>(
    value: Option<&Value>,
    path: &str,
    mut decode_entry: F,
) -> Result<FxHashMap<String, T>, DecodeError>
where
    F: FnMut(Option<&Value>, &str, &str) -> Result<T, DecodeError>,
{
    let obj = decode_object(value, path)?;

    let mut map = FxHashMap::with_capacity_and_hasher(obj.len(), Default::default());
    for (key, entry) in obj {
        let decoded = decode_entry(Some(entry), &key_path(path, key), key)?;
        map.insert(key.clone(), decoded);
    }
    Ok(map)
}

/// Decodes either a single string or an array of strings.
pub fn decode_one_or_many(value: Option<&Value>, path: &str) -> Result<Vec<String>, DecodeError> {
    match value {
        Some(Value::Array(_)) => decode_array(value, path, decode_string),
        Some(Value::String(s)) => Ok(vec![s.clone()]),
        other => Err(mismatch(other, path, "string or array")),
    }
}

// =============================================================================
// OPTIONAL / NULLABLE
// =============================================================================

/// Absent → `None`; anything else goes through `decode`.
pub fn decode_optional<T, F>(
    value: Option<&Value>,
    path: &str,
    decode: F,
) -> Result<Option<T>, DecodeError>
where
    F: FnOnce(Option<&Value>, &str) -> Result<T, DecodeError>,
{
    match value {
        None => Ok(None),
        Some(_) => decode(value, path).map(Some),
    }
}

/// `null` → `None`; anything else (including absent) goes through `decode`.
pub fn decode_nullable<T, F>(
    value: Option<&Value>,
    path: &str,
    decode: F,
) -> Result<Option<T>, DecodeError>
where
    F: FnOnce(Option<&Value>, &str) -> Result<T, DecodeError>,
{
    match value {
        Some(Value::Null) => Ok(None),
        _ => decode(value, path).map(Some),
    }
}

/// Absent or `null` → `None`.
pub fn decode_nullable_optional<T, F>(
    value: Option<&Value>,
    path: &str,
    decode: F,
) -> Result<Option<T>, DecodeError>
where
    F: FnOnce(Option<&Value>, &str) -> Result<T, DecodeError>,
{
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(_) => decode(value, path).map(Some),
    }
}

pub fn decode_string_optional(
    value: Option<&Value>,
    path: &str,
) -> Result<Option<String>, DecodeError> {
    decode_optional(value, path, decode_string)
}

pub fn decode_number_optional(
    value: Option<&Value>,
    path: &str,
) -> Result<Option<f64>, DecodeError> {
    decode_optional(value, path, decode_number)
}

pub fn decode_boolean_optional(
    value: Option<&Value>,
    path: &str,
) -> Result<Option<bool>, DecodeError> {
    decode_optional(value, path, decode_boolean)
}

pub fn decode_object_optional<'a>(
    value: Option<&'a Value>,
    path: &str,
) -> Result<Option<&'a JsonObject>, DecodeError> {
    match value {
        None => Ok(None),
        Some(_) => decode_object(value, path).map(Some),
    }
}

pub fn decode_string_nullable(
    value: Option<&Value>,
    path: &str,
) -> Result<Option<String>, DecodeError> {
    decode_nullable(value, path, decode_string)
}

pub fn decode_array_optional<T, F>(
    value: Option<&Value>,
    path: &str,
    decode_item: F,
) -> Result<Option<Vec<T>>, DecodeError>
where
    F: FnMut(Option<&Value>, &str) -> Result<T, DecodeError>,
{
    match value {
        None => Ok(None),
        Some(_) => decode_array(value, path, decode_item).map(Some),
    }
}

pub fn decode_map_optional<T, F>(
    value: Option<&Value>,
    path: &str,
    decode_entry: F,
) -> Result<Option<FxHashMap<String, T>>, DecodeError>
where
    F: FnMut(Option<&Value>, &str, &str) -> Result<T, DecodeError>,
{
    match value {
        None => Ok(None),
        Some(_) => decode_map(value, path, decode_entry).map(Some),
    }
}
