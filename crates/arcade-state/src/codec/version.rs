//! Reading the `__version` field of a serialized entity.
//!
//! Each entity matches the returned number against its own table of
//! versioned decoders and reports anything else with [`unsupported_version`].

use serde_json::Value;

use crate::codec::primitives::{JsonObject, field_path, type_name, as_non_negative_integer};
use crate::constants::VERSION_FIELD;
use crate::error::DecodeError;

/// How a missing `__version` field is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingVersion {
    /// The entity's first version predates version tagging; absence means 1.
    Legacy,
    /// The entity was introduced with tagging; absence is an error.
    Required,
}

/// Reads `__version` from an entity object.
pub fn read_version(
    obj: &JsonObject,
    path: &str,
    missing: MissingVersion,
) -> Result<u64, DecodeError> {
    let version_path = field_path(path, VERSION_FIELD);
    match obj.get(VERSION_FIELD) {
        None => match missing {
            MissingVersion::Legacy => Ok(1),
            MissingVersion::Required => Err(DecodeError::TypeMismatch {
                path: version_path,
                expected: "number",
                found: "undefined",
            }),
        },
        Some(Value::Number(n)) => as_non_negative_integer(n).ok_or_else(|| {
            DecodeError::UnsupportedVersion {
                path: path.to_string(),
                version: n.to_string(),
            }
        }),
        Some(other) => Err(DecodeError::TypeMismatch {
            path: version_path,
            expected: "number",
            found: type_name(Some(other)),
        }),
    }
}

/// Error for a version number with no decoder.
pub fn unsupported_version(path: &str, version: u64) -> DecodeError {
    DecodeError::UnsupportedVersion {
        path: path.to_string(),
        version: version.to_string(),
    }
}

/// Builds a serialized entity object with `__version` as its first field.
pub fn envelope(version: u64, fields: impl IntoIterator<Item = (&'static str, Value)>) -> Value {
    let mut obj = JsonObject::new();
    obj.insert(VERSION_FIELD.to_string(), Value::from(version));
    for (name, value) in fields {
        obj.insert(name.to_string(), value);
    }
    Value::Object(obj)
}
