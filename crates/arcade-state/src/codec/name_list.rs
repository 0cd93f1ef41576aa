//! Game and machine name list state encoding and decoding.
//!
//! Version 1 was the bare input string; version 2 wraps it as
//! `{__version: 2, inputStr}`.

use serde_json::Value;

use crate::codec::primitives::{decode_object, decode_string, field_path, version_path};
use crate::codec::version::{MissingVersion, envelope, read_version, unsupported_version};
use crate::error::DecodeError;
use crate::model::NameListState;

pub fn encode_name_list_state(state: &NameListState) -> Value {
    envelope(2, [("inputStr", Value::from(state.input_str.as_str()))])
}

pub fn decode_name_list_state(
    value: Option<&Value>,
    path: &str,
) -> Result<NameListState, DecodeError> {
    if let Some(Value::String(_)) = value {
        return Ok(NameListState {
            input_str: decode_string(value, &version_path(path, 1))?,
        });
    }

    let obj = decode_object(value, path)?;
    let version = read_version(obj, path, MissingVersion::Required)?;
    match version {
        2 => {
            let versioned = version_path(path, version);
            Ok(NameListState {
                input_str: decode_string(obj.get("inputStr"), &field_path(&versioned, "inputStr"))?,
            })
        }
        _ => Err(unsupported_version(path, version)),
    }
}
