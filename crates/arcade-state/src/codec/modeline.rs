//! Modeline configuration encoding and decoding.

use serde_json::Value;

use crate::codec::enums::StringEnum;
use crate::codec::primitives::{
    JsonObject, decode_array, decode_boolean, decode_object, decode_string, field_path,
    version_path,
};
use crate::codec::version::{MissingVersion, envelope, read_version, unsupported_version};
use crate::error::DecodeError;
use crate::model::{ModelineConfig, Orientation};

pub fn encode_modeline_config(config: &ModelineConfig) -> Value {
    envelope(
        1,
        [
            ("preset", Value::from(config.preset.as_str())),
            ("orientation", config.orientation.serialize()),
            (
                "ranges",
                Value::Array(config.ranges.iter().map(|r| Value::from(r.as_str())).collect()),
            ),
            ("allowInterlaced", Value::from(config.allow_interlaced)),
            ("allowDoublescan", Value::from(config.allow_doublescan)),
        ],
    )
}

/// Decodes a modeline configuration. An untagged one is version 1.
pub fn decode_modeline_config(
    value: Option<&Value>,
    path: &str,
) -> Result<ModelineConfig, DecodeError> {
    let obj = decode_object(value, path)?;
    let version = read_version(obj, path, MissingVersion::Legacy)?;
    match version {
        1 => decode_modeline_config_v1(obj, &version_path(path, version)),
        _ => Err(unsupported_version(path, version)),
    }
}

fn decode_modeline_config_v1(obj: &JsonObject, path: &str) -> Result<ModelineConfig, DecodeError> {
    Ok(ModelineConfig {
        preset: decode_string(obj.get("preset"), &field_path(path, "preset"))?,
        orientation: Orientation::deserialize(
            obj.get("orientation"),
            &field_path(path, "orientation"),
        )?,
        ranges: decode_array(obj.get("ranges"), &field_path(path, "ranges"), decode_string)?,
        allow_interlaced: decode_boolean(
            obj.get("allowInterlaced"),
            &field_path(path, "allowInterlaced"),
        )?,
        allow_doublescan: decode_boolean(
            obj.get("allowDoublescan"),
            &field_path(path, "allowDoublescan"),
        )?,
    })
}
