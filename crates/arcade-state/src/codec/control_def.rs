//! Control definition dataset decoding.
//!
//! The dataset is an object keyed by control type token:
//!
//! ```text
//! {"joy-8way": {type, name, description, outputMap?, descriptors?, buttonDescriptors?, fallbacks?}, ...}
//! ```

use serde_json::Value;

use crate::codec::enums::StringEnum;
use crate::codec::primitives::{
    decode_array_optional, decode_boolean_optional, decode_map_optional,
    decode_object, decode_one_or_many, decode_string, decode_string_optional, field_path, key_path,
};
use crate::error::DecodeError;
use crate::model::{
    ControlDef, ControlDefFallback, ControlDefFallbackLevel, ControlDefOutput, ControlDefRegistry,
    ControlType,
};

/// Path label of the dataset root in error messages.
pub const CONTROL_DEFS_PATH: &str = "sControlDefMap";

impl ControlDefRegistry {
    /// Decodes a control definition dataset.
    pub fn decode(value: &Value) -> Result<Self, DecodeError> {
        decode_control_defs(Some(value), CONTROL_DEFS_PATH)
    }
}

/// Decodes a control definition dataset. A later entry for the same type
/// replaces an earlier one.
pub fn decode_control_defs(
    value: Option<&Value>,
    path: &str,
) -> Result<ControlDefRegistry, DecodeError> {
    let obj = decode_object(value, path)?;

    let mut registry = ControlDefRegistry::new();
    for (key, entry) in obj {
        let def = decode_control_def(Some(entry), &key_path(path, key))?;
        registry.insert(def);
    }
    Ok(registry)
}

pub fn decode_control_def(value: Option<&Value>, path: &str) -> Result<ControlDef, DecodeError> {
    let obj = decode_object(value, path)?;
    Ok(ControlDef {
        control_type: ControlType::deserialize(obj.get("type"), &field_path(path, "type"))?,
        name: decode_string(obj.get("name"), &field_path(path, "name"))?,
        description: decode_string(obj.get("description"), &field_path(path, "description"))?,
        descriptors: decode_array_optional(
            obj.get("descriptors"),
            &field_path(path, "descriptors"),
            decode_string,
        )?
        .unwrap_or_default(),
        button_descriptors: decode_array_optional(
            obj.get("buttonDescriptors"),
            &field_path(path, "buttonDescriptors"),
            decode_string,
        )?
        .unwrap_or_default(),
        output_map: decode_map_optional(
            obj.get("outputMap"),
            &field_path(path, "outputMap"),
            |v, p, _key| decode_output(v, p),
        )?
        .unwrap_or_default(),
        fallbacks: decode_array_optional(
            obj.get("fallbacks"),
            &field_path(path, "fallbacks"),
            decode_fallback,
        )?
        .unwrap_or_default(),
    })
}

fn decode_output(value: Option<&Value>, path: &str) -> Result<ControlDefOutput, DecodeError> {
    let obj = decode_object(value, path)?;
    Ok(ControlDefOutput {
        name: decode_string_optional(obj.get("name"), &field_path(path, "name"))?,
        is_analog: decode_boolean_optional(obj.get("isAnalog"), &field_path(path, "isAnalog"))?
            .unwrap_or(false),
        default_mame_input_port_suffix: decode_string(
            obj.get("defaultMAMEInputPortSuffix"),
            &field_path(path, "defaultMAMEInputPortSuffix"),
        )?,
        default_label: decode_string_optional(
            obj.get("defaultLabel"),
            &field_path(path, "defaultLabel"),
        )?,
        neg_default_label: decode_string_optional(
            obj.get("negDefaultLabel"),
            &field_path(path, "negDefaultLabel"),
        )?,
        pos_default_label: decode_string_optional(
            obj.get("posDefaultLabel"),
            &field_path(path, "posDefaultLabel"),
        )?,
    })
}

fn decode_fallback(value: Option<&Value>, path: &str) -> Result<ControlDefFallback, DecodeError> {
    let obj = decode_object(value, path)?;

    let mapping = |name: &str| {
        decode_map_optional(obj.get(name), &field_path(path, name), |v, p, _key| {
            decode_one_or_many(v, p)
        })
        .map(Option::unwrap_or_default)
    };

    Ok(ControlDefFallback {
        control_type: ControlType::deserialize(
            obj.get("controlType"),
            &field_path(path, "controlType"),
        )?,
        level: ControlDefFallbackLevel::deserialize(obj.get("level"), &field_path(path, "level"))?,
        output_mapping: mapping("outputMapping")?,
        button_descriptor_mapping: mapping("buttonDescriptorMapping")?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn dataset() -> Value {
        json!({
            "joy-8way": {
                "type": "joy-8way",
                "name": "8-Way Joystick",
                "description": "Joystick with eight directions.",
                "outputMap": {
                    "up": {"defaultMAMEInputPortSuffix": "UP", "defaultLabel": "Up"},
                    "x": {"isAnalog": true, "defaultMAMEInputPortSuffix": "X", "negDefaultLabel": "Left", "posDefaultLabel": "Right"}
                },
                "fallbacks": [
                    {
                        "controlType": "joy-4way",
                        "level": "ok",
                        "outputMapping": {"up": "up", "upleft": ["up", "left"]}
                    }
                ]
            },
            "spinner": {
                "type": "spinner",
                "name": "Spinner",
                "description": "Free-spinning knob."
            }
        })
    }

    #[test]
    fn test_decode_dataset() {
        let registry = ControlDefRegistry::decode(&dataset()).unwrap();
        assert_eq!(registry.len(), 2);

        let joy = registry.get_by_type(ControlType::Joy8Way).unwrap();
        assert!(!joy.output_map["up"].is_analog);
        assert!(joy.output_map["x"].is_analog);
        assert_eq!(joy.output_map["x"].neg_default_label.as_deref(), Some("Left"));

        let fallback = &joy.fallbacks[0];
        assert_eq!(fallback.level, ControlDefFallbackLevel::Ok);
        assert_eq!(fallback.output_mapping["up"], vec!["up".to_string()]);
        assert_eq!(fallback.output_mapping["upleft"].len(), 2);
        assert!(fallback.button_descriptor_mapping.is_empty());

        let spinner = registry.get_by_type(ControlType::Spinner).unwrap();
        assert!(spinner.descriptors.is_empty());
        assert!(spinner.output_map.is_empty());
    }

    #[test]
    fn test_missing_port_suffix() {
        let mut value = dataset();
        value["joy-8way"]["outputMap"]["up"] = json!({"defaultLabel": "Up"});
        let err = ControlDefRegistry::decode(&value).unwrap_err();
        assert_eq!(
            err.path(),
            "sControlDefMap['joy-8way'].outputMap['up'].defaultMAMEInputPortSuffix"
        );
    }

    #[test]
    fn test_invalid_fallback_level() {
        let mut value = dataset();
        value["joy-8way"]["fallbacks"][0]["level"] = json!("great");
        let err = ControlDefRegistry::decode(&value).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEnumToken { enum_name: "ControlDefFallbackLevel", .. }));
    }
}
