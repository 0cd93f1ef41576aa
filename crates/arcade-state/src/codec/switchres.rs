//! Modeline calculator request encoding and result decoding.
//!
//! Neither document carries `__version`: both are exchanged with the
//! calculator in one call and never persisted.

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use crate::codec::enums::{NumberEnum, StringEnum};
use crate::codec::primitives::{
    JsonObject, decode_boolean, decode_map, decode_number, decode_object, decode_string,
    field_path, parse_json,
};
use crate::error::DecodeError;
use crate::model::{
    Modeline, ModelineConfig, ModelineResult, SwitchResDisplay, SwitchResInput,
    SwitchResMachineInput, SwitchResOutput,
};

/// Path label of a decoded result map.
const OUTPUT_MAP_PATH: &str = "sOutputMap";

pub fn encode_switchres_input(input: &SwitchResInput) -> Value {
    let mut obj = Map::new();
    obj.insert("config".into(), encode_switchres_config(&input.config));
    obj.insert(
        "machines".into(),
        Value::Array(input.machines.iter().map(encode_switchres_machine_input).collect()),
    );
    Value::Object(obj)
}

/// The modeline configuration as the calculator takes it: the persisted
/// fields without a version tag.
pub fn encode_switchres_config(config: &ModelineConfig) -> Value {
    let mut obj = Map::new();
    obj.insert("preset".into(), Value::from(config.preset.as_str()));
    obj.insert("orientation".into(), config.orientation.serialize());
    obj.insert(
        "ranges".into(),
        Value::Array(config.ranges.iter().map(|r| Value::from(r.as_str())).collect()),
    );
    obj.insert("allowInterlaced".into(), Value::from(config.allow_interlaced));
    obj.insert("allowDoublescan".into(), Value::from(config.allow_doublescan));
    Value::Object(obj)
}

pub fn encode_switchres_machine_input(machine: &SwitchResMachineInput) -> Value {
    let mut obj = Map::new();
    obj.insert("name".into(), Value::from(machine.name.as_str()));
    obj.insert("display".into(), encode_switchres_display(&machine.display));
    Value::Object(obj)
}

/// `width` and `height` are omitted when unknown.
pub fn encode_switchres_display(display: &SwitchResDisplay) -> Value {
    let mut obj = Map::new();
    obj.insert("type".into(), display.display_type.serialize());
    obj.insert("rotate".into(), display.rotate.serialize());
    obj.insert("flipx".into(), Value::from(display.flipx));
    obj.insert("refresh".into(), Value::from(display.refresh));
    if let Some(width) = display.width {
        obj.insert("width".into(), Value::from(width));
    }
    if let Some(height) = display.height {
        obj.insert("height".into(), Value::from(height));
    }
    Value::Object(obj)
}

/// Parses the calculator's raw output: an object of results keyed by machine
/// name.
pub fn parse_switchres_output(text: &str) -> Result<FxHashMap<String, SwitchResOutput>, DecodeError> {
    let value = parse_json(text, OUTPUT_MAP_PATH)?;
    decode_switchres_output_map(Some(&value), OUTPUT_MAP_PATH)
}

pub fn decode_switchres_output_map(
    value: Option<&Value>,
    path: &str,
) -> Result<FxHashMap<String, SwitchResOutput>, DecodeError> {
    decode_map(value, path, |entry, entry_path, _| {
        decode_switchres_output(entry, entry_path)
    })
}

/// Decodes one machine's result. A string `err` field selects the failure
/// arm; anything else must be a complete success.
pub fn decode_switchres_output(
    value: Option<&Value>,
    path: &str,
) -> Result<SwitchResOutput, DecodeError> {
    let obj = decode_object(value, path)?;
    if let Some(Value::String(_)) = obj.get("err") {
        let err = decode_string(obj.get("err"), &field_path(path, "err"))?;
        return Ok(SwitchResOutput::Failure { err });
    }
    let result = decode_modeline_result(obj, path)?;
    Ok(SwitchResOutput::Success(Box::new(result)))
}

fn decode_modeline_result(obj: &JsonObject, path: &str) -> Result<ModelineResult, DecodeError> {
    let boolean = |name: &str| decode_boolean(obj.get(name), &field_path(path, name));
    let string = |name: &str| decode_string(obj.get(name), &field_path(path, name));
    let number = |name: &str| decode_number(obj.get(name), &field_path(path, name));

    Ok(ModelineResult {
        in_range: boolean("inRange")?,
        description: string("description")?,
        modeline_str: string("modelineStr")?,
        details: string("details")?,
        vfreq_off: boolean("vfreqOff")?,
        res_stretch: boolean("resStretch")?,
        weight: number("weight")?,
        x_scale: number("xScale")?,
        y_scale: number("yScale")?,
        v_scale: number("vScale")?,
        x_diff: number("xDiff")?,
        y_diff: number("yDiff")?,
        v_diff: number("vDiff")?,
        x_ratio: number("xRatio")?,
        y_ratio: number("yRatio")?,
        v_ratio: number("vRatio")?,
        rotated: boolean("rotated")?,
        modeline: decode_modeline(obj.get("modeline"), &field_path(path, "modeline"))?,
    })
}

pub fn decode_modeline(value: Option<&Value>, path: &str) -> Result<Modeline, DecodeError> {
    let obj = decode_object(value, path)?;
    let number = |name: &str| decode_number(obj.get(name), &field_path(path, name));

    Ok(Modeline {
        pclock: number("pclock")?,
        hactive: number("hactive")?,
        hbegin: number("hbegin")?,
        hend: number("hend")?,
        htotal: number("htotal")?,
        vactive: number("vactive")?,
        vbegin: number("vbegin")?,
        vend: number("vend")?,
        vtotal: number("vtotal")?,
        interlace: number("interlace")?,
        doublescan: number("doublescan")?,
        hsync: number("hsync")?,
        vsync: number("vsync")?,
        vfreq: number("vfreq")?,
        hfreq: number("hfreq")?,
        width: number("width")?,
        height: number("height")?,
        refresh: number("refresh")?,
        mode_type: number("type")?,
        range: number("range")?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorCode;
    use crate::model::{DisplayRotation, DisplayType, Orientation, SwitchResDisplayType};

    fn modeline_json() -> Value {
        json!({
            "pclock": 6_700_000, "hactive": 256, "hbegin": 264, "hend": 288, "htotal": 336,
            "vactive": 224, "vbegin": 235, "vend": 238, "vtotal": 264,
            "interlace": 0, "doublescan": 0, "hsync": 0, "vsync": 0,
            "vfreq": 60.606, "hfreq": 15_940.47, "width": 256, "height": 224,
            "refresh": 60, "type": 4, "range": 0
        })
    }

    fn success_json() -> Value {
        json!({
            "inRange": true,
            "description": "256x224@60.61",
            "modelineStr": "\"256x224_60 15.940KHz 60.606Hz\" 6.70 256 264 288 336 224 235 238 264 -hsync -vsync",
            "details": "",
            "vfreqOff": false,
            "resStretch": false,
            "weight": 0,
            "xScale": 1, "yScale": 1, "vScale": 1,
            "xDiff": 0, "yDiff": 0, "vDiff": 0.01,
            "xRatio": 1, "yRatio": 1, "vRatio": 1,
            "rotated": false,
            "modeline": modeline_json()
        })
    }

    #[test]
    fn test_encode_input() {
        let display =
            SwitchResDisplay::for_machine(DisplayType::Raster, DisplayRotation::R270, true, 60.0)
                .unwrap();
        let input = SwitchResInput {
            config: ModelineConfig {
                orientation: Orientation::Vertical,
                ..ModelineConfig::default()
            },
            machines: vec![
                SwitchResMachineInput {
                    name: "galaga".into(),
                    display: display.clone().with_size(224.0, 288.0),
                },
                SwitchResMachineInput {
                    name: "tempest".into(),
                    display: SwitchResDisplay {
                        display_type: SwitchResDisplayType::Vector,
                        rotate: DisplayRotation::R0,
                        ..display
                    },
                },
            ],
        };

        assert_eq!(
            encode_switchres_input(&input),
            json!({
                "config": {
                    "preset": "generic_15",
                    "orientation": "vertical",
                    "ranges": [],
                    "allowInterlaced": true,
                    "allowDoublescan": true
                },
                "machines": [
                    {"name": "galaga", "display": {
                        "type": "raster", "rotate": 270, "flipx": true,
                        "refresh": 60.0, "width": 224.0, "height": 288.0
                    }},
                    {"name": "tempest", "display": {
                        "type": "vector", "rotate": 0, "flipx": true, "refresh": 60.0
                    }}
                ]
            })
        );
    }

    #[test]
    fn test_decode_success() {
        let output = decode_switchres_output(Some(&success_json()), "o").unwrap();
        let result = output.result().unwrap();
        assert!(result.in_range);
        assert_eq!(result.description, "256x224@60.61");
        assert_eq!(result.v_diff, 0.01);
        assert_eq!(result.modeline.hactive, 256.0);
        assert_eq!(result.modeline.mode_type, 4.0);
        assert_eq!(output.error(), None);
    }

    #[test]
    fn test_decode_failure() {
        let output = decode_switchres_output(Some(&json!({"err": "out of range"})), "o").unwrap();
        assert_eq!(output, SwitchResOutput::Failure { err: "out of range".into() });
        assert!(output.result().is_none());
    }

    #[test]
    fn test_non_string_err_is_not_failure() {
        // only a string err selects the failure arm
        let err = decode_switchres_output(Some(&json!({"err": 1})), "o").unwrap_err();
        assert_eq!(err.code(), ErrorCode::TypeMismatch);
        assert_eq!(err.path(), "o.inRange");
    }

    #[test]
    fn test_missing_modeline_field_path() {
        let mut value = success_json();
        value["modeline"]
            .as_object_mut()
            .unwrap()
            .remove("vtotal");
        let err = decode_switchres_output(Some(&value), "o").unwrap_err();
        assert_eq!(err.path(), "o.modeline.vtotal");
    }

    #[test]
    fn test_parse_output_map() {
        let text = json!({
            "galaga": success_json(),
            "tempest": {"err": "vector displays are not supported"}
        })
        .to_string();
        let outputs = parse_switchres_output(&text).unwrap();
        assert_eq!(outputs.len(), 2);
        assert!(outputs["galaga"].result().is_some());
        assert_eq!(outputs["tempest"].error(), Some("vector displays are not supported"));

        let err = parse_switchres_output(r#"{"galaga": {"err": false}}"#).unwrap_err();
        assert_eq!(err.path(), "sOutputMap['galaga'].inRange");

        let err = parse_switchres_output("not json").unwrap_err();
        assert_eq!(err.code(), ErrorCode::MalformedJson);
    }
}
