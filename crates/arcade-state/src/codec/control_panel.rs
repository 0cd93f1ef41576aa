//! Control panel configuration encoding and decoding.
//!
//! Controls and button clusters are decoded before control sets, so set
//! references resolve against fully materialized collections.
//!
//! Latest wire format (configuration v2):
//!
//! ```text
//! {__version: 2, sControls: [Control], sButtonClusters: [ButtonCluster], sControlSets: [ControlSet]}
//! Control:       {__version: 2, id, name, type, numButtons, isOnOppositeScreenSide}
//! ButtonCluster: {__version: 1, id, name, numButtons, isOnOppositeScreenSide}
//! ControlSet:    {__version: 2, controlIds: [id], buttonClusterId?}
//! ```

use serde_json::Value;
use tracing::debug;

use crate::codec::enums::StringEnum;
use crate::codec::primitives::{
    JsonObject, decode_array, decode_boolean, decode_object, decode_string,
    decode_string_optional, decode_u32, field_path, version_path,
};
use crate::codec::version::{MissingVersion, envelope, read_version, unsupported_version};
use crate::error::{BuildError, DecodeError};
use crate::model::{
    ButtonCluster, ButtonClusterHandle, Configuration, ConfigurationBuilder, Control, ControlDef,
    ControlHandle, ControlSet, ControlType, builtin_def, legacy_control_id,
};

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a configuration in the latest wire format.
pub fn encode_configuration(config: &Configuration) -> Value {
    envelope(
        2,
        [
            (
                "sControls",
                Value::Array(config.controls().iter().map(encode_control).collect()),
            ),
            (
                "sButtonClusters",
                Value::Array(config.button_clusters().iter().map(encode_button_cluster).collect()),
            ),
            (
                "sControlSets",
                Value::Array(
                    config
                        .control_sets()
                        .iter()
                        .map(|set| encode_control_set(config, set))
                        .collect(),
                ),
            ),
        ],
    )
}

pub fn encode_control(control: &Control) -> Value {
    envelope(
        2,
        [
            ("id", Value::from(control.id.as_str())),
            ("name", Value::from(control.name.as_str())),
            ("type", control.control_type().serialize()),
            ("numButtons", Value::from(control.num_buttons)),
            ("isOnOppositeScreenSide", Value::from(control.is_on_opposite_screen_side)),
        ],
    )
}

pub fn encode_button_cluster(cluster: &ButtonCluster) -> Value {
    envelope(
        1,
        [
            ("id", Value::from(cluster.id.as_str())),
            ("name", Value::from(cluster.name.as_str())),
            ("numButtons", Value::from(cluster.num_buttons)),
            ("isOnOppositeScreenSide", Value::from(cluster.is_on_opposite_screen_side)),
        ],
    )
}

/// Encodes a control set, writing its references as IDs. The cluster field
/// is omitted when the set has no button cluster.
pub fn encode_control_set(config: &Configuration, set: &ControlSet) -> Value {
    let control_ids = config
        .set_controls(set)
        .map(|c| Value::from(c.id.as_str()))
        .collect();

    let mut fields = vec![("controlIds", Value::Array(control_ids))];
    if let Some(cluster) = config.set_button_cluster(set) {
        fields.push(("buttonClusterId", Value::from(cluster.id.as_str())));
    }
    envelope(2, fields)
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a configuration of any supported version.
///
/// An untagged configuration is version 1.
pub fn decode_configuration(
    value: Option<&Value>,
    path: &str,
) -> Result<Configuration, DecodeError> {
    let obj = decode_object(value, path)?;
    let version = read_version(obj, path, MissingVersion::Legacy)?;
    debug!(path, version, "decoding control panel configuration");

    let versioned = version_path(path, version);
    match version {
        1 => decode_configuration_v1(obj, &versioned),
        2 => decode_configuration_v2(obj, &versioned),
        _ => Err(unsupported_version(path, version)),
    }
}

/// Decodes a control type token into its built-in definition.
///
/// Accepts the canonical token and its compact spelling (`joy8way`).
pub fn decode_control_type(
    value: Option<&Value>,
    path: &str,
) -> Result<&'static ControlDef, DecodeError> {
    let token = decode_string(value, path)?;
    let control_type = ControlType::get(&token)
        .or_else(|| ControlType::from_compact_token(&token))
        .ok_or_else(|| DecodeError::InvalidEnumToken {
            path: path.to_string(),
            enum_name: ControlType::NAME,
            token: format!("'{token}'"),
        })?;

    builtin_def(control_type).ok_or_else(|| DecodeError::DanglingReference {
        path: path.to_string(),
        kind: "ControlDef",
        id: control_type.token().to_string(),
    })
}

// ===== v2 =====

fn decode_configuration_v2(obj: &JsonObject, path: &str) -> Result<Configuration, DecodeError> {
    let mut builder = ConfigurationBuilder::new();
    decode_controls(&mut builder, obj.get("sControls"), &field_path(path, "sControls"))?;
    decode_button_clusters(
        &mut builder,
        obj.get("sButtonClusters"),
        &field_path(path, "sButtonClusters"),
    )?;
    decode_control_sets(&mut builder, obj.get("sControlSets"), &field_path(path, "sControlSets"))?;
    Ok(builder.build())
}

// ===== v1 =====

// Two layouts predate version tagging. The nested one embeds the controls of
// each set in `sControlSets[i].sControls` without IDs; the flat one lists
// `controls` separately and references them from `controlSets[i].controlIds`.
fn decode_configuration_v1(obj: &JsonObject, path: &str) -> Result<Configuration, DecodeError> {
    let mut builder = ConfigurationBuilder::new();

    if obj.contains_key("sControlSets") {
        decode_button_clusters(
            &mut builder,
            obj.get("buttonClusters"),
            &field_path(path, "buttonClusters"),
        )?;
        decode_nested_control_sets(
            &mut builder,
            obj.get("sControlSets"),
            &field_path(path, "sControlSets"),
        )?;
    } else {
        decode_controls(&mut builder, obj.get("controls"), &field_path(path, "controls"))?;
        decode_button_clusters(
            &mut builder,
            obj.get("buttonClusters"),
            &field_path(path, "buttonClusters"),
        )?;
        decode_control_sets(&mut builder, obj.get("controlSets"), &field_path(path, "controlSets"))?;
    }

    Ok(builder.build())
}

fn decode_nested_control_sets(
    builder: &mut ConfigurationBuilder,
    value: Option<&Value>,
    path: &str,
) -> Result<(), DecodeError> {
    let mut set_index = 0;
    decode_array(value, path, |v, set_path| {
        let obj = decode_object(v, set_path)?;

        let controls_path = field_path(set_path, "sControls");
        let mut control_index = 0;
        let handles = decode_array(obj.get("sControls"), &controls_path, |v, control_path| {
            let control = decode_legacy_control(v, control_path, set_index, control_index)?;
            control_index += 1;
            builder
                .add_control(control)
                .map_err(|e| build_error(e, &field_path(control_path, "id")))
        })?;

        let button_cluster = resolve_button_cluster(builder, obj, set_path)?;
        builder
            .add_control_set(handles, button_cluster)
            .map_err(|e| build_error(e, set_path))?;

        set_index += 1;
        Ok(())
    })?;
    Ok(())
}

// ===== entities =====

fn decode_controls(
    builder: &mut ConfigurationBuilder,
    value: Option<&Value>,
    path: &str,
) -> Result<(), DecodeError> {
    decode_array(value, path, |v, item_path| {
        let control = decode_control(v, item_path)?;
        builder
            .add_control(control)
            .map_err(|e| build_error(e, &field_path(item_path, "id")))
    })?;
    Ok(())
}

fn decode_button_clusters(
    builder: &mut ConfigurationBuilder,
    value: Option<&Value>,
    path: &str,
) -> Result<(), DecodeError> {
    decode_array(value, path, |v, item_path| {
        let cluster = decode_button_cluster(v, item_path)?;
        builder
            .add_button_cluster(cluster)
            .map_err(|e| build_error(e, &field_path(item_path, "id")))
    })?;
    Ok(())
}

fn decode_control_sets(
    builder: &mut ConfigurationBuilder,
    value: Option<&Value>,
    path: &str,
) -> Result<(), DecodeError> {
    let sets = decode_array(value, path, |v, set_path| {
        let obj = decode_object(v, set_path)?;

        let controls = decode_array(
            obj.get("controlIds"),
            &field_path(set_path, "controlIds"),
            |v, id_path| resolve_control(builder, v, id_path),
        )?;
        let button_cluster = resolve_button_cluster(builder, obj, set_path)?;
        Ok((set_path.to_string(), controls, button_cluster))
    })?;

    for (set_path, controls, button_cluster) in sets {
        builder
            .add_control_set(controls, button_cluster)
            .map_err(|e| build_error(e, &set_path))?;
    }
    Ok(())
}

/// Decodes a control carrying its own ID. Any nested `__version` is ignored.
pub fn decode_control(value: Option<&Value>, path: &str) -> Result<Control, DecodeError> {
    let obj = decode_object(value, path)?;
    Ok(Control {
        id: decode_string(obj.get("id"), &field_path(path, "id"))?,
        name: decode_string(obj.get("name"), &field_path(path, "name"))?,
        control_def: decode_control_type(obj.get("type"), &field_path(path, "type"))?,
        num_buttons: decode_u32(obj.get("numButtons"), &field_path(path, "numButtons"))?,
        is_on_opposite_screen_side: decode_boolean(
            obj.get("isOnOppositeScreenSide"),
            &field_path(path, "isOnOppositeScreenSide"),
        )?,
    })
}

// Legacy controls had no ID. One present in the payload is kept; otherwise
// it is derived from the control's position.
fn decode_legacy_control(
    value: Option<&Value>,
    path: &str,
    set_index: usize,
    control_index: usize,
) -> Result<Control, DecodeError> {
    let obj = decode_object(value, path)?;
    let name = decode_string(obj.get("name"), &field_path(path, "name"))?;
    let id = decode_string_optional(obj.get("id"), &field_path(path, "id"))?
        .unwrap_or_else(|| legacy_control_id(set_index, control_index, &name));

    Ok(Control {
        id,
        name,
        control_def: decode_control_type(obj.get("type"), &field_path(path, "type"))?,
        num_buttons: decode_u32(obj.get("numButtons"), &field_path(path, "numButtons"))?,
        is_on_opposite_screen_side: decode_boolean(
            obj.get("isOnOppositeScreenSide"),
            &field_path(path, "isOnOppositeScreenSide"),
        )?,
    })
}

/// Decodes a button cluster. Any nested `__version` is ignored.
pub fn decode_button_cluster(
    value: Option<&Value>,
    path: &str,
) -> Result<ButtonCluster, DecodeError> {
    let obj = decode_object(value, path)?;
    Ok(ButtonCluster {
        id: decode_string(obj.get("id"), &field_path(path, "id"))?,
        name: decode_string(obj.get("name"), &field_path(path, "name"))?,
        num_buttons: decode_u32(obj.get("numButtons"), &field_path(path, "numButtons"))?,
        is_on_opposite_screen_side: decode_boolean(
            obj.get("isOnOppositeScreenSide"),
            &field_path(path, "isOnOppositeScreenSide"),
        )?,
    })
}

// ===== references =====

fn resolve_control(
    builder: &ConfigurationBuilder,
    value: Option<&Value>,
    path: &str,
) -> Result<ControlHandle, DecodeError> {
    let id = decode_string(value, path)?;
    builder
        .control_handle(&id)
        .ok_or_else(|| DecodeError::DanglingReference {
            path: path.to_string(),
            kind: "Control",
            id,
        })
}

fn resolve_button_cluster(
    builder: &ConfigurationBuilder,
    set: &JsonObject,
    set_path: &str,
) -> Result<Option<ButtonClusterHandle>, DecodeError> {
    let path = field_path(set_path, "buttonClusterId");
    let Some(id) = decode_string_optional(set.get("buttonClusterId"), &path)? else {
        return Ok(None);
    };
    builder
        .button_cluster_handle(&id)
        .map(Some)
        .ok_or(DecodeError::DanglingReference {
            path,
            kind: "ButtonCluster",
            id,
        })
}

fn build_error(err: BuildError, path: &str) -> DecodeError {
    match err {
        BuildError::DuplicateId { kind, id } => DecodeError::DuplicateId {
            path: path.to_string(),
            kind,
            id,
        },
        BuildError::HandleOutOfBounds { kind, index, .. } => DecodeError::DanglingReference {
            path: path.to_string(),
            kind,
            id: index.to_string(),
        },
    }
}
