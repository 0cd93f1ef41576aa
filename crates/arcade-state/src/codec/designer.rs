//! Designer component state encoding and decoding.
//!
//! | State                         | Latest | Older versions                                  |
//! |-------------------------------|--------|-------------------------------------------------|
//! | control panel designer        | 2      | 1: the bare configuration (untagged)            |
//! | control panel designer group  | 2      | 1: `configuratorIds`                            |
//! | monitor designer              | 2      | 1: the bare modeline configuration (untagged)   |
//! | monitor designer group        | 3      | 1: a bare array of IDs, 2: `configuratorIds`    |
//! | game override manager         | 1      |                                                 |

use serde_json::Value;
use tracing::debug;

use crate::codec::control_panel::{decode_configuration, encode_configuration};
use crate::codec::modeline::{decode_modeline_config, encode_modeline_config};
use crate::codec::primitives::{
    JsonObject, decode_array, decode_object, decode_string, field_path, version_path,
};
use crate::codec::version::{MissingVersion, envelope, read_version, unsupported_version};
use crate::error::DecodeError;
use crate::model::{
    CpDesignerGroupState, CpDesignerState, GameOverrideManagerState, MonitorDesignerGroupState,
    MonitorDesignerState,
};

fn encode_ids(ids: &[String]) -> Value {
    Value::Array(ids.iter().map(|id| Value::from(id.as_str())).collect())
}

fn decode_ids(obj: &JsonObject, field: &str, path: &str) -> Result<Vec<String>, DecodeError> {
    decode_array(obj.get(field), &field_path(path, field), decode_string)
}

// =============================================================================
// CONTROL PANEL DESIGNER
// =============================================================================

pub fn encode_cp_designer_state(state: &CpDesignerState) -> Value {
    envelope(2, [("sCPConfig", encode_configuration(&state.cp_config))])
}

pub fn decode_cp_designer_state(
    value: Option<&Value>,
    path: &str,
) -> Result<CpDesignerState, DecodeError> {
    let obj = decode_object(value, path)?;
    let version = read_version(obj, path, MissingVersion::Legacy)?;
    debug!(path, version, "decoding control panel designer state");

    let versioned = version_path(path, version);
    match version {
        // the state was the configuration itself
        1 => Ok(CpDesignerState {
            cp_config: decode_configuration(value, &versioned)?,
        }),
        2 => Ok(CpDesignerState {
            cp_config: decode_configuration(
                obj.get("sCPConfig"),
                &field_path(&versioned, "sCPConfig"),
            )?,
        }),
        _ => Err(unsupported_version(path, version)),
    }
}

pub fn encode_cp_designer_group_state(state: &CpDesignerGroupState) -> Value {
    envelope(2, [("designerIds", encode_ids(&state.designer_ids))])
}

pub fn decode_cp_designer_group_state(
    value: Option<&Value>,
    path: &str,
) -> Result<CpDesignerGroupState, DecodeError> {
    let obj = decode_object(value, path)?;
    let version = read_version(obj, path, MissingVersion::Required)?;

    let versioned = version_path(path, version);
    let designer_ids = match version {
        1 => decode_ids(obj, "configuratorIds", &versioned)?,
        2 => decode_ids(obj, "designerIds", &versioned)?,
        _ => return Err(unsupported_version(path, version)),
    };
    Ok(CpDesignerGroupState { designer_ids })
}

// =============================================================================
// MONITOR DESIGNER
// =============================================================================

pub fn encode_monitor_designer_state(state: &MonitorDesignerState) -> Value {
    envelope(
        2,
        [("sModelineConfig", encode_modeline_config(&state.modeline_config))],
    )
}

pub fn decode_monitor_designer_state(
    value: Option<&Value>,
    path: &str,
) -> Result<MonitorDesignerState, DecodeError> {
    let obj = decode_object(value, path)?;
    let version = read_version(obj, path, MissingVersion::Legacy)?;
    debug!(path, version, "decoding monitor designer state");

    let versioned = version_path(path, version);
    match version {
        // the state was the modeline configuration itself
        1 => Ok(MonitorDesignerState {
            modeline_config: decode_modeline_config(value, &versioned)?,
        }),
        2 => Ok(MonitorDesignerState {
            modeline_config: decode_modeline_config(
                obj.get("sModelineConfig"),
                &field_path(&versioned, "sModelineConfig"),
            )?,
        }),
        _ => Err(unsupported_version(path, version)),
    }
}

pub fn encode_monitor_designer_group_state(state: &MonitorDesignerGroupState) -> Value {
    envelope(3, [("designerIds", encode_ids(&state.designer_ids))])
}

/// Decodes monitor designer group state. Version 1 was a bare array of IDs;
/// every later version is a tagged object.
pub fn decode_monitor_designer_group_state(
    value: Option<&Value>,
    path: &str,
) -> Result<MonitorDesignerGroupState, DecodeError> {
    if let Some(Value::Array(_)) = value {
        return Ok(MonitorDesignerGroupState {
            designer_ids: decode_array(value, &version_path(path, 1), decode_string)?,
        });
    }

    let obj = decode_object(value, path)?;
    let version = read_version(obj, path, MissingVersion::Required)?;

    let versioned = version_path(path, version);
    let designer_ids = match version {
        2 => decode_ids(obj, "configuratorIds", &versioned)?,
        3 => decode_ids(obj, "designerIds", &versioned)?,
        _ => return Err(unsupported_version(path, version)),
    };
    Ok(MonitorDesignerGroupState { designer_ids })
}

// =============================================================================
// GAME OVERRIDE MANAGER
// =============================================================================

pub fn encode_game_override_manager_state(_state: &GameOverrideManagerState) -> Value {
    envelope(1, std::iter::empty())
}

pub fn decode_game_override_manager_state(
    value: Option<&Value>,
    path: &str,
) -> Result<GameOverrideManagerState, DecodeError> {
    let obj = decode_object(value, path)?;
    match read_version(obj, path, MissingVersion::Required)? {
        1 => Ok(GameOverrideManagerState {}),
        version => Err(unsupported_version(path, version)),
    }
}
