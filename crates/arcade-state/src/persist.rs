//! Loading and saving component state through a [`StateStore`].
//!
//! Each component's state lives in one [`StateSlot`]. Loading reads the slot
//! with its deprecated-key fallback and decodes the value; a value that fails
//! to decode is logged and treated as no saved state.

use serde_json::Value;
use tracing::{debug, error};

use crate::codec;
use crate::constants::{
    CP_DESIGNER_GROUP_KEY, CP_DESIGNER_GROUP_LEGACY_KEY, CP_DESIGNER_KEY_PREFIX,
    CP_DESIGNER_LEGACY_KEY_PREFIX, GAME_NAME_LIST_KEY, GAME_NAME_LIST_LEGACY_KEY,
    GAME_OVERRIDE_MANAGER_KEY, MACHINE_NAME_LIST_KEY, MACHINE_NAME_LIST_LEGACY_KEY,
    MONITOR_DESIGNER_GROUP_KEY, MONITOR_DESIGNER_GROUP_LEGACY_KEYS, MONITOR_DESIGNER_KEY_PREFIX,
    MONITOR_DESIGNER_LEGACY_KEY_PREFIX,
};
use crate::error::{DecodeError, StorageError};
use crate::model::{
    CpDesignerGroupState, CpDesignerState, GameOverrideManagerState, MonitorDesignerGroupState,
    MonitorDesignerState, NameListState,
};
use crate::storage::{StateStore, StorageBackend};

/// A state type with a versioned JSON form.
pub trait StateCodec: Sized {
    /// Encodes in the latest version.
    fn encode(&self) -> Value;

    /// Decodes any supported version. `path` labels the root in errors.
    fn decode(value: &Value, path: &str) -> Result<Self, DecodeError>;
}

macro_rules! impl_state_codec {
    ($ty:ty, $encode:path, $decode:path) => {
        impl StateCodec for $ty {
            fn encode(&self) -> Value {
                $encode(self)
            }

            fn decode(value: &Value, path: &str) -> Result<Self, DecodeError> {
                $decode(Some(value), path)
            }
        }
    };
}

impl_state_codec!(
    CpDesignerState,
    codec::encode_cp_designer_state,
    codec::decode_cp_designer_state
);
impl_state_codec!(
    CpDesignerGroupState,
    codec::encode_cp_designer_group_state,
    codec::decode_cp_designer_group_state
);
impl_state_codec!(
    MonitorDesignerState,
    codec::encode_monitor_designer_state,
    codec::decode_monitor_designer_state
);
impl_state_codec!(
    MonitorDesignerGroupState,
    codec::encode_monitor_designer_group_state,
    codec::decode_monitor_designer_group_state
);
impl_state_codec!(
    NameListState,
    codec::encode_name_list_state,
    codec::decode_name_list_state
);
impl_state_codec!(
    GameOverrideManagerState,
    codec::encode_game_override_manager_state,
    codec::decode_game_override_manager_state
);

/// Where a component's state is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSlot {
    pub key: String,
    /// Keys used by earlier releases, tried in order when `key` is absent.
    pub legacy_keys: Vec<String>,
    /// Root path label in decode errors.
    pub label: &'static str,
    /// Human-readable component name for log messages.
    pub description: String,
}

impl StateSlot {
    pub fn game_name_list() -> Self {
        Self {
            key: GAME_NAME_LIST_KEY.to_string(),
            legacy_keys: vec![GAME_NAME_LIST_LEGACY_KEY.to_string()],
            label: "sGameNameListState",
            description: "Game Name List".to_string(),
        }
    }

    pub fn machine_name_list() -> Self {
        Self {
            key: MACHINE_NAME_LIST_KEY.to_string(),
            legacy_keys: vec![MACHINE_NAME_LIST_LEGACY_KEY.to_string()],
            label: "sMachineNameListState",
            description: "Machine Name List".to_string(),
        }
    }

    pub fn cp_designer_group() -> Self {
        Self {
            key: CP_DESIGNER_GROUP_KEY.to_string(),
            legacy_keys: vec![CP_DESIGNER_GROUP_LEGACY_KEY.to_string()],
            label: "sCPDesignerGroupState",
            description: "Control Panel Designer Group".to_string(),
        }
    }

    pub fn cp_designer(id: &str) -> Self {
        Self {
            key: format!("{CP_DESIGNER_KEY_PREFIX}-{id}"),
            legacy_keys: vec![format!("{CP_DESIGNER_LEGACY_KEY_PREFIX}-{id}")],
            label: "sCPDesignerState",
            description: format!("Control Panel Designer '{id}'"),
        }
    }

    pub fn monitor_designer_group() -> Self {
        Self {
            key: MONITOR_DESIGNER_GROUP_KEY.to_string(),
            legacy_keys: MONITOR_DESIGNER_GROUP_LEGACY_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            label: "sMonitorDesignerGroupState",
            description: "Monitor Designer Group".to_string(),
        }
    }

    pub fn monitor_designer(id: &str) -> Self {
        Self {
            key: format!("{MONITOR_DESIGNER_KEY_PREFIX}-{id}"),
            legacy_keys: vec![format!("{MONITOR_DESIGNER_LEGACY_KEY_PREFIX}-{id}")],
            label: "sMonitorDesignerState",
            description: format!("Monitor Designer '{id}'"),
        }
    }

    pub fn game_override_manager() -> Self {
        Self {
            key: GAME_OVERRIDE_MANAGER_KEY.to_string(),
            legacy_keys: Vec::new(),
            label: "sGameOverrideManagerState",
            description: "Game Override Manager".to_string(),
        }
    }

    fn legacy_key_refs(&self) -> Vec<&str> {
        self.legacy_keys.iter().map(String::as_str).collect()
    }
}

/// Loads and decodes a slot's state.
///
/// Returns `Ok(None)` when nothing is stored or the stored value does not
/// decode. Only storage failures are errors.
pub fn load_state<S, B>(store: &mut StateStore<B>, slot: &StateSlot) -> Result<Option<S>, StorageError>
where
    S: StateCodec,
    B: StorageBackend,
{
    let legacy = slot.legacy_key_refs();
    let Some(value) = store.get_with_deprecated_fallback(&slot.key, &legacy)? else {
        debug!(key = %slot.key, "no saved state");
        return Ok(None);
    };

    match S::decode(&value, slot.label) {
        Ok(state) => Ok(Some(state)),
        Err(e) => {
            error!(
                key = %slot.key,
                code = e.code().code(),
                "error deserializing {} state: {e}",
                slot.description
            );
            Ok(None)
        }
    }
}

/// Encodes and stores a slot's state.
pub fn save_state<S, B>(store: &mut StateStore<B>, slot: &StateSlot, state: &S) -> Result<(), StorageError>
where
    S: StateCodec,
    B: StorageBackend,
{
    store.set(&slot.key, state.encode())
}

/// Removes a slot's state.
pub fn clear_state<B: StorageBackend>(
    store: &mut StateStore<B>,
    slot: &StateSlot,
) -> Result<(), StorageError> {
    store.remove(&[slot.key.as_str()])
}
