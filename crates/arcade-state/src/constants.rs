//! Wire-format field names, store versioning and storage keys.

/// Field holding the schema version of a serialized entity.
pub const VERSION_FIELD: &str = "__version";

/// Storage key holding the store-wide state version number.
pub const STATE_VERSION_KEY: &str = "__stateVersionNum";

/// Store-wide state version written by this crate.
pub const STATE_CUR_VERSION: u32 = 4;

/// Oldest store-wide state version that is kept on open. Anything older is
/// cleared.
pub const STATE_MIN_VERSION: u32 = 4;

// =============================================================================
// COMPONENT STORAGE KEYS
// =============================================================================

pub const GAME_NAME_LIST_KEY: &str = "gameNameList";
pub const GAME_NAME_LIST_LEGACY_KEY: &str = "gameNameListInput";

pub const MACHINE_NAME_LIST_KEY: &str = "machineNameList";
pub const MACHINE_NAME_LIST_LEGACY_KEY: &str = "machineNameListInput";

pub const CP_DESIGNER_GROUP_KEY: &str = "controlPanelDesignerGroup";
pub const CP_DESIGNER_GROUP_LEGACY_KEY: &str = "controlPanelConfiguratorGroup";

/// Prefix of per-instance control panel designer keys (`<prefix>-<id>`).
pub const CP_DESIGNER_KEY_PREFIX: &str = "controlPanelDesigner";
pub const CP_DESIGNER_LEGACY_KEY_PREFIX: &str = "controlPanelConfigurator";

pub const MONITOR_DESIGNER_GROUP_KEY: &str = "monitorDesignerGroup";
pub const MONITOR_DESIGNER_GROUP_LEGACY_KEYS: &[&str] =
    &["monitorConfiguratorGroup", "monitorConfiguratorGroupItemIds"];

/// Prefix of per-instance monitor designer keys (`<prefix>-<id>`).
pub const MONITOR_DESIGNER_KEY_PREFIX: &str = "monitorDesignerModelineConfig";
pub const MONITOR_DESIGNER_LEGACY_KEY_PREFIX: &str = "monitorConfiguratorModelineConfig";

pub const GAME_OVERRIDE_MANAGER_KEY: &str = "gameOverrideManager";

/// Designer ID used by installs that only ever had one designer.
pub const SINGLE_DESIGNER_ID: &str = "__single";
