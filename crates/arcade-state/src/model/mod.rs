//! In-memory state types.
//!
//! - Control definitions and the built-in registry
//! - Control panel configurations (arena of controls and button clusters)
//! - Modeline configuration and modeline calculator documents
//! - Per-component designer state

pub mod builder;
pub mod common;
pub mod control_def;
pub mod control_panel;
pub mod id;
pub mod modeline;
pub mod state;
pub mod switchres;

pub use builder::ConfigurationBuilder;
pub use common::{DisplayRotation, DisplayType, Orientation};
pub use control_def::{
    ControlDef, ControlDefFallback, ControlDefFallbackLevel, ControlDefOutput, ControlDefRegistry,
    ControlType, builtin_def, builtin_registry,
};
pub use control_panel::{
    ButtonCluster, ButtonClusterHandle, Configuration, Control, ControlHandle, ControlSet,
};
pub use id::{derived_id, legacy_control_id, new_id};
pub use modeline::ModelineConfig;
pub use state::{
    CpDesignerGroupState, CpDesignerState, GameOverrideManagerState, MonitorDesignerGroupState,
    MonitorDesignerState, NameListState, group_item_name, parse_names,
};
pub use switchres::{
    Modeline, ModelineResult, SwitchResDisplay, SwitchResDisplayType, SwitchResInput,
    SwitchResMachineInput, SwitchResOutput,
};
