//! JSON encoding/decoding of persisted state.
//!
//! Encoders always emit the latest version of an entity. Decoders read
//! `__version`, dispatch to the decoder for that version and lift older
//! shapes forward.

pub mod control_def;
pub mod control_panel;
pub mod designer;
pub mod enums;
pub mod modeline;
pub mod name_list;
pub mod primitives;
pub mod switchres;
pub mod version;

pub use control_def::{decode_control_def, decode_control_defs};
pub use control_panel::{
    decode_button_cluster, decode_configuration, decode_control, decode_control_type,
    encode_button_cluster, encode_configuration, encode_control, encode_control_set,
};
pub use designer::{
    decode_cp_designer_group_state, decode_cp_designer_state, decode_game_override_manager_state,
    decode_monitor_designer_group_state, decode_monitor_designer_state,
    encode_cp_designer_group_state, encode_cp_designer_state, encode_game_override_manager_state,
    encode_monitor_designer_group_state, encode_monitor_designer_state,
};
pub use enums::{NumberEnum, StringEnum};
pub use modeline::{decode_modeline_config, encode_modeline_config};
pub use name_list::{decode_name_list_state, encode_name_list_state};
pub use primitives::{JsonObject, parse_json};
pub use switchres::{
    decode_modeline, decode_switchres_output, decode_switchres_output_map,
    encode_switchres_config, encode_switchres_display, encode_switchres_input,
    encode_switchres_machine_input, parse_switchres_output,
};
pub use version::{MissingVersion, read_version};
