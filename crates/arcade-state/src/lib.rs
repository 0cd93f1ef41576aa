//! Versioned state persistence for an arcade control panel and monitor
//! designer.
//!
//! This crate converts the designer's component state to and from JSON, with
//! an explicit schema version on every entity, decoders for each older
//! version, strict typed validation and ID reference resolution inside control
//! panel configurations.
//!
//! # Quick Start
//!
//! ```rust
//! use arcade_state::codec::{decode_cp_designer_state, encode_cp_designer_state};
//! use serde_json::json;
//!
//! let saved = json!({
//!     "__version": 2,
//!     "sCPConfig": {
//!         "controls": [{"id": "c1", "name": "P1 Joy", "type": "joy8way", "numButtons": 0, "isOnOppositeScreenSide": false}],
//!         "buttonClusters": [],
//!         "controlSets": [{"controlIds": ["c1"]}]
//!     }
//! });
//!
//! let state = decode_cp_designer_state(Some(&saved), "sCPDesignerState").unwrap();
//! let config = &state.cp_config;
//! let set = &config.control_sets()[0];
//! assert_eq!(config.set_controls(set).next().unwrap().id, "c1");
//!
//! // always written in the latest version
//! let encoded = encode_cp_designer_state(&state);
//! assert_eq!(encoded["sCPConfig"]["__version"], 2);
//! ```
//!
//! # Modules
//!
//! - [`model`]: State types (configurations, modelines, component states)
//! - [`codec`]: JSON encoding and version-dispatching decoding
//! - [`storage`]: Key-value backends and the JSON state store
//! - [`persist`]: Per-component load/save with deprecated-key migration
//! - [`error`]: Error types
//! - [`constants`]: Field names, storage keys and store versioning
//!
//! # Versioning
//!
//! Every serialized entity carries `__version`. Entities whose first version
//! predates tagging treat a missing field as version 1; newer ones require
//! it. Encoders always write the latest version, so loading and saving a
//! component migrates its stored state forward.

pub mod codec;
pub mod constants;
pub mod error;
pub mod model;
pub mod persist;
pub mod storage;

pub use error::{BuildError, DecodeError, ErrorCode, StorageError};
pub use model::{
    ButtonCluster, Configuration, ConfigurationBuilder, Control, ControlSet, ControlType,
    CpDesignerGroupState, CpDesignerState, GameOverrideManagerState, ModelineConfig,
    MonitorDesignerGroupState, MonitorDesignerState, NameListState,
};
pub use persist::{StateCodec, StateSlot, clear_state, load_state, save_state};
pub use storage::{FileStorage, MemoryStorage, StateStore, StorageBackend, StoreOptions};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
