//! Builder API for constructing configurations.
//!
//! # Example
//!
//! ```rust
//! use arcade_state::model::{ButtonCluster, Control, ConfigurationBuilder, ControlType, builtin_def};
//!
//! let joy = builtin_def(ControlType::Joy8Way).unwrap();
//!
//! let mut builder = ConfigurationBuilder::new();
//! let stick = builder.add_control(Control::new("P1 Joy", joy, 0, false)).unwrap();
//! let buttons = builder.add_button_cluster(ButtonCluster::new("P1 Buttons", 6, false)).unwrap();
//! builder.add_control_set(vec![stick], Some(buttons)).unwrap();
//!
//! let config = builder.build();
//! assert_eq!(config.control_sets().len(), 1);
//! ```

use rustc_hash::FxHashMap;

use crate::error::BuildError;
use crate::model::control_panel::{
    ButtonCluster, ButtonClusterHandle, Configuration, Control, ControlHandle, ControlSet,
};

/// Builder for a [`Configuration`].
///
/// Controls and button clusters must be added before the control sets that
/// use them. IDs are checked for uniqueness as entities are added.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    config: Configuration,
    control_ids: FxHashMap<String, usize>,
    button_cluster_ids: FxHashMap<String, usize>,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a control and returns its handle.
    pub fn add_control(&mut self, control: Control) -> Result<ControlHandle, BuildError> {
        if self.control_ids.contains_key(&control.id) {
            return Err(BuildError::DuplicateId {
                kind: "Control",
                id: control.id,
            });
        }
        let index = self.config.controls.len();
        self.control_ids.insert(control.id.clone(), index);
        self.config.controls.push(control);
        Ok(ControlHandle(index))
    }

    /// Adds a button cluster and returns its handle.
    pub fn add_button_cluster(
        &mut self,
        cluster: ButtonCluster,
    ) -> Result<ButtonClusterHandle, BuildError> {
        if self.button_cluster_ids.contains_key(&cluster.id) {
            return Err(BuildError::DuplicateId {
                kind: "ButtonCluster",
                id: cluster.id,
            });
        }
        let index = self.config.button_clusters.len();
        self.button_cluster_ids.insert(cluster.id.clone(), index);
        self.config.button_clusters.push(cluster);
        Ok(ButtonClusterHandle(index))
    }

    /// Adds a control set over already-added controls and cluster.
    pub fn add_control_set(
        &mut self,
        controls: Vec<ControlHandle>,
        button_cluster: Option<ButtonClusterHandle>,
    ) -> Result<(), BuildError> {
        let num_controls = self.config.controls.len();
        if let Some(h) = controls.iter().find(|h| h.0 >= num_controls) {
            return Err(BuildError::HandleOutOfBounds {
                kind: "Control",
                index: h.0,
                size: num_controls,
            });
        }
        if let Some(h) = button_cluster {
            let num_clusters = self.config.button_clusters.len();
            if h.0 >= num_clusters {
                return Err(BuildError::HandleOutOfBounds {
                    kind: "ButtonCluster",
                    index: h.0,
                    size: num_clusters,
                });
            }
        }
        self.config.control_sets.push(ControlSet {
            controls,
            button_cluster,
        });
        Ok(())
    }

    /// Looks up the handle of an added control by ID.
    pub fn control_handle(&self, id: &str) -> Option<ControlHandle> {
        self.control_ids.get(id).copied().map(ControlHandle)
    }

    /// Looks up the handle of an added button cluster by ID.
    pub fn button_cluster_handle(&self, id: &str) -> Option<ButtonClusterHandle> {
        self.button_cluster_ids
            .get(id)
            .copied()
            .map(ButtonClusterHandle)
    }

    pub fn build(self) -> Configuration {
        self.config
    }
}
