//! Control panel configuration.
//!
//! A [`Configuration`] owns its controls and button clusters. Control sets
//! refer to them by handle, an index into the owning configuration's arena.
//! Handles are produced by [`ConfigurationBuilder`](super::ConfigurationBuilder)
//! or by the decoder and are only meaningful for the configuration they came
//! from.

use crate::model::control_def::{ControlDef, ControlType};
use crate::model::id::new_id;

/// A physical control on the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    /// Unique within its configuration.
    pub id: String,
    pub name: String,
    pub control_def: &'static ControlDef,
    pub num_buttons: u32,
    pub is_on_opposite_screen_side: bool,
}

impl Control {
    /// Creates a control with a fresh random ID.
    pub fn new(
        name: impl Into<String>,
        control_def: &'static ControlDef,
        num_buttons: u32,
        is_on_opposite_screen_side: bool,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            control_def,
            num_buttons,
            is_on_opposite_screen_side,
        }
    }

    pub fn control_type(&self) -> ControlType {
        self.control_def.control_type
    }
}

/// A group of plain buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonCluster {
    /// Unique within its configuration.
    pub id: String,
    pub name: String,
    pub num_buttons: u32,
    pub is_on_opposite_screen_side: bool,
}

impl ButtonCluster {
    /// Creates a button cluster with a fresh random ID.
    pub fn new(name: impl Into<String>, num_buttons: u32, is_on_opposite_screen_side: bool) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            num_buttons,
            is_on_opposite_screen_side,
        }
    }
}

/// Index of a [`Control`] in its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlHandle(pub(crate) usize);

impl ControlHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of a [`ButtonCluster`] in its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonClusterHandle(pub(crate) usize);

impl ButtonClusterHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Controls and an optional button cluster used together, e.g. by one player.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlSet {
    pub controls: Vec<ControlHandle>,
    pub button_cluster: Option<ButtonClusterHandle>,
}

/// A complete control panel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Configuration {
    pub(crate) controls: Vec<Control>,
    pub(crate) button_clusters: Vec<ButtonCluster>,
    pub(crate) control_sets: Vec<ControlSet>,
}

impl Configuration {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn button_clusters(&self) -> &[ButtonCluster] {
        &self.button_clusters
    }

    pub fn control_sets(&self) -> &[ControlSet] {
        &self.control_sets
    }

    pub fn control(&self, handle: ControlHandle) -> Option<&Control> {
        self.controls.get(handle.0)
    }

    pub fn button_cluster(&self, handle: ButtonClusterHandle) -> Option<&ButtonCluster> {
        self.button_clusters.get(handle.0)
    }

    /// Finds a control by ID.
    pub fn control_by_id(&self, id: &str) -> Option<(ControlHandle, &Control)> {
        self.controls
            .iter()
            .enumerate()
            .find(|(_, c)| c.id == id)
            .map(|(i, c)| (ControlHandle(i), c))
    }

    /// Finds a button cluster by ID.
    pub fn button_cluster_by_id(&self, id: &str) -> Option<(ButtonClusterHandle, &ButtonCluster)> {
        self.button_clusters
            .iter()
            .enumerate()
            .find(|(_, b)| b.id == id)
            .map(|(i, b)| (ButtonClusterHandle(i), b))
    }

    /// Resolves the controls of a set, in set order.
    pub fn set_controls<'a>(&'a self, set: &'a ControlSet) -> impl Iterator<Item = &'a Control> + 'a {
        set.controls.iter().filter_map(move |h| self.control(*h))
    }

    /// Resolves the button cluster of a set.
    pub fn set_button_cluster(&self, set: &ControlSet) -> Option<&ButtonCluster> {
        set.button_cluster.and_then(|h| self.button_cluster(h))
    }

    /// Total buttons across all controls and clusters.
    ///
    /// Summed as `u64`: each count is a `u32`, so the total can exceed it.
    pub fn total_buttons(&self) -> u64 {
        let controls: u64 = self.controls.iter().map(|c| u64::from(c.num_buttons)).sum();
        let clusters: u64 = self.button_clusters.iter().map(|b| u64::from(b.num_buttons)).sum();
        controls + clusters
    }
}
