//! Monitor modeline configuration.

use crate::model::common::Orientation;

/// Settings used to calculate modelines for a monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelineConfig {
    /// Monitor preset name, e.g. `generic_15`, or `custom`.
    pub preset: String,
    pub orientation: Orientation,
    /// Custom monitor ranges, one switchres range string per entry.
    pub ranges: Vec<String>,
    pub allow_interlaced: bool,
    pub allow_doublescan: bool,
}

impl Default for ModelineConfig {
    fn default() -> Self {
        Self {
            preset: "generic_15".to_string(),
            orientation: Orientation::Horizontal,
            ranges: Vec::new(),
            allow_interlaced: true,
            allow_doublescan: true,
        }
    }
}
