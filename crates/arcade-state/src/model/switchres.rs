//! Input and output documents of the switchres modeline calculator.
//!
//! The calculator itself is external. These types only describe the JSON it
//! is given (a modeline configuration plus one display per machine) and the
//! per-machine results it returns.

use crate::codec::enums::{StringEnum, string_enum};
use crate::model::common::{DisplayRotation, DisplayType};
use crate::model::modeline::ModelineConfig;

string_enum! {
    /// Display technology as the calculator names it.
    pub enum SwitchResDisplayType {
        Raster = ("RASTER", "raster"),
        Vector = ("VECTOR", "vector"),
        Lcd = ("LCD", "lcd"),
        Svg = ("SVG", "svg"),
    }
}

impl SwitchResDisplayType {
    /// Maps a machine's display type by token. `unknown` has no counterpart.
    pub fn from_display_type(display_type: DisplayType) -> Option<Self> {
        Self::get(display_type.token())
    }
}

/// One calculator request.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchResInput {
    pub config: ModelineConfig,
    pub machines: Vec<SwitchResMachineInput>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchResMachineInput {
    /// Machine name; results are keyed by it.
    pub name: String,
    pub display: SwitchResDisplay,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchResDisplay {
    pub display_type: SwitchResDisplayType,
    pub rotate: DisplayRotation,
    pub flipx: bool,
    pub refresh: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl SwitchResDisplay {
    /// Builds a calculator display from a machine's display description.
    ///
    /// Returns `None` when the display type has no calculator equivalent.
    pub fn for_machine(
        display_type: DisplayType,
        rotate: DisplayRotation,
        flipx: bool,
        refresh: f64,
    ) -> Option<Self> {
        Some(Self {
            display_type: SwitchResDisplayType::from_display_type(display_type)?,
            rotate,
            flipx,
            refresh,
            width: None,
            height: None,
        })
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// Result for one machine: a calculated modeline, or the calculator's error.
///
/// On the wire a string `err` field marks the failure arm.
#[derive(Debug, Clone, PartialEq)]
pub enum SwitchResOutput {
    Success(Box<ModelineResult>),
    Failure { err: String },
}

impl SwitchResOutput {
    pub fn result(&self) -> Option<&ModelineResult> {
        match self {
            SwitchResOutput::Success(result) => Some(result),
            SwitchResOutput::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SwitchResOutput::Success(_) => None,
            SwitchResOutput::Failure { err } => Some(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelineResult {
    /// Whether the mode fits the monitor's ranges.
    pub in_range: bool,
    pub description: String,
    /// The modeline in `xorg.conf` form.
    pub modeline_str: String,
    pub details: String,
    pub vfreq_off: bool,
    pub res_stretch: bool,
    pub weight: f64,
    pub x_scale: f64,
    pub y_scale: f64,
    pub v_scale: f64,
    pub x_diff: f64,
    pub y_diff: f64,
    pub v_diff: f64,
    pub x_ratio: f64,
    pub y_ratio: f64,
    pub v_ratio: f64,
    pub rotated: bool,
    pub modeline: Modeline,
}

/// Raw timings of a calculated mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Modeline {
    pub pclock: f64,
    pub hactive: f64,
    pub hbegin: f64,
    pub hend: f64,
    pub htotal: f64,
    pub vactive: f64,
    pub vbegin: f64,
    pub vend: f64,
    pub vtotal: f64,
    pub interlace: f64,
    pub doublescan: f64,
    pub hsync: f64,
    pub vsync: f64,
    pub vfreq: f64,
    pub hfreq: f64,
    pub width: f64,
    pub height: f64,
    pub refresh: f64,
    /// Wire field `type`.
    pub mode_type: f64,
    pub range: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::enums::duplicate_string_members;

    #[test]
    fn test_members_unique() {
        assert_eq!(duplicate_string_members::<SwitchResDisplayType>(), None);
    }

    #[test]
    fn test_display_for_machine() {
        let display = SwitchResDisplay::for_machine(
            DisplayType::Vector,
            DisplayRotation::R90,
            false,
            60.0,
        )
        .unwrap();
        assert_eq!(display.display_type, SwitchResDisplayType::Vector);
        assert_eq!(display.width, None);

        assert!(
            SwitchResDisplay::for_machine(DisplayType::Unknown, DisplayRotation::R0, false, 60.0)
                .is_none()
        );
    }
}
