//! Enums shared across monitor and machine display descriptions.

use crate::codec::enums::{number_enum, string_enum};

string_enum! {
    /// Monitor orientation.
    pub enum Orientation {
        Horizontal = ("HORIZONTAL", "horizontal"),
        Vertical = ("VERTICAL", "vertical"),
    }
}

string_enum! {
    /// Display technology of a machine's screen.
    pub enum DisplayType {
        Raster = ("RASTER", "raster"),
        Vector = ("VECTOR", "vector"),
        Lcd = ("LCD", "lcd"),
        Unknown = ("UNKNOWN", "unknown"),
    }
}

number_enum! {
    /// Screen rotation in degrees.
    pub enum DisplayRotation {
        R0 = ("R0", 0),
        R90 = ("R90", 90),
        R180 = ("R180", 180),
        R270 = ("R270", 270),
    }
}
