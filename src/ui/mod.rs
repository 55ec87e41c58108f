//! UI definitions module
//!
//! Everything the renderer needs for one frame is collected in
//! [`RenderInput`]; the drawing itself happens in the firmware.

use crate::system::time::ClockAngles;

pub mod color;
pub mod complication;
pub mod palette;
pub mod watchface;

use color::Color;
use complication::ComplicationText;

/// Gap between the two rings in pixels
pub const GAP_WIDTH: u32 = 1;

/// Size of the (square) face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceGeometry {
    /// Width of the face in pixels
    pub width: u32,
}

impl Default for FaceGeometry {
    fn default() -> Self {
        // PineTime panel
        Self { width: 240 }
    }
}

impl FaceGeometry {
    /// Thickness of each ring
    pub const fn ring_thickness(&self) -> u32 {
        (self.width / 6).saturating_sub(GAP_WIDTH)
    }

    /// Inset of the inner ring from the face edge
    pub const fn inner_ring_inset(&self) -> u32 {
        self.width / 6
    }

    /// Half length of a full center line
    pub const fn max_center_half_length(&self) -> u32 {
        self.width / 6
    }
}

/// Values drawn in one frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderInput {
    pub background: Color,
    pub foreground: Color,
    pub line_one: ComplicationText,
    pub line_two: ComplicationText,
    pub angles: ClockAngles,
    /// Half length of the center line, `None` when it is hidden
    pub center_line_half_length: Option<u32>,
    pub show_disconnect_icon: bool,
    pub geometry: FaceGeometry,
}
