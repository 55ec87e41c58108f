//! 64-color palette type used by the watch face
//!
//! Colors are opaque with two bits per channel, encoded as `0b11rrggbb`.
//! [`Color`] implements the embedded-graphics color traits so a renderer can
//! draw with it directly or convert it into the panel's native format.

use embedded_graphics::pixelcolor::{
    raw::{RawData, RawU8},
    PixelColor, Rgb565, Rgb888, RgbColor,
};

/// Alpha bits of every opaque color
const OPAQUE: u8 = 0b1100_0000;
/// Maximum value of a single channel
const CHANNEL_MAX: u8 = 0b11;
/// Scale factor from a 2-bit channel to an 8-bit channel
const CHANNEL_SCALE: u8 = 0xff / CHANNEL_MAX;

/// Luminance at or above which dark text is used
const LEGIBILITY_THRESHOLD: u32 = 1500;

/// Opaque 6-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(u8);

impl Color {
    /// Create a color from 2-bit channels. Higher bits are ignored.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(
            OPAQUE
                | (r & CHANNEL_MAX) << 4
                | (g & CHANNEL_MAX) << 2
                | (b & CHANNEL_MAX),
        )
    }

    /// Create a color from its 6-bit index (`0b00rrggbb`).
    pub const fn from_index(index: u8) -> Self {
        Self(OPAQUE | (index & 0b0011_1111))
    }

    /// Create a color from a packed `0x??RRGGBB` integer.
    ///
    /// Each 8-bit channel is reduced to its top two bits; the highest byte
    /// is ignored.
    pub const fn from_hex(hex: u32) -> Self {
        let r = (hex >> 16) as u8;
        let g = (hex >> 8) as u8;
        let b = hex as u8;
        Self::new(r >> 6, g >> 6, b >> 6)
    }

    /// Packed `0xRRGGBB` representation
    pub const fn to_hex(self) -> u32 {
        let r = (self.red() * CHANNEL_SCALE) as u32;
        let g = (self.green() * CHANNEL_SCALE) as u32;
        let b = (self.blue() * CHANNEL_SCALE) as u32;
        r << 16 | g << 8 | b
    }

    /// Encoded `0b11rrggbb` byte
    pub const fn argb(self) -> u8 {
        self.0
    }

    /// 6-bit index without the alpha bits
    pub const fn index(self) -> u8 {
        self.0 & 0b0011_1111
    }

    const fn red(self) -> u8 {
        (self.0 >> 4) & CHANNEL_MAX
    }

    const fn green(self) -> u8 {
        (self.0 >> 2) & CHANNEL_MAX
    }

    const fn blue(self) -> u8 {
        self.0 & CHANNEL_MAX
    }

    /// Weighted luminance, 0 for black up to 3000 for white
    pub const fn luminance(self) -> u32 {
        299 * self.red() as u32 + 587 * self.green() as u32 + 114 * self.blue() as u32
    }

    /// Text color that stays readable when drawn over `self`
    pub const fn legible_over(self) -> Self {
        if self.luminance() >= LEGIBILITY_THRESHOLD {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }
}

impl PixelColor for Color {
    type Raw = RawU8;
}

impl From<RawU8> for Color {
    fn from(raw: RawU8) -> Self {
        Self::from_index(raw.into_inner())
    }
}

impl From<Color> for RawU8 {
    fn from(color: Color) -> Self {
        RawU8::new(color.0)
    }
}

impl RgbColor for Color {
    fn r(&self) -> u8 {
        self.red()
    }

    fn g(&self) -> u8 {
        self.green()
    }

    fn b(&self) -> u8 {
        self.blue()
    }

    const MAX_R: u8 = CHANNEL_MAX;
    const MAX_G: u8 = CHANNEL_MAX;
    const MAX_B: u8 = CHANNEL_MAX;

    const BLACK: Self = Self::new(0, 0, 0);
    const RED: Self = Self::new(3, 0, 0);
    const GREEN: Self = Self::new(0, 3, 0);
    const BLUE: Self = Self::new(0, 0, 3);
    const YELLOW: Self = Self::new(3, 3, 0);
    const MAGENTA: Self = Self::new(3, 0, 3);
    const CYAN: Self = Self::new(0, 3, 3);
    const WHITE: Self = Self::new(3, 3, 3);
}

impl From<Color> for Rgb888 {
    fn from(color: Color) -> Self {
        Rgb888::new(
            color.red() * CHANNEL_SCALE,
            color.green() * CHANNEL_SCALE,
            color.blue() * CHANNEL_SCALE,
        )
    }
}

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        Rgb888::from(color).into()
    }
}
