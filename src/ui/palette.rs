//! Color modes, palette tables and background/foreground selection

use embedded_graphics::pixelcolor::RgbColor;
use rand::Rng;

use super::color::Color;

/// How the face picks its colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorMode {
    /// User-selected background and foreground
    SelectedColors,
    /// Any of the 64 displayable colors
    TrueRandom,
    /// Random pick from the dark palette
    #[default]
    Dark,
    /// Random pick from the light palette
    Light,
    /// Random pick from the hot palette
    Hot,
    /// Random pick from the cold palette
    Cold,
}

impl ColorMode {
    /// All modes, in code order
    pub const ALL: [ColorMode; 6] = [
        ColorMode::SelectedColors,
        ColorMode::TrueRandom,
        ColorMode::Dark,
        ColorMode::Light,
        ColorMode::Hot,
        ColorMode::Cold,
    ];

    /// Stable numeric code used for persistence
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Mode for a persisted code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Token used in configuration messages
    pub const fn token(self) -> &'static str {
        match self {
            ColorMode::SelectedColors => "selectedColors",
            ColorMode::TrueRandom => "trueRandom",
            ColorMode::Dark => "dark",
            ColorMode::Light => "light",
            ColorMode::Hot => "hot",
            ColorMode::Cold => "cold",
        }
    }

    /// Mode for a configuration message token
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.token() == token)
    }

    /// Whether the colors are rerolled rather than fixed by the user
    pub const fn is_randomized(self) -> bool {
        !matches!(self, ColorMode::SelectedColors)
    }

    /// Fixed palette backing this mode, if any
    pub fn palette(self) -> Option<&'static Palette> {
        match self {
            ColorMode::Dark => Some(&DARK),
            ColorMode::Light => Some(&LIGHT),
            ColorMode::Hot => Some(&HOT),
            ColorMode::Cold => Some(&COLD),
            ColorMode::SelectedColors | ColorMode::TrueRandom => None,
        }
    }
}

/// Foreground rule for a palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contrast {
    /// Same foreground for every entry
    Fixed(Color),
    /// Foreground derived from the picked background
    Legible,
}

/// Fixed set of background colors
#[derive(Debug)]
pub struct Palette {
    pub colors: &'static [Color],
    pub contrast: Contrast,
}

impl Palette {
    /// Pick a background uniformly and pair it with its foreground
    pub fn pick<R: Rng>(&self, rng: &mut R) -> (Color, Color) {
        let background = self.colors[rng.gen_range(0..self.colors.len())];
        (background, self.foreground_for(background))
    }

    /// Foreground drawn over `background`
    pub fn foreground_for(&self, background: Color) -> Color {
        match self.contrast {
            Contrast::Fixed(color) => color,
            Contrast::Legible => background.legible_over(),
        }
    }

    /// Whether `color` is one of this palette's backgrounds
    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }
}

/// Dark backgrounds with white text
pub static DARK: Palette = Palette {
    colors: &[
        Color::new(0, 0, 1), // oxford blue
        Color::new(0, 0, 2), // duke blue
        Color::new(0, 1, 0), // dark green
        Color::new(0, 1, 1), // midnight green
        Color::new(1, 0, 0), // bulgarian rose
        Color::new(1, 0, 1), // imperial purple
        Color::new(1, 1, 0), // army green
        Color::new(1, 1, 1), // dark gray
    ],
    contrast: Contrast::Fixed(Color::WHITE),
};

/// Light backgrounds with black text
pub static LIGHT: Palette = Palette {
    colors: &[
        Color::new(3, 3, 2), // pastel yellow
        Color::new(2, 3, 2), // mint green
        Color::new(2, 3, 3), // celeste
        Color::new(2, 2, 3), // baby blue eyes
        Color::new(3, 2, 3), // rich brilliant lavender
        Color::new(3, 2, 2), // melon
    ],
    contrast: Contrast::Fixed(Color::BLACK),
};

/// Reds, oranges and yellows
pub static HOT: Palette = Palette {
    colors: &[
        Color::new(3, 0, 0), // red
        Color::new(3, 1, 0), // orange
        Color::new(3, 2, 0), // chrome yellow
        Color::new(3, 0, 1), // folly
        Color::new(3, 2, 1), // rajah
        Color::new(3, 1, 1), // sunset orange
    ],
    contrast: Contrast::Legible,
};

/// Blues and cyans
pub static COLD: Palette = Palette {
    colors: &[
        Color::new(0, 0, 3), // blue
        Color::new(0, 1, 2), // cobalt blue
        Color::new(0, 2, 3), // vivid cerulean
        Color::new(0, 2, 2), // tiffany blue
        Color::new(1, 0, 2), // indigo
        Color::new(1, 3, 3), // electric blue
    ],
    contrast: Contrast::Legible,
};

/// Black text on white, used when the mode is unknown
pub const FALLBACK_COLORS: (Color, Color) = (Color::WHITE, Color::BLACK);

/// Number of displayable colors
const COLOR_COUNT: u8 = 64;

/// Resolve the `(background, foreground)` pair for a color mode.
///
/// Random modes draw from `rng`, so two calls only agree when the
/// generator is in the same state.
pub fn select<R: Rng>(
    mode: ColorMode,
    background: Color,
    foreground: Color,
    rng: &mut R,
) -> (Color, Color) {
    match mode {
        ColorMode::SelectedColors => (background, foreground),
        ColorMode::TrueRandom => {
            let background = Color::from_index(rng.gen_range(0..COLOR_COUNT));
            (background, background.legible_over())
        }
        ColorMode::Dark => DARK.pick(rng),
        ColorMode::Light => LIGHT.pick(rng),
        ColorMode::Hot => HOT.pick(rng),
        ColorMode::Cold => COLD.pick(rng),
    }
}

/// Like [`select`], for a raw mode code that may not name a mode
pub fn select_code<R: Rng>(
    code: u8,
    background: Color,
    foreground: Color,
    rng: &mut R,
) -> (Color, Color) {
    match ColorMode::from_code(code) {
        Some(mode) => select(mode, background, foreground, rng),
        None => FALLBACK_COLORS,
    }
}
