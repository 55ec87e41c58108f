//! Battery charge level
//!
//! Voltage curve based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

/// Battery charge in percent, always within 0–100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryLevel(u8);

impl BatteryLevel {
    /// Fully charged
    pub const FULL: Self = Self(100);
    /// Fully discharged
    pub const EMPTY: Self = Self(0);

    /// Create a level from a percentage, clamping values above 100
    pub const fn new(percent: u8) -> Self {
        if percent > 100 {
            Self::FULL
        } else {
            Self(percent)
        }
    }

    /// Estimate the level from the cell voltage in millivolts
    pub const fn from_millivolts(voltage: u16) -> Self {
        // Use fixed data points and linear interpolation in between
        // to estimate battery capacity.
        Self((match voltage {
            0..=3449 => 0,
            3450..=3699 => (voltage - 3450) / 5,
            3700..=4199 => 50 + (voltage - 3700) / 10,
            _ => 100,
        }) as u8)
    }

    /// Level in percent
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Scale `length` by the charge level, truncating
    pub const fn scale(self, length: u32) -> u32 {
        length * self.0 as u32 / 100
    }
}

impl Default for BatteryLevel {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<u8> for BatteryLevel {
    fn from(percent: u8) -> Self {
        Self::new(percent)
    }
}
