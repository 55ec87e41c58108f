//! Time keeping helpers for the face
//!
//! Clock ring angles, the hourly palette rollover and RNG seeding.

use chrono::{NaiveDateTime, Timelike};
use embedded_graphics::geometry::Angle;
use rand::{rngs::SmallRng, SeedableRng};

/// Minute of the hour on which random palettes are rerolled
pub const PALETTE_ROLLOVER_MINUTE: u32 = 0;

/// Clock format preference of the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockStyle {
    /// "H:MM"
    TwelveHour,
    /// "HH:MM"
    #[default]
    TwentyFourHour,
}

/// Sweep angles of the two clock rings, in whole degrees from 12 o'clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockAngles {
    /// Outer ring, 0–354
    pub minute: u16,
    /// Inner ring, 0–359
    pub hour: u16,
}

impl ClockAngles {
    /// Compute both ring angles for a wall-clock time.
    ///
    /// The hour ring advances continuously with the minutes instead of
    /// jumping in 30° steps.
    pub fn at(now: &NaiveDateTime) -> Self {
        Self::from_hm(now.hour(), now.minute())
    }

    /// Compute both ring angles from an hour (0–23) and minute (0–59)
    pub const fn from_hm(hour: u32, minute: u32) -> Self {
        let hour = hour % 12;
        let minute = minute % 60;

        // 360 * minute / 60
        let minute_angle = minute * 6;
        // 360 * (hour + minute / 60) / 12, kept in integers to truncate exactly
        let hour_angle = (hour * 60 + minute) / 2;

        Self {
            minute: minute_angle as u16,
            hour: hour_angle as u16,
        }
    }

    /// Outer ring sweep for a sector starting at angle 0
    pub fn minute_sweep(&self) -> Angle {
        Angle::from_degrees(self.minute as f32)
    }

    /// Inner ring sweep for a sector starting at angle 0
    pub fn hour_sweep(&self) -> Angle {
        Angle::from_degrees(self.hour as f32)
    }
}

/// Whether random palettes are due for a reroll at `now`
pub fn is_palette_rollover(now: &NaiveDateTime) -> bool {
    now.minute() == PALETTE_ROLLOVER_MINUTE
}

/// Seed the face's random generator from the wall clock
pub fn seed_rng(now: &NaiveDateTime) -> SmallRng {
    SmallRng::seed_from_u64(now.and_utc().timestamp() as u64)
}
