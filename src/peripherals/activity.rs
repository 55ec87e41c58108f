//! Daily activity totals reported by the health data source

/// Feet per meter
pub const FEET_PER_METER: f64 = 3.28084;

/// Cumulative activity totals for the current day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActivitySnapshot {
    /// Steps taken today
    pub steps: u32,
    /// Distance walked today in meters
    pub meters: u32,
    /// Active kilocalories burned today
    pub calories: u32,
}

impl ActivitySnapshot {
    /// Distance walked today in whole feet, truncated
    pub fn feet(&self) -> u32 {
        libm::trunc(self.meters as f64 * FEET_PER_METER) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feet_are_truncated() {
        let activity = ActivitySnapshot {
            meters: 100,
            ..Default::default()
        };
        assert_eq!(activity.feet(), 328);

        // 6.56 ft
        let activity = ActivitySnapshot {
            meters: 2,
            ..Default::default()
        };
        assert_eq!(activity.feet(), 6);
    }

    #[test]
    fn no_distance_is_zero_feet() {
        assert_eq!(ActivitySnapshot::default().feet(), 0);
    }
}
