//! The structured time boundaries of one observing night.

use serde::{Deserialize, Serialize};

use crate::models::{ModifiedJulianDate, Period};

/// Number of instants in the common plotting time base.
pub const PLOT_GRID_LEN: usize = 100;
/// Number of instants sampling the requested observation interval.
pub const OBS_WINDOW_LEN: usize = 10;

/// Evening and morning instants of one twilight tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwilightPair {
    pub evening: ModifiedJulianDate,
    pub morning: ModifiedJulianDate,
}

/// A caller-defined sub-interval of the night, shaded on time-axis plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationBlock {
    pub start: ModifiedJulianDate,
    pub end: ModifiedJulianDate,
    /// `#rrggbb` hex color
    pub color: String,
}

/// All time boundaries derived for one night.
///
/// Computed once per run and immutable afterward. The twilight pairs nest
/// inside [sunset, sunrise] in onset order: civil starts closest to
/// sunset, astronomical ends closest to sunset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightWindow {
    pub sunset: ModifiedJulianDate,
    pub sunrise: ModifiedJulianDate,
    pub civil: TwilightPair,
    pub nautical: TwilightPair,
    pub astronomical: TwilightPair,
    /// 100 instants evenly spanning [sunset, sunrise]
    pub plot_grid: Vec<ModifiedJulianDate>,
    /// 10 instants spanning the requested observation interval, or a
    /// single instant when no end was requested
    pub obs_window: Vec<ModifiedJulianDate>,
    pub blocks: Vec<ObservationBlock>,
}

impl NightWindow {
    /// The night as a period from sunset to sunrise.
    pub fn night(&self) -> Period {
        Period::new(self.sunset, self.sunrise)
    }

    /// Hours of astronomical darkness.
    pub fn dark_hours(&self) -> f64 {
        (self.astronomical.morning.value() - self.astronomical.evening.value()) * 24.0
    }
}
