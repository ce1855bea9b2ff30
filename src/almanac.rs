//! Sunrise, sunset and twilight event search.
//!
//! Events are found by scanning the Sun's altitude in coarse steps away
//! from an anchor instant and bisecting the bracketing interval. A missing
//! crossing (polar day or night) is a hard error: a night report cannot be
//! built without its night.

use log::debug;

use crate::astro::sun;
use crate::error::{Error, Result};
use crate::models::{GeographicLocation, ModifiedJulianDate};

/// Altitude threshold the Sun crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarCrossing {
    /// Upper-limb rise/set: refraction plus solar semidiameter
    RiseSet,
    CivilTwilight,
    NauticalTwilight,
    AstronomicalTwilight,
}

impl SolarCrossing {
    /// Threshold altitude in degrees.
    pub fn altitude_deg(self) -> f64 {
        match self {
            SolarCrossing::RiseSet => -0.8333,
            SolarCrossing::CivilTwilight => -6.0,
            SolarCrossing::NauticalTwilight => -12.0,
            SolarCrossing::AstronomicalTwilight => -18.0,
        }
    }
}

/// Whether the body is ascending or descending through the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Setting,
}

/// Which side of the anchor to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Previous,
    Next,
}

/// Coarse scan step: 2 minutes.
const SCAN_STEP_DAYS: f64 = 2.0 / 1440.0;
/// How far from the anchor to look before giving up.
const SCAN_SPAN_DAYS: f64 = 1.2;
/// Bisection tolerance: half a second.
const BISECT_TOL_DAYS: f64 = 0.5 / 86400.0;

/// Almanac event interface: one solar threshold crossing per call.
///
/// The window builder talks to this trait so tests can substitute a
/// scripted almanac; [`SolarAlmanac`] is the real implementation.
pub trait Almanac {
    fn solar_event(
        &self,
        crossing: SolarCrossing,
        edge: Edge,
        anchor: ModifiedJulianDate,
        direction: SearchDirection,
    ) -> Result<ModifiedJulianDate>;

    fn sunset_before(&self, anchor: ModifiedJulianDate) -> Result<ModifiedJulianDate> {
        self.solar_event(
            SolarCrossing::RiseSet,
            Edge::Setting,
            anchor,
            SearchDirection::Previous,
        )
    }

    fn sunrise_after(&self, anchor: ModifiedJulianDate) -> Result<ModifiedJulianDate> {
        self.solar_event(
            SolarCrossing::RiseSet,
            Edge::Rising,
            anchor,
            SearchDirection::Next,
        )
    }

    /// Evening twilight of the given tier, before the anchor.
    fn evening_twilight(
        &self,
        crossing: SolarCrossing,
        anchor: ModifiedJulianDate,
    ) -> Result<ModifiedJulianDate> {
        self.solar_event(crossing, Edge::Setting, anchor, SearchDirection::Previous)
    }

    /// Morning twilight of the given tier, after the anchor.
    fn morning_twilight(
        &self,
        crossing: SolarCrossing,
        anchor: ModifiedJulianDate,
    ) -> Result<ModifiedJulianDate> {
        self.solar_event(crossing, Edge::Rising, anchor, SearchDirection::Next)
    }
}

/// Almanac backed by the local solar position model.
#[derive(Debug, Clone)]
pub struct SolarAlmanac {
    site: GeographicLocation,
}

impl SolarAlmanac {
    pub fn new(site: GeographicLocation) -> Self {
        Self { site }
    }

    /// Altitude of the Sun at an instant, degrees.
    pub fn sun_altitude(&self, time: ModifiedJulianDate) -> f64 {
        sun::solar_altitude(time, &self.site)
    }
}

impl Almanac for SolarAlmanac {
    fn solar_event(
        &self,
        crossing: SolarCrossing,
        edge: Edge,
        anchor: ModifiedJulianDate,
        direction: SearchDirection,
    ) -> Result<ModifiedJulianDate> {
        let found = altitude_crossing(
            |t| Some(self.sun_altitude(t)),
            crossing.altitude_deg(),
            edge,
            anchor,
            direction,
        )
        .ok_or_else(|| {
            Error::Almanac(format!(
                "no {crossing:?} {edge:?} event within {SCAN_SPAN_DAYS} days of MJD {:.5} at lat {:.4}",
                anchor.value(),
                self.site.latitude,
            ))
        })?;
        debug!(
            "{:?} {:?} at {} (threshold {} deg)",
            crossing,
            edge,
            found.iso(),
            crossing.altitude_deg()
        );
        Ok(found)
    }
}

/// Find where an altitude function crosses a threshold.
///
/// Scans in coarse steps from the anchor in the requested direction and
/// bisects the first bracketing interval. The altitude function may return
/// `None` (position unavailable at that instant); such a sample aborts the
/// search.
pub fn altitude_crossing<F>(
    altitude: F,
    threshold_deg: f64,
    edge: Edge,
    anchor: ModifiedJulianDate,
    direction: SearchDirection,
) -> Option<ModifiedJulianDate>
where
    F: Fn(ModifiedJulianDate) -> Option<f64>,
{
    let step = match direction {
        SearchDirection::Next => SCAN_STEP_DAYS,
        SearchDirection::Previous => -SCAN_STEP_DAYS,
    };
    let steps = (SCAN_SPAN_DAYS / SCAN_STEP_DAYS) as usize;

    let mut t0 = anchor.value();
    for _ in 0..steps {
        let t1 = t0 + step;
        // evaluate the bracket in forward-time order regardless of scan
        // direction, so the edge test reads the same way
        let (lo, hi) = if t1 > t0 { (t0, t1) } else { (t1, t0) };
        let a_lo = altitude(ModifiedJulianDate::new(lo))? - threshold_deg;
        let a_hi = altitude(ModifiedJulianDate::new(hi))? - threshold_deg;

        let crossed = match edge {
            Edge::Setting => a_lo > 0.0 && a_hi <= 0.0,
            Edge::Rising => a_lo < 0.0 && a_hi >= 0.0,
        };
        if crossed {
            return bisect(&altitude, threshold_deg, edge, lo, hi);
        }
        t0 = t1;
    }
    None
}

fn bisect<F>(altitude: &F, threshold_deg: f64, edge: Edge, mut lo: f64, mut hi: f64) -> Option<ModifiedJulianDate>
where
    F: Fn(ModifiedJulianDate) -> Option<f64>,
{
    while hi - lo > BISECT_TOL_DAYS {
        let mid = 0.5 * (lo + hi);
        let a_mid = altitude(ModifiedJulianDate::new(mid))? - threshold_deg;
        let crossing_in_upper_half = match edge {
            Edge::Setting => a_mid > 0.0,
            Edge::Rising => a_mid < 0.0,
        };
        if crossing_in_upper_half {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Some(ModifiedJulianDate::new(0.5 * (lo + hi)))
}
