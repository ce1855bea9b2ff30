//! Per-target track sampling.
//!
//! Samples a resolved target's horizontal position over the night's
//! plotting grid and finds its rise and set around the night. A sample
//! whose position cannot be resolved is dropped from the series, not
//! escalated; plots simply show a gap.

use log::debug;

use crate::almanac::{altitude_crossing, Edge, SearchDirection};
use crate::astro::coords::{airmass, equatorial_to_horizontal};
use crate::astro::Horizontal;
use crate::catalog::Ephemerides;
use crate::models::{GeographicLocation, Locator, ModifiedJulianDate, TargetRecord};

/// One instant of a target's track across the sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSample {
    pub time: ModifiedJulianDate,
    pub position: Horizontal,
    /// `None` below the horizon
    pub airmass: Option<f64>,
}

/// Sample a target's horizontal track over a time grid.
///
/// Small and major bodies trigger one ephemerides lookup per instant;
/// failed instants are skipped, so the result may be shorter than the
/// grid.
pub fn horizontal_track(
    record: &TargetRecord,
    grid: &[ModifiedJulianDate],
    site: &GeographicLocation,
    ephemerides: &dyn Ephemerides,
) -> Vec<TrackSample> {
    let mut samples = Vec::with_capacity(grid.len());
    for &time in grid {
        let coord = match record.position_at(time, site, ephemerides) {
            Ok(coord) => coord,
            Err(err) => {
                debug!("dropping sample of '{}' at {}: {}", record.name, time.iso(), err);
                continue;
            }
        };
        let position = equatorial_to_horizontal(coord, time, site);
        samples.push(TrackSample {
            time,
            position,
            airmass: airmass(position.altitude_deg),
        });
    }
    samples
}

/// Rise and set instants nearest the anchor, at the true horizon.
///
/// Each event is searched on both sides of the anchor and the closer
/// crossing wins, so an event minutes in the past is not reported a
/// sidereal day late. Only answered for targets whose position is
/// computable locally; a remote-body search would need hundreds of
/// service calls per event. Returns `(rise, set)` with `None` for events
/// that do not occur within the search span (circumpolar or never-rising
/// targets) or for remote categories.
pub fn nearest_rise_set(
    record: &TargetRecord,
    anchor: ModifiedJulianDate,
    site: &GeographicLocation,
) -> (Option<ModifiedJulianDate>, Option<ModifiedJulianDate>) {
    let altitude = |time: ModifiedJulianDate| -> Option<f64> {
        let coord = match &record.locator {
            Locator::Fixed(coord) => *coord,
            Locator::Planet(body) => body.equatorial(time),
            Locator::SmallBody { .. } | Locator::MajorBody { .. } => return None,
        };
        Some(equatorial_to_horizontal(coord, time, site).altitude_deg)
    };

    let nearest = |edge: Edge| -> Option<ModifiedJulianDate> {
        let next = altitude_crossing(altitude, 0.0, edge, anchor, SearchDirection::Next);
        let previous = altitude_crossing(altitude, 0.0, edge, anchor, SearchDirection::Previous);
        match (previous, next) {
            (Some(previous), Some(next)) => {
                if anchor.value() - previous.value() <= next.value() - anchor.value() {
                    Some(previous)
                } else {
                    Some(next)
                }
            }
            (found, None) | (None, found) => found,
        }
    };

    (nearest(Edge::Rising), nearest(Edge::Setting))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::Equatorial;
    use crate::catalog::BodyClass;
    use crate::error::{Error, Result};
    use crate::models::Period;

    struct NoRemote;

    impl Ephemerides for NoRemote {
        fn lookup(
            &self,
            designation: &str,
            _class: BodyClass,
            _time: ModifiedJulianDate,
            _site: &GeographicLocation,
        ) -> Result<Equatorial> {
            Err(Error::Lookup {
                target: designation.to_string(),
                reason: "offline".to_string(),
            })
        }
    }

    fn site() -> GeographicLocation {
        GeographicLocation {
            latitude: 28.76,
            longitude: -17.88,
            elevation_m: 2396.0,
        }
    }

    fn fixed(coord: Equatorial) -> TargetRecord {
        TargetRecord {
            name: "test".to_string(),
            locator: Locator::Fixed(coord),
            color: "#123456".to_string(),
        }
    }

    #[test]
    fn test_track_covers_full_grid_for_fixed_target() {
        let grid = Period::from_mjd(60694.8, 60695.3).sample(100);
        let track = horizontal_track(&fixed(Equatorial::new(80.0, 25.0)), &grid, &site(), &NoRemote);

        assert_eq!(track.len(), 100);
        for sample in &track {
            assert!((-90.0..=90.0).contains(&sample.position.altitude_deg));
            if let Some(am) = sample.airmass {
                assert!(am >= 1.0);
            }
        }
    }

    #[test]
    fn test_remote_failures_leave_gaps() {
        let record = TargetRecord {
            name: "Ceres".to_string(),
            locator: Locator::SmallBody {
                designation: "Ceres".to_string(),
            },
            color: "#123456".to_string(),
        };
        let grid = Period::from_mjd(60694.8, 60695.3).sample(10);
        let track = horizontal_track(&record, &grid, &site(), &NoRemote);
        assert!(track.is_empty());
    }

    #[test]
    fn test_equatorial_target_rises_and_sets() {
        let anchor = ModifiedJulianDate::new(60694.8);
        let (rise, set) = nearest_rise_set(&fixed(Equatorial::new(120.0, 0.0)), anchor, &site());

        let rise = rise.unwrap();
        let set = set.unwrap();
        // nearest events sit within half a sidereal day of the anchor
        assert!((rise.value() - anchor.value()).abs() < 0.5);
        assert!((set.value() - anchor.value()).abs() < 0.5);
        // a dec-zero target is up for close to 12 sidereal hours
        let up_hours = ((set.value() - rise.value()).rem_euclid(0.9973)) * 24.0;
        assert!((up_hours - 12.0).abs() < 1.0, "up for {up_hours} h");
    }

    #[test]
    fn test_event_just_past_is_not_reported_a_day_late() {
        let target = fixed(Equatorial::new(120.0, 0.0));
        // locate a set, then anchor 15 minutes after it
        let (_, set) = nearest_rise_set(&target, ModifiedJulianDate::new(60694.8), &site());
        let set = set.unwrap();
        let anchor = set.offset_days(15.0 / 1440.0);

        let (_, nearest_set) = nearest_rise_set(&target, anchor, &site());
        let nearest_set = nearest_set.unwrap();
        assert!(nearest_set < anchor);
        assert!(
            (nearest_set.value() - set.value()).abs() < 1e-3,
            "set reported at {} instead of {}",
            nearest_set.iso(),
            set.iso()
        );
    }

    #[test]
    fn test_circumpolar_target_never_sets() {
        let anchor = ModifiedJulianDate::new(60694.8);
        let (rise, set) = nearest_rise_set(&fixed(Equatorial::new(37.95, 89.26)), anchor, &site());
        assert!(rise.is_none());
        assert!(set.is_none());
    }

    #[test]
    fn test_remote_target_has_no_local_rise_set() {
        let record = TargetRecord {
            name: "Ceres".to_string(),
            locator: Locator::SmallBody {
                designation: "Ceres".to_string(),
            },
            color: "#123456".to_string(),
        };
        let (rise, set) = nearest_rise_set(&record, ModifiedJulianDate::new(60694.8), &site());
        assert!(rise.is_none() && set.is_none());
    }
}
