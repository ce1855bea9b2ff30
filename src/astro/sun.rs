//! Low-accuracy solar position.
//!
//! Mean-element series good to roughly 0.01 degrees over a few centuries
//! around J2000, which is ample for twilight searches and planning plots.

use crate::astro::coords::{ecliptic_to_equatorial, equatorial_to_horizontal, mean_obliquity, Equatorial};
use crate::models::{GeographicLocation, ModifiedJulianDate};

/// Apparent ecliptic longitude of the Sun in degrees.
pub fn solar_longitude(jd: f64) -> f64 {
    let n = jd - 2451545.0;

    // Mean longitude and mean anomaly of the Sun
    let l = (280.460 + 0.9856474 * n).rem_euclid(360.0);
    let g = (357.528 + 0.9856003 * n).rem_euclid(360.0).to_radians();

    (l + 1.915 * g.sin() + 0.020 * (2.0 * g).sin()).rem_euclid(360.0)
}

/// Geocentric equatorial coordinates of the Sun.
pub fn solar_equatorial(time: ModifiedJulianDate) -> Equatorial {
    let jd = time.julian_date();
    let lambda = solar_longitude(jd);
    ecliptic_to_equatorial(lambda, 0.0, mean_obliquity(jd))
}

/// Altitude of the Sun above the horizon for a site, in degrees.
pub fn solar_altitude(time: ModifiedJulianDate, site: &GeographicLocation) -> f64 {
    let coord = solar_equatorial(time);
    equatorial_to_horizontal(coord, time, site).altitude_deg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_near_vernal_equinox() {
        // 2026-03-20 ~14:46 UTC: solar RA and Dec both pass through zero
        let t = ModifiedJulianDate::parse("2026-03-20 15:00:00").unwrap();
        let coord = solar_equatorial(t);
        let ra_wrapped = if coord.ra_deg > 180.0 {
            coord.ra_deg - 360.0
        } else {
            coord.ra_deg
        };
        assert!(ra_wrapped.abs() < 1.0, "RA {} too far from 0", coord.ra_deg);
        assert!(coord.dec_deg.abs() < 0.5);
    }

    #[test]
    fn test_sun_declination_at_solstices() {
        let june = ModifiedJulianDate::parse("2026-06-21 12:00:00").unwrap();
        let dec_june = solar_equatorial(june).dec_deg;
        assert!((dec_june - 23.44).abs() < 0.1);

        let december = ModifiedJulianDate::parse("2026-12-21 12:00:00").unwrap();
        let dec_dec = solar_equatorial(december).dec_deg;
        assert!((dec_dec + 23.44).abs() < 0.1);
    }

    #[test]
    fn test_sun_below_horizon_at_night() {
        // Local midnight at Greenwich in January: deep night
        let t = ModifiedJulianDate::parse("2026-01-15 00:00:00").unwrap();
        let site = GeographicLocation {
            latitude: 51.4769,
            longitude: 0.0,
            elevation_m: 0.0,
        };
        assert!(solar_altitude(t, &site) < -40.0);
    }

    #[test]
    fn test_sun_above_horizon_at_noon() {
        let t = ModifiedJulianDate::parse("2026-06-21 12:00:00").unwrap();
        let site = GeographicLocation {
            latitude: 51.4769,
            longitude: 0.0,
            elevation_m: 0.0,
        };
        let alt = solar_altitude(t, &site);
        // solstice noon at 51.5N: ~62 degrees
        assert!((alt - 62.0).abs() < 2.0);
    }
}
