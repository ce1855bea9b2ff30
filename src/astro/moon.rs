//! Truncated lunar position.
//!
//! Leading terms of the lunar theory only: accurate to about half a degree,
//! enough to place the Moon on a planning chart. Geocentric; topocentric
//! parallax (up to ~1 degree) is not applied.

use crate::astro::coords::{ecliptic_to_equatorial, mean_obliquity, Equatorial};
use crate::models::ModifiedJulianDate;

/// Geocentric equatorial coordinates of the Moon.
pub fn lunar_equatorial(time: ModifiedJulianDate) -> Equatorial {
    let jd = time.julian_date();
    let n = jd - 2451545.0;

    // Mean longitude, mean anomaly and argument of latitude
    let l = (218.316 + 13.176396 * n).rem_euclid(360.0);
    let m = (134.963 + 13.064993 * n).rem_euclid(360.0).to_radians();
    let f = (93.272 + 13.229350 * n).rem_euclid(360.0).to_radians();

    let lon = (l + 6.289 * m.sin()).rem_euclid(360.0);
    let lat = 5.128 * f.sin();

    ecliptic_to_equatorial(lon, lat, mean_obliquity(jd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moon_declination_bounded() {
        // |ecliptic latitude| < 5.2 deg, so |dec| < obliquity + 5.2 + margin
        for i in 0..60 {
            let t = ModifiedJulianDate::new(60600.0 + i as f64);
            let coord = lunar_equatorial(t);
            assert!(coord.dec_deg.abs() < 29.5, "dec {} at {}", coord.dec_deg, t.value());
        }
    }

    #[test]
    fn test_moon_moves_about_13_degrees_per_day() {
        let t0 = ModifiedJulianDate::new(60694.0);
        let t1 = t0.offset_days(1.0);
        let a = lunar_equatorial(t0);
        let b = lunar_equatorial(t1);

        let mut d_ra = (b.ra_deg - a.ra_deg).abs();
        if d_ra > 180.0 {
            d_ra = 360.0 - d_ra;
        }
        // angular rate dominated by longitude motion
        assert!(d_ra > 8.0 && d_ra < 18.0, "daily RA motion {d_ra}");
    }
}
