//! Celestial coordinate types and transforms.
//!
//! Equatorial coordinates are ICRS-adjacent right ascension/declination in
//! degrees; horizontal coordinates are altitude/azimuth with azimuth
//! measured clockwise from north. Transform formulas follow the standard
//! low-accuracy series (Meeus).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::GeographicLocation;
use crate::models::ModifiedJulianDate;

/// Equatorial sky coordinate, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    /// Right ascension in degrees [0, 360)
    pub ra_deg: f64,
    /// Declination in degrees [-90, 90]
    pub dec_deg: f64,
}

impl Equatorial {
    pub fn new(ra_deg: f64, dec_deg: f64) -> Self {
        Self {
            ra_deg: ra_deg.rem_euclid(360.0),
            dec_deg,
        }
    }

    /// Sexagesimal `hh:mm:ss.ss ±dd:mm:ss.s` rendering.
    pub fn to_sexagesimal(&self) -> String {
        format!("{} {}", format_hms(self.ra_deg), format_dms(self.dec_deg))
    }
}

/// Horizontal (alt/az) coordinate, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Horizontal {
    /// Altitude above the horizon in degrees, negative below
    pub altitude_deg: f64,
    /// Azimuth in degrees from north through east [0, 360)
    pub azimuth_deg: f64,
}

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity(jd: f64) -> f64 {
    let n = jd - 2451545.0;
    23.439 - 0.0000004 * n
}

/// Convert ecliptic longitude/latitude (degrees) to equatorial coordinates.
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> Equatorial {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    let eps = obliquity_deg.to_radians();

    let ra = (lon.sin() * eps.cos() - lat.tan() * eps.sin()).atan2(lon.cos());
    let dec = (lat.sin() * eps.cos() + lat.cos() * eps.sin() * lon.sin()).asin();

    Equatorial::new(ra.to_degrees(), dec.to_degrees())
}

/// Greenwich mean sidereal time in degrees.
pub fn gmst_deg(jd: f64) -> f64 {
    let n = jd - 2451545.0;
    let t = n / 36525.0;
    (280.46061837 + 360.98564736629 * n + 0.000387933 * t * t - t * t * t / 38710000.0)
        .rem_euclid(360.0)
}

/// Local mean sidereal time in degrees for an east-positive longitude.
pub fn local_sidereal_time_deg(jd: f64, longitude_deg: f64) -> f64 {
    (gmst_deg(jd) + longitude_deg).rem_euclid(360.0)
}

/// Transform an equatorial coordinate to horizontal coordinates for a site
/// at a given instant.
pub fn equatorial_to_horizontal(
    coord: Equatorial,
    time: ModifiedJulianDate,
    site: &GeographicLocation,
) -> Horizontal {
    let lst = local_sidereal_time_deg(time.julian_date(), site.longitude);
    let ha = (lst - coord.ra_deg).to_radians();
    let lat = site.latitude.to_radians();
    let dec = coord.dec_deg.to_radians();

    let sin_alt = dec.sin() * lat.sin() + dec.cos() * lat.cos() * ha.cos();
    let alt = sin_alt.clamp(-1.0, 1.0).asin();

    // Azimuth from north, increasing toward east
    let az = (-dec.cos() * ha.sin()).atan2(dec.sin() * lat.cos() - dec.cos() * lat.sin() * ha.cos());

    Horizontal {
        altitude_deg: alt.to_degrees(),
        azimuth_deg: az.to_degrees().rem_euclid(360.0),
    }
}

/// Plane-parallel airmass (sec z). `None` at or below the horizon, where
/// the approximation is meaningless.
pub fn airmass(altitude_deg: f64) -> Option<f64> {
    if altitude_deg <= 0.0 {
        return None;
    }
    let z = (90.0 - altitude_deg).to_radians();
    Some(1.0 / z.cos())
}

/// Parse an hour-angle token into degrees.
///
/// Accepts `10h30m15.2s`, `10:30:15.2` and plain decimal hours.
pub fn parse_hour_angle(token: &str) -> Result<f64> {
    let hours = parse_sexagesimal(token, ['h', 'm', 's'])?;
    if !(0.0..=24.0).contains(&hours) {
        return Err(Error::Coordinate(token.to_string()));
    }
    Ok((hours * 15.0).rem_euclid(360.0))
}

/// Parse a declination token into degrees.
///
/// Accepts `+20d00m00s`, `-05:30:00` and plain decimal degrees.
pub fn parse_declination(token: &str) -> Result<f64> {
    let deg = parse_sexagesimal(token, ['d', 'm', 's'])?;
    if !(-90.0..=90.0).contains(&deg) {
        return Err(Error::Coordinate(token.to_string()));
    }
    Ok(deg)
}

fn parse_sexagesimal(token: &str, units: [char; 3]) -> Result<f64> {
    let lowered = token.trim().to_ascii_lowercase();
    let (sign, body) = match lowered.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, lowered.strip_prefix('+').unwrap_or(&lowered)),
    };
    if body.is_empty() {
        return Err(Error::Coordinate(token.to_string()));
    }

    let mut normalized = body.to_string();
    for unit in units {
        normalized = normalized.replace(unit, ":");
    }
    let normalized = normalized.trim_end_matches(':');

    let parts: Vec<&str> = normalized.split(':').collect();
    if parts.len() > 3 {
        return Err(Error::Coordinate(token.to_string()));
    }

    let mut value = 0.0;
    for (i, part) in parts.iter().enumerate() {
        let component: f64 = part
            .parse()
            .map_err(|_| Error::Coordinate(token.to_string()))?;
        if component < 0.0 {
            return Err(Error::Coordinate(token.to_string()));
        }
        value += component / 60f64.powi(i as i32);
    }
    Ok(sign * value)
}

/// Format a right ascension as `hh:mm:ss.ss`.
pub fn format_hms(ra_deg: f64) -> String {
    let total_hundredths = (ra_deg.rem_euclid(360.0) / 15.0 * 360000.0).round() as i64;
    let total_hundredths = total_hundredths.rem_euclid(24 * 360000);
    let h = total_hundredths / 360000;
    let m = (total_hundredths / 6000) % 60;
    let s = (total_hundredths % 6000) as f64 / 100.0;
    format!("{h:02}:{m:02}:{s:05.2}")
}

/// Format a declination as `±dd:mm:ss.s`.
pub fn format_dms(dec_deg: f64) -> String {
    let sign = if dec_deg < 0.0 { '-' } else { '+' };
    let total_tenths = (dec_deg.abs() * 36000.0).round() as i64;
    let d = total_tenths / 36000;
    let m = (total_tenths / 600) % 60;
    let s = (total_tenths % 600) as f64 / 10.0;
    format!("{sign}{d:02}:{m:02}:{s:04.1}")
}
