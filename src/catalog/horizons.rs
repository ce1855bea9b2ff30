//! JPL Horizons ephemerides client.
//!
//! One blocking GET per (body, instant) pair. The text-format observer
//! ephemeris is requested for a single TLIST instant with degree-valued
//! CSV quantities, and the single data row between the `$$SOE`/`$$EOE`
//! sentinels is parsed for RA and Dec.

use std::time::Duration;

use log::debug;

use crate::astro::Equatorial;
use crate::catalog::{BodyClass, Ephemerides};
use crate::error::{Error, Result};
use crate::models::{GeographicLocation, ModifiedJulianDate};

const DEFAULT_API_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons.api";

pub struct HorizonsClient {
    client: reqwest::blocking::Client,
    api_url: String,
}

impl HorizonsClient {
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_API_URL)
    }

    pub fn with_url(api_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    /// The COMMAND parameter. A trailing semicolon restricts the search to
    /// the small-body database; without it Horizons matches major bodies.
    fn command(designation: &str, class: BodyClass) -> String {
        match class {
            BodyClass::SmallBody => format!("'{designation};'"),
            BodyClass::MajorBody => format!("'{designation}'"),
        }
    }

    fn query(
        &self,
        designation: &str,
        class: BodyClass,
        time: ModifiedJulianDate,
        site: &GeographicLocation,
    ) -> Result<String> {
        let site_coord = format!(
            "'{:.6},{:.6},{:.4}'",
            site.longitude,
            site.latitude,
            site.elevation_m / 1000.0
        );
        let tlist = format!("'{:.8}'", time.julian_date());

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("format", "text"),
                ("COMMAND", Self::command(designation, class).as_str()),
                ("OBJ_DATA", "'NO'"),
                ("MAKE_EPHEM", "'YES'"),
                ("EPHEM_TYPE", "'OBSERVER'"),
                ("CENTER", "'coord@399'"),
                ("COORD_TYPE", "'GEODETIC'"),
                ("SITE_COORD", site_coord.as_str()),
                ("QUANTITIES", "'1'"),
                ("ANG_FORMAT", "'DEG'"),
                ("CSV_FORMAT", "'YES'"),
                ("TLIST", tlist.as_str()),
            ])
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::Lookup {
                target: designation.to_string(),
                reason: format!("horizons returned {status}"),
            });
        }
        Ok(body)
    }
}

impl Ephemerides for HorizonsClient {
    fn lookup(
        &self,
        designation: &str,
        class: BodyClass,
        time: ModifiedJulianDate,
        site: &GeographicLocation,
    ) -> Result<Equatorial> {
        let body = self.query(designation, class, time, site)?;
        let coord = parse_observer_table(&body).ok_or_else(|| Error::Lookup {
            target: designation.to_string(),
            reason: "no ephemeris row in horizons response".to_string(),
        })?;
        debug!(
            "horizons {:?} '{}' at {}: {}",
            class,
            designation,
            time.iso(),
            coord.to_sexagesimal()
        );
        Ok(coord)
    }
}

/// Extract RA/Dec from the `$$SOE`..`$$EOE` block of a text-format
/// observer ephemeris with CSV quantities.
///
/// With QUANTITIES='1' a data row reads
/// ` 2026-Jan-15 21:00, , ,150.12345, 20.54321,` where the second and
/// third fields are solar-presence and lunation markers that may be blank
/// or alphabetic. The row's RA and Dec are the first two fields that parse
/// as floats.
fn parse_observer_table(body: &str) -> Option<Equatorial> {
    let mut in_table = false;
    for line in body.lines() {
        match line.trim() {
            "$$SOE" => {
                in_table = true;
                continue;
            }
            "$$EOE" => break,
            _ => {}
        }
        if !in_table {
            continue;
        }

        let numbers: Vec<f64> = line
            .split(',')
            .filter_map(|field| field.trim().parse::<f64>().ok())
            .collect();
        if numbers.len() == 2 {
            return Some(Equatorial::new(numbers[0], numbers[1]));
        }
    }
    None
}
