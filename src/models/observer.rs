//! Observer site model and named observatory presets.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Geographic location of an observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicLocation {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
    /// Elevation above sea level in meters
    pub elevation_m: f64,
}

impl GeographicLocation {
    pub fn new(latitude: f64, longitude: f64, elevation_m: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::Config(format!(
                "latitude {latitude} out of range [-90, 90]"
            )));
        }
        if !(-360.0..=360.0).contains(&longitude) {
            return Err(Error::Config(format!(
                "longitude {longitude} out of range [-360, 360]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
            elevation_m,
        })
    }
}

/// An observer: a named telescope site with a timezone label.
///
/// The timezone is carried as an opaque IANA/Etc string for the report
/// assembler; all internal computation is in UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub name: String,
    pub site: GeographicLocation,
    pub timezone: String,
}

impl Observer {
    pub fn new(
        name: impl Into<String>,
        site: GeographicLocation,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            site,
            timezone: timezone.into(),
        }
    }

    /// Look up a built-in observatory by name.
    pub fn preset(name: &str) -> Option<Observer> {
        match name {
            "Aarhus" => Some(Observer::new(
                name,
                GeographicLocation {
                    latitude: 56.19694,
                    longitude: 10.18917,
                    elevation_m: 68.0,
                },
                "Etc/GMT+1",
            )),
            "NOT" | "Nordic Optical Telescope" => Some(Observer::new(
                name,
                GeographicLocation {
                    latitude: 28.7569444,
                    longitude: -17.885,
                    elevation_m: 2383.0,
                },
                "GMT",
            )),
            _ => None,
        }
    }
}
