//! Report configuration document.
//!
//! One JSON document read at startup, mirroring the planner's three
//! sections: "Night" (site and timing), "Targets" (ordered identifier
//! list) and "Config" (per-plot display options, carried opaquely for the
//! report assembler).

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{GeographicLocation, ModifiedJulianDate, Observer};
use crate::services::night::BlockSpec;

/// Raw "Night" section as it appears in the document. Times are calendar
/// strings in UTC; the site may be a named preset or explicit coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct NightConfig {
    pub telescope_name: String,
    pub observer_latitude: Option<f64>,
    pub observer_longitude: Option<f64>,
    pub observer_elevation_m: Option<f64>,
    pub observer_timezone: Option<String>,
    pub obs_start: String,
    pub obs_end: Option<String>,
    #[serde(default)]
    pub block_start_times: Vec<String>,
    #[serde(default)]
    pub block_end_times: Vec<Option<String>>,
    #[serde(default)]
    pub block_colors: Vec<String>,
}

/// The whole configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(rename = "Night")]
    pub night: NightConfig,
    #[serde(rename = "Targets")]
    pub targets: Vec<String>,
    /// Display options, passed through untouched
    #[serde(rename = "Config", default)]
    pub display: serde_json::Value,
}

impl ReportConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let deserializer = &mut serde_json::Deserializer::from_str(json);
        serde_path_to_error::deserialize(deserializer)
            .map_err(|e| Error::Config(format!("at {}: {}", e.path(), e.inner())))
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Ok(Self::from_json(&json)?)
    }

    /// Observation start instant.
    pub fn obs_start(&self) -> Result<ModifiedJulianDate> {
        ModifiedJulianDate::parse(&self.night.obs_start)
    }

    /// Observation end instant, when one was requested.
    pub fn obs_end(&self) -> Result<Option<ModifiedJulianDate>> {
        self.night
            .obs_end
            .as_deref()
            .map(ModifiedJulianDate::parse)
            .transpose()
    }

    /// Observation blocks, when any were requested.
    pub fn block_spec(&self) -> Result<Option<BlockSpec>> {
        if self.night.block_start_times.is_empty() {
            return Ok(None);
        }
        let starts = self
            .night
            .block_start_times
            .iter()
            .map(|s| ModifiedJulianDate::parse(s))
            .collect::<Result<Vec<_>>>()?;
        let ends = self
            .night
            .block_end_times
            .iter()
            .map(|end| end.as_deref().map(ModifiedJulianDate::parse).transpose())
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(BlockSpec {
            starts,
            ends,
            colors: self.night.block_colors.clone(),
        }))
    }
}

impl Observer {
    /// Build the observer from the "Night" section: a known telescope name
    /// selects a preset, explicit coordinates define a custom site.
    pub fn from_night_config(night: &NightConfig) -> Result<Observer> {
        if let Some(preset) = Observer::preset(&night.telescope_name) {
            return Ok(preset);
        }
        match (night.observer_latitude, night.observer_longitude) {
            (Some(latitude), Some(longitude)) => {
                let site = GeographicLocation::new(
                    latitude,
                    longitude,
                    night.observer_elevation_m.unwrap_or(0.0),
                )?;
                Ok(Observer::new(
                    night.telescope_name.clone(),
                    site,
                    night.observer_timezone.clone().unwrap_or_else(|| "UTC".to_string()),
                ))
            }
            _ => Err(Error::Config(format!(
                "'{}' is not a known telescope and no observer coordinates were given",
                night.telescope_name
            ))),
        }
    }
}
