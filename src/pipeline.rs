//! The report-generation pipeline.
//!
//! A linear, synchronous run: resolve the targets, build the night
//! window, sample every target's track over the plotting grid. The result
//! carries everything the plotting and report-assembly collaborators
//! consume.

use log::info;

use crate::almanac::SolarAlmanac;
use crate::catalog::{Ephemerides, NameResolver};
use crate::config::ReportConfig;
use crate::error::{Error, Result};
use crate::models::{NightWindow, Observer, TargetRecord};
use crate::services::resolver::TargetResolver;
use crate::services::track::{horizontal_track, TrackSample};
use crate::services::build_night_window;

/// Everything one run computes, handed to downstream consumers by value.
#[derive(Debug)]
pub struct ReportData {
    pub observer: Observer,
    pub window: NightWindow,
    pub targets: Vec<TargetRecord>,
    /// One track per target, indexed like `targets`
    pub tracks: Vec<Vec<TrackSample>>,
}

/// Run the pipeline for one configuration document.
pub fn run(
    config: &ReportConfig,
    ephemerides: &dyn Ephemerides,
    names: &dyn NameResolver,
) -> Result<ReportData> {
    let observer = Observer::from_night_config(&config.night)?;
    let start = config.obs_start()?;
    let end = config.obs_end()?;
    if let Some(end) = end {
        if end <= start {
            return Err(Error::Config(format!(
                "observation end {} is not after start {}",
                end.iso(),
                start.iso()
            )));
        }
    }
    info!(
        "planning night at {} starting {}",
        observer.name,
        start.iso()
    );

    let almanac = SolarAlmanac::new(observer.site);
    let window = build_night_window(&almanac, start, end, config.block_spec()?.as_ref())?;

    let resolver = TargetResolver::new(ephemerides, names, observer.site, start);
    let targets = resolver.resolve_many(&config.targets)?;

    let tracks = targets
        .iter()
        .map(|target| horizontal_track(target, &window.plot_grid, &observer.site, ephemerides))
        .collect();

    Ok(ReportData {
        observer,
        window,
        targets,
        tracks,
    })
}
