//! Nightly observation-planning core.
//!
//! Given a telescope site, a requested observation interval and a list of
//! target identifiers, this crate resolves each identifier into a typed
//! target record (asteroid, major body, planet or fixed object), derives
//! the night's time structure (sunset, sunrise, the three twilight tiers,
//! the plotting grid and any observation blocks), and samples each
//! target's altitude/azimuth track over the night. Plot rendering and
//! report assembly consume the results; they are not part of this crate.

pub mod almanac;
pub mod astro;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;

pub use almanac::{Almanac, SolarAlmanac};
pub use catalog::{Ephemerides, NameResolver};
pub use config::ReportConfig;
pub use error::{Error, Result};
pub use models::{
    GeographicLocation, Locator, ModifiedJulianDate, NightWindow, Observer, TargetCategory,
    TargetRecord,
};
pub use pipeline::{run, ReportData};
