//! Remote catalog and ephemerides lookups.
//!
//! Everything the crate cannot compute locally comes through the two
//! traits here. The resolver and the track sampler depend only on the
//! traits, so tests run against scripted implementations while the binary
//! wires in [`HorizonsClient`] and [`SesameClient`].

pub mod horizons;
pub mod sesame;

pub use horizons::HorizonsClient;
pub use sesame::SesameClient;

use crate::astro::Equatorial;
use crate::error::Result;
use crate::models::{GeographicLocation, ModifiedJulianDate};

/// Category hint passed to the ephemerides service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyClass {
    /// Asteroids and comets
    SmallBody,
    /// Planets, moons and other bodies the service knows by bare name
    MajorBody,
}

/// Topocentric ephemerides for solar-system bodies.
pub trait Ephemerides {
    /// Sky position of a body at an instant as seen from a site.
    ///
    /// An unknown designation or a service failure is an `Err`; callers
    /// decide whether that is inconclusive (classification) or a missing
    /// sample (plotting).
    fn lookup(
        &self,
        designation: &str,
        class: BodyClass,
        time: ModifiedJulianDate,
        site: &GeographicLocation,
    ) -> Result<Equatorial>;
}

/// Name-to-coordinate resolution for fixed objects.
pub trait NameResolver {
    fn resolve(&self, name: &str) -> Result<Equatorial>;
}
