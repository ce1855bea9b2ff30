//! Resolved observation targets.

use serde::{Deserialize, Serialize};

use crate::astro::{Body, Equatorial};
use crate::catalog::{BodyClass, Ephemerides};
use crate::error::Result;
use crate::models::{GeographicLocation, ModifiedJulianDate};

/// What kind of object an identifier turned out to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetCategory {
    SmallBody,
    MajorBody,
    Planet,
    Fixed,
}

impl TargetCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TargetCategory::SmallBody => "small body",
            TargetCategory::MajorBody => "major body",
            TargetCategory::Planet => "planet",
            TargetCategory::Fixed => "fixed",
        }
    }
}

/// Plot marker symbol, fixed per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    Diamond,
    Square,
    Circle,
    Star,
}

/// How a target's sky position is obtained.
///
/// One variant per category; every consumer dispatches on the variant
/// instead of re-deriving behavior from a category string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Locator {
    /// Coordinate valid for the whole night (stars, galaxies, literal input)
    Fixed(Equatorial),
    /// Asteroid or comet: every sample is a fresh ephemerides lookup
    SmallBody { designation: String },
    /// Major body known to the ephemerides service but not modeled locally
    MajorBody { designation: String },
    /// Planet, Sun or Moon: positions come from the local ephemeris
    Planet(Body),
}

impl Locator {
    pub fn category(&self) -> TargetCategory {
        match self {
            Locator::Fixed(_) => TargetCategory::Fixed,
            Locator::SmallBody { .. } => TargetCategory::SmallBody,
            Locator::MajorBody { .. } => TargetCategory::MajorBody,
            Locator::Planet(_) => TargetCategory::Planet,
        }
    }
}

/// A resolved target: display name, position source and display color.
///
/// Built once per run by the resolver and read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRecord {
    pub name: String,
    pub locator: Locator,
    /// `#rrggbb` hex color, assigned in resolution order
    pub color: String,
}

impl TargetRecord {
    pub fn category(&self) -> TargetCategory {
        self.locator.category()
    }

    /// Marker symbol for plots, a fixed table keyed by category.
    pub fn marker(&self) -> Marker {
        match self.category() {
            TargetCategory::SmallBody => Marker::Diamond,
            TargetCategory::MajorBody => Marker::Square,
            TargetCategory::Planet => Marker::Circle,
            TargetCategory::Fixed => Marker::Star,
        }
    }

    /// Sky position at an instant.
    ///
    /// Fixed and planet targets are answered locally; small and major
    /// bodies go back to the ephemerides service for each instant, so the
    /// position reflects that exact time rather than a cached lookup.
    pub fn position_at(
        &self,
        time: ModifiedJulianDate,
        site: &GeographicLocation,
        ephemerides: &dyn Ephemerides,
    ) -> Result<Equatorial> {
        match &self.locator {
            Locator::Fixed(coord) => Ok(*coord),
            Locator::Planet(body) => Ok(body.equatorial(time)),
            Locator::SmallBody { designation } => {
                ephemerides.lookup(designation, BodyClass::SmallBody, time, site)
            }
            Locator::MajorBody { designation } => {
                ephemerides.lookup(designation, BodyClass::MajorBody, time, site)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

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

    #[test]
    fn test_marker_table() {
        let record = |locator| TargetRecord {
            name: "x".to_string(),
            locator,
            color: "#000000".to_string(),
        };
        assert_eq!(
            record(Locator::SmallBody { designation: "Ceres".to_string() }).marker(),
            Marker::Diamond
        );
        assert_eq!(
            record(Locator::MajorBody { designation: "Io".to_string() }).marker(),
            Marker::Square
        );
        assert_eq!(record(Locator::Planet(Body::Mars)).marker(), Marker::Circle);
        assert_eq!(
            record(Locator::Fixed(Equatorial::new(10.0, 20.0))).marker(),
            Marker::Star
        );
    }

    #[test]
    fn test_fixed_position_needs_no_service() {
        let coord = Equatorial::new(150.0, 20.0);
        let record = TargetRecord {
            name: "Star".to_string(),
            locator: Locator::Fixed(coord),
            color: "#112233".to_string(),
        };
        let got = record
            .position_at(ModifiedJulianDate::new(60694.5), &site(), &NoRemote)
            .unwrap();
        assert_eq!(got, coord);
    }

    #[test]
    fn test_planet_position_is_local() {
        let record = TargetRecord {
            name: "Mars".to_string(),
            locator: Locator::Planet(Body::Mars),
            color: "#112233".to_string(),
        };
        let t = ModifiedJulianDate::new(60694.5);
        let got = record.position_at(t, &site(), &NoRemote).unwrap();
        assert_eq!(got, Body::Mars.equatorial(t));
    }

    #[test]
    fn test_small_body_position_goes_remote() {
        let record = TargetRecord {
            name: "Ceres".to_string(),
            locator: Locator::SmallBody { designation: "Ceres".to_string() },
            color: "#112233".to_string(),
        };
        let result = record.position_at(ModifiedJulianDate::new(60694.5), &site(), &NoRemote);
        assert!(matches!(result, Err(Error::Lookup { .. })));
    }
}
