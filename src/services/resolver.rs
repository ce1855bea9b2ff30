//! Target classification and resolution.
//!
//! A bare identifier string can name an asteroid, a comet, a planet, a
//! catalog star or a literal coordinate; the same string space serves all
//! of them. Classification runs an ordered list of strategies from the
//! most specific remote check down to the literal parse and takes the
//! first success. A strategy failure, including any remote error, is
//! inconclusive rather than fatal; only exhausting the whole list fails
//! the identifier.

use log::{debug, info, warn};

use crate::astro::coords::{parse_declination, parse_hour_angle};
use crate::astro::{Body, Equatorial};
use crate::catalog::{BodyClass, Ephemerides, NameResolver};
use crate::error::{Error, Result};
use crate::models::{GeographicLocation, Locator, ModifiedJulianDate, TargetRecord};
use crate::services::palette::distinct_palette;

pub struct TargetResolver<'a> {
    ephemerides: &'a dyn Ephemerides,
    names: &'a dyn NameResolver,
    site: GeographicLocation,
    /// Instant used for the classification probes
    epoch: ModifiedJulianDate,
}

impl<'a> TargetResolver<'a> {
    pub fn new(
        ephemerides: &'a dyn Ephemerides,
        names: &'a dyn NameResolver,
        site: GeographicLocation,
        epoch: ModifiedJulianDate,
    ) -> Self {
        Self {
            ephemerides,
            names,
            site,
            epoch,
        }
    }

    /// Classify one identifier, running the strategy list in order.
    fn classify(&self, identifier: &str) -> Result<(String, Locator)> {
        let strategies: [(&str, fn(&Self, &str) -> Option<(String, Locator)>); 5] = [
            ("small body", Self::classify_small_body),
            ("major body", Self::classify_major_body),
            ("planet", Self::classify_planet),
            ("named fixed object", Self::classify_named_fixed),
            ("literal coordinate", Self::classify_literal),
        ];

        let identifier = identifier.trim();
        for (label, strategy) in strategies {
            if let Some((name, locator)) = strategy(self, identifier) {
                debug!("'{identifier}' classified as {label}");
                return Ok((name, locator));
            }
        }
        Err(Error::Unresolved(identifier.to_string()))
    }

    fn classify_small_body(&self, identifier: &str) -> Option<(String, Locator)> {
        self.probe_ephemerides(identifier, BodyClass::SmallBody)
            .map(|_| {
                (
                    identifier.to_string(),
                    Locator::SmallBody {
                        designation: identifier.to_string(),
                    },
                )
            })
    }

    fn classify_major_body(&self, identifier: &str) -> Option<(String, Locator)> {
        self.probe_ephemerides(identifier, BodyClass::MajorBody)
            .map(|_| {
                (
                    identifier.to_string(),
                    Locator::MajorBody {
                        designation: identifier.to_string(),
                    },
                )
            })
    }

    fn classify_planet(&self, identifier: &str) -> Option<(String, Locator)> {
        let body = Body::from_name(identifier)?;
        Some((body.name().to_string(), Locator::Planet(body)))
    }

    fn classify_named_fixed(&self, identifier: &str) -> Option<(String, Locator)> {
        match self.names.resolve(identifier) {
            Ok(coord) => Some((identifier.to_string(), Locator::Fixed(coord))),
            Err(err) => {
                debug!("name resolution of '{identifier}' inconclusive: {err}");
                None
            }
        }
    }

    /// Literal `RA DEC NAME` triple: hour-angle RA, degree declination,
    /// the remaining tokens joined as the display name.
    fn classify_literal(&self, identifier: &str) -> Option<(String, Locator)> {
        let tokens: Vec<&str> = identifier.split_whitespace().collect();
        if tokens.len() < 3 {
            return None;
        }
        let ra_deg = parse_hour_angle(tokens[0]).ok()?;
        let dec_deg = parse_declination(tokens[1]).ok()?;
        let name = tokens[2..].join(" ");
        Some((name, Locator::Fixed(Equatorial::new(ra_deg, dec_deg))))
    }

    /// One classification probe against the ephemerides service. Any
    /// failure is inconclusive.
    fn probe_ephemerides(&self, identifier: &str, class: BodyClass) -> Option<Equatorial> {
        match self
            .ephemerides
            .lookup(identifier, class, self.epoch, &self.site)
        {
            Ok(coord) => Some(coord),
            Err(err) => {
                debug!("{class:?} probe for '{identifier}' inconclusive: {err}");
                None
            }
        }
    }

    /// Resolve a single identifier into a record with a default color.
    pub fn resolve(&self, identifier: &str) -> Result<TargetRecord> {
        let (name, locator) = self.classify(identifier)?;
        let mut colors = distinct_palette(1);
        Ok(TargetRecord {
            name,
            locator,
            color: colors.remove(0),
        })
    }

    /// Resolve a whole target list.
    ///
    /// Identifiers that exhaust every strategy are skipped with a warning
    /// rather than failing the run; colors are drawn from a palette sized
    /// to the resolved count, in resolution order.
    pub fn resolve_many(&self, identifiers: &[String]) -> Result<Vec<TargetRecord>> {
        let mut resolved: Vec<(String, Locator)> = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            match self.classify(identifier) {
                Ok(entry) => resolved.push(entry),
                Err(err) => {
                    warn!("skipping target '{identifier}': {err}");
                }
            }
        }

        let colors = distinct_palette(resolved.len());
        let records: Vec<TargetRecord> = resolved
            .into_iter()
            .zip(colors)
            .map(|((name, locator), color)| TargetRecord {
                name,
                locator,
                color,
            })
            .collect();

        info!(
            "resolved {} of {} targets",
            records.len(),
            identifiers.len()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TargetCategory;
    use std::collections::HashSet;

    /// Scripted ephemerides: answers only for listed (designation, class)
    /// pairs.
    struct FakeEphemerides {
        known: Vec<(String, BodyClass)>,
    }

    impl Ephemerides for FakeEphemerides {
        fn lookup(
            &self,
            designation: &str,
            class: BodyClass,
            _time: ModifiedJulianDate,
            _site: &GeographicLocation,
        ) -> Result<Equatorial> {
            if self
                .known
                .iter()
                .any(|(name, c)| name == designation && *c == class)
            {
                Ok(Equatorial::new(100.0, 10.0))
            } else {
                Err(Error::Lookup {
                    target: designation.to_string(),
                    reason: "unknown body".to_string(),
                })
            }
        }
    }

    struct FakeNames {
        known: Vec<(String, Equatorial)>,
    }

    impl NameResolver for FakeNames {
        fn resolve(&self, name: &str) -> Result<Equatorial> {
            self.known
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, coord)| *coord)
                .ok_or_else(|| Error::Lookup {
                    target: name.to_string(),
                    reason: "not in catalog".to_string(),
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

    fn epoch() -> ModifiedJulianDate {
        ModifiedJulianDate::new(60694.5)
    }

    #[test]
    fn test_small_body_wins_over_later_steps() {
        let eph = FakeEphemerides {
            known: vec![("Ceres".to_string(), BodyClass::SmallBody)],
        };
        let names = FakeNames { known: vec![] };
        let resolver = TargetResolver::new(&eph, &names, site(), epoch());

        let record = resolver.resolve("Ceres").unwrap();
        assert_eq!(record.category(), TargetCategory::SmallBody);
    }

    #[test]
    fn test_major_body_fallback() {
        let eph = FakeEphemerides {
            known: vec![("Io".to_string(), BodyClass::MajorBody)],
        };
        let names = FakeNames { known: vec![] };
        let resolver = TargetResolver::new(&eph, &names, site(), epoch());

        let record = resolver.resolve("Io").unwrap();
        assert_eq!(record.category(), TargetCategory::MajorBody);
    }

    #[test]
    fn test_planet_step_is_local() {
        // the ephemerides service knows nothing, yet Mars still resolves
        let eph = FakeEphemerides { known: vec![] };
        let names = FakeNames { known: vec![] };
        let resolver = TargetResolver::new(&eph, &names, site(), epoch());

        let record = resolver.resolve("mars").unwrap();
        assert_eq!(record.category(), TargetCategory::Planet);
        assert_eq!(record.name, "Mars");
        assert_eq!(record.locator, Locator::Planet(Body::Mars));
    }

    #[test]
    fn test_named_fixed_object() {
        let eph = FakeEphemerides { known: vec![] };
        let names = FakeNames {
            known: vec![("Polaris".to_string(), Equatorial::new(37.95, 89.26))],
        };
        let resolver = TargetResolver::new(&eph, &names, site(), epoch());

        let record = resolver.resolve("Polaris").unwrap();
        assert_eq!(record.category(), TargetCategory::Fixed);
        assert_eq!(
            record.locator,
            Locator::Fixed(Equatorial::new(37.95, 89.26))
        );
    }

    #[test]
    fn test_literal_parse_is_last_resort() {
        let eph = FakeEphemerides { known: vec![] };
        let names = FakeNames { known: vec![] };
        let resolver = TargetResolver::new(&eph, &names, site(), epoch());

        let record = resolver.resolve("10h00m00s +20d00m00s Polaris2").unwrap();
        assert_eq!(record.category(), TargetCategory::Fixed);
        assert_eq!(record.name, "Polaris2");
        match record.locator {
            Locator::Fixed(coord) => {
                assert!((coord.ra_deg - 150.0).abs() < 1e-9);
                assert!((coord.dec_deg - 20.0).abs() < 1e-9);
            }
            other => panic!("expected fixed locator, got {other:?}"),
        }
    }

    #[test]
    fn test_literal_multiword_name() {
        let eph = FakeEphemerides { known: vec![] };
        let names = FakeNames { known: vec![] };
        let resolver = TargetResolver::new(&eph, &names, site(), epoch());

        let record = resolver.resolve("05:35:17 -05:23:28 Orion Nebula").unwrap();
        assert_eq!(record.name, "Orion Nebula");
    }

    #[test]
    fn test_exhausted_chain_is_an_error() {
        let eph = FakeEphemerides { known: vec![] };
        let names = FakeNames { known: vec![] };
        let resolver = TargetResolver::new(&eph, &names, site(), epoch());

        let result = resolver.resolve("definitely not a target");
        assert!(matches!(result, Err(Error::Unresolved(_))));
    }

    #[test]
    fn test_resolve_many_skips_failures_and_colors_rest() {
        let eph = FakeEphemerides {
            known: vec![("Ceres".to_string(), BodyClass::SmallBody)],
        };
        let names = FakeNames {
            known: vec![("Vega".to_string(), Equatorial::new(279.23, 38.78))],
        };
        let resolver = TargetResolver::new(&eph, &names, site(), epoch());

        let identifiers: Vec<String> = ["Ceres", "??bogus??", "Vega", "jupiter"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let records = resolver.resolve_many(&identifiers).unwrap();

        // the bogus identifier is skipped, order is preserved
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "Ceres");
        assert_eq!(records[1].name, "Vega");
        assert_eq!(records[2].name, "Jupiter");

        let colors: HashSet<&String> = records.iter().map(|r| &r.color).collect();
        assert_eq!(colors.len(), 3);
    }
}
