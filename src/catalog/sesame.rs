//! CDS Sesame name resolver.
//!
//! Resolves object names to ICRS coordinates through the plain-text Sesame
//! service, trying Simbad, NED and VizieR in one call. The response's `%J`
//! line carries the resolved J2000 position in decimal degrees.

use std::time::Duration;

use log::debug;

use crate::astro::Equatorial;
use crate::catalog::NameResolver;
use crate::error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://cds.unistra.fr/cgi-bin/nph-sesame";

pub struct SesameClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl SesameClient {
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_BASE_URL)
    }

    pub fn with_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl NameResolver for SesameClient {
    fn resolve(&self, name: &str) -> Result<Equatorial> {
        let url = format!("{}/-oI/SNV?{}", self.base_url, percent_encode(name));
        let response = self.client.get(&url).send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::Lookup {
                target: name.to_string(),
                reason: format!("sesame returned {status}"),
            });
        }

        let coord = parse_sesame(&body).ok_or_else(|| Error::Lookup {
            target: name.to_string(),
            reason: "name not found by sesame".to_string(),
        })?;
        debug!("sesame '{}': {}", name, coord.to_sexagesimal());
        Ok(coord)
    }
}

/// Query-string encoding of an object name. Sesame names are ASCII
/// identifiers with spaces and the odd `+`/`[`; everything outside the
/// unreserved set is percent-escaped.
fn percent_encode(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for byte in name.trim().bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Find the `%J ra dec` line of a Sesame text response.
fn parse_sesame(body: &str) -> Option<Equatorial> {
    for line in body.lines() {
        let rest = match line.trim().strip_prefix("%J ") {
            Some(rest) => rest,
            None => continue,
        };
        let mut fields = rest.split_whitespace();
        let ra: f64 = fields.next()?.parse().ok()?;
        let dec: f64 = fields.next()?.parse().ok()?;
        return Some(Equatorial::new(ra, dec));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sesame_response() {
        let body = "\
# Polaris #Q22293128
#=Simbad:  1    0ms
%@ 3137919
%I.0 NAME Polaris
%J 37.954561 +89.264109 = 02:31:49.09 +89:15:50.7
%J.E [5.00 5.00 90] A 2007A&A...474..653V
";
        let coord = parse_sesame(body).unwrap();
        assert!((coord.ra_deg - 37.954561).abs() < 1e-9);
        assert!((coord.dec_deg - 89.264109).abs() < 1e-9);
    }

    #[test]
    fn test_parse_sesame_not_found() {
        let body = "# Polaris2 #Q22293129\n#!SIMBAD: No known catalog could be found\n";
        assert!(parse_sesame(body).is_none());
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("Polaris"), "Polaris");
        assert_eq!(percent_encode("NGC 2392"), "NGC%202392");
        assert_eq!(percent_encode("BD+30 3639"), "BD%2B30%203639");
    }
}
