use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Modified Julian Date representation.
/// MJD 0 = 1858-11-17 00:00:00 UTC
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ModifiedJulianDate(f64);

/// MJD of the Unix epoch (1970-01-01 00:00:00 UTC).
const MJD_UNIX_EPOCH: f64 = 40587.0;

/// Offset between Julian Date and Modified Julian Date.
pub const JD_MJD_OFFSET: f64 = 2_400_000.5;

impl ModifiedJulianDate {
    /// Create a new MJD value.
    pub fn new(v: f64) -> Self {
        Self(v)
    }

    /// Raw MJD value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Full Julian Date value.
    pub fn julian_date(&self) -> f64 {
        self.0 + JD_MJD_OFFSET
    }

    /// Create from a full Julian Date.
    pub fn from_julian_date(jd: f64) -> Self {
        Self(jd - JD_MJD_OFFSET)
    }

    /// Convert to Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn to_unix_timestamp(&self) -> f64 {
        (self.0 - MJD_UNIX_EPOCH) * 86400.0
    }

    /// Create from Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn from_unix_timestamp(timestamp: f64) -> Self {
        Self(timestamp / 86400.0 + MJD_UNIX_EPOCH)
    }

    /// Convert to chrono DateTime<Utc>.
    pub fn to_datetime(&self) -> chrono::DateTime<chrono::Utc> {
        let secs = self.to_unix_timestamp();
        let secs_i64 = secs.floor() as i64;
        let nanos = ((secs - secs.floor()) * 1e9) as u32;
        chrono::DateTime::from_timestamp(secs_i64, nanos)
            .unwrap_or(chrono::DateTime::UNIX_EPOCH)
    }

    /// Create from chrono DateTime<Utc>.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self::from_unix_timestamp(dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9)
    }

    /// The current instant.
    pub fn now() -> Self {
        Self::from_datetime(chrono::Utc::now())
    }

    /// Shift by a number of days (fractional days allowed).
    pub fn offset_days(&self, days: f64) -> Self {
        Self(self.0 + days)
    }

    /// Parse a calendar string, interpreted as UTC.
    ///
    /// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD HH:MM`, the `T`-separated
    /// equivalents, and a bare `YYYY-MM-DD` (midnight).
    pub fn parse(s: &str) -> Result<Self> {
        const FORMATS: &[&str] = &[
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%dT%H:%M",
        ];
        let trimmed = s.trim();
        for fmt in FORMATS {
            if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Ok(Self::from_datetime(naive.and_utc()));
            }
        }
        if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self::from_datetime(naive.and_utc()));
            }
        }
        Err(Error::Time {
            value: s.to_string(),
            reason: "expected an ISO calendar date or date-time".to_string(),
        })
    }

    /// ISO date-time string, e.g. `2026-01-15 20:30:00`.
    pub fn iso(&self) -> String {
        self.to_datetime().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Time-of-day part only, e.g. `20:30:00`.
    pub fn iso_time(&self) -> String {
        self.to_datetime().format("%H:%M:%S").to_string()
    }
}

impl From<f64> for ModifiedJulianDate {
    fn from(v: f64) -> Self {
        ModifiedJulianDate::new(v)
    }
}

impl std::fmt::Display for ModifiedJulianDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.iso())
    }
}

/// A closed time interval in MJD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub start: ModifiedJulianDate,
    pub stop: ModifiedJulianDate,
}

impl Period {
    pub fn new(start: ModifiedJulianDate, stop: ModifiedJulianDate) -> Self {
        Self { start, stop }
    }

    pub fn from_mjd(start: f64, stop: f64) -> Self {
        Self::new(ModifiedJulianDate::new(start), ModifiedJulianDate::new(stop))
    }

    /// Interval length in days.
    pub fn duration_days(&self) -> f64 {
        self.stop.value() - self.start.value()
    }

    /// `n` evenly spaced instants spanning the interval, endpoints included.
    ///
    /// Requires `n >= 2`; the first sample equals `start` and the last
    /// equals `stop` exactly.
    pub fn sample(&self, n: usize) -> Vec<ModifiedJulianDate> {
        debug_assert!(n >= 2);
        let span = self.duration_days();
        (0..n)
            .map(|i| {
                if i == n - 1 {
                    self.stop
                } else {
                    self.start.offset_days(span * i as f64 / (n - 1) as f64)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mjd_unix_epoch() {
        // MJD 40587.0 corresponds to the Unix epoch (1970-01-01)
        let mjd = ModifiedJulianDate::new(40587.0);
        assert!(mjd.to_unix_timestamp().abs() < 1.0);
    }

    #[test]
    fn test_mjd_j2000() {
        // 2000-01-01 00:00 UTC is MJD 51544.0
        let mjd = ModifiedJulianDate::parse("2000-01-01 00:00:00").unwrap();
        assert!((mjd.value() - 51544.0).abs() < 1e-9);
    }

    #[test]
    fn test_mjd_roundtrip_datetime() {
        let original = ModifiedJulianDate::new(60694.3271);
        let roundtrip = ModifiedJulianDate::from_datetime(original.to_datetime());
        assert!((original.value() - roundtrip.value()).abs() < 1e-8);
    }

    #[test]
    fn test_parse_variants() {
        let a = ModifiedJulianDate::parse("2026-01-15 20:30:00").unwrap();
        let b = ModifiedJulianDate::parse("2026-01-15T20:30").unwrap();
        assert!((a.value() - b.value()).abs() < 1e-9);

        let midnight = ModifiedJulianDate::parse("2026-01-15").unwrap();
        assert!((midnight.value().fract()).abs() < 1e-9);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ModifiedJulianDate::parse("not a time").is_err());
        assert!(ModifiedJulianDate::parse("15/01/2026").is_err());
    }

    #[test]
    fn test_iso_formatting() {
        let mjd = ModifiedJulianDate::parse("2026-01-15 20:30:00").unwrap();
        assert_eq!(mjd.iso(), "2026-01-15 20:30:00");
        assert_eq!(mjd.iso_time(), "20:30:00");
    }

    #[test]
    fn test_period_sample_endpoints() {
        let period = Period::from_mjd(60694.0, 60695.0);
        let grid = period.sample(100);

        assert_eq!(grid.len(), 100);
        assert_eq!(grid[0], period.start);
        assert_eq!(grid[99], period.stop);
        for pair in grid.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_period_sample_spacing() {
        let period = Period::from_mjd(100.0, 109.0);
        let grid = period.sample(10);
        for (i, t) in grid.iter().enumerate() {
            assert!((t.value() - (100.0 + i as f64)).abs() < 1e-9);
        }
    }
}
