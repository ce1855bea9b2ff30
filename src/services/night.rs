//! Night window construction.
//!
//! Turns an almanac and a requested observation interval into the full
//! [`NightWindow`]: night boundaries, the three twilight tiers, the common
//! plotting grid and the caller's observation blocks.

use log::info;

use crate::almanac::{Almanac, SolarCrossing};
use crate::error::{Error, Result};
use crate::models::{
    ModifiedJulianDate, NightWindow, ObservationBlock, Period, TwilightPair, OBS_WINDOW_LEN,
    PLOT_GRID_LEN,
};
use crate::services::palette::muted_palette;

/// Caller-supplied observation blocks, before end-defaulting.
///
/// `ends` may be shorter than `starts` or hold `None` entries; missing
/// ends default to the next block's start, and the final block falls back
/// to the overall observation end. `colors` may be empty, in which case a
/// muted palette sized to the block count is generated.
#[derive(Debug, Clone, Default)]
pub struct BlockSpec {
    pub starts: Vec<ModifiedJulianDate>,
    pub ends: Vec<Option<ModifiedJulianDate>>,
    pub colors: Vec<String>,
}

/// Build the time structure of one night.
///
/// Events are anchored at `start`: the night runs from the previous
/// sunset to the next sunrise, with the evening twilight events searched
/// backwards and the morning events forwards. Any missing almanac event
/// or an out-of-order event sequence fails the whole run.
pub fn build_night_window(
    almanac: &dyn Almanac,
    start: ModifiedJulianDate,
    end: Option<ModifiedJulianDate>,
    blocks: Option<&BlockSpec>,
) -> Result<NightWindow> {
    let sunset = almanac.sunset_before(start)?;
    let sunrise = almanac.sunrise_after(start)?;

    let twilight = |crossing| -> Result<TwilightPair> {
        Ok(TwilightPair {
            evening: almanac.evening_twilight(crossing, start)?,
            morning: almanac.morning_twilight(crossing, start)?,
        })
    };
    let civil = twilight(SolarCrossing::CivilTwilight)?;
    let nautical = twilight(SolarCrossing::NauticalTwilight)?;
    let astronomical = twilight(SolarCrossing::AstronomicalTwilight)?;

    check_night_ordering(sunset, sunrise, &civil, &nautical, &astronomical)?;

    let plot_grid = Period::new(sunset, sunrise).sample(PLOT_GRID_LEN);
    let obs_window = match end {
        Some(end) => Period::new(start, end).sample(OBS_WINDOW_LEN),
        None => vec![start],
    };

    let blocks = match blocks {
        Some(spec) => resolve_blocks(spec, end)?,
        None => Vec::new(),
    };

    info!(
        "night window {} to {}, {:.1} h astronomical darkness",
        sunset.iso(),
        sunrise.iso(),
        (astronomical.morning.value() - astronomical.evening.value()) * 24.0
    );

    Ok(NightWindow {
        sunset,
        sunrise,
        civil,
        nautical,
        astronomical,
        plot_grid,
        obs_window,
        blocks,
    })
}

/// The night must progress monotonically through its boundaries. A
/// violation means the almanac answered with events from different
/// nights, which no downstream consumer can make sense of.
fn check_night_ordering(
    sunset: ModifiedJulianDate,
    sunrise: ModifiedJulianDate,
    civil: &TwilightPair,
    nautical: &TwilightPair,
    astronomical: &TwilightPair,
) -> Result<()> {
    let sequence = [
        sunset,
        civil.evening,
        nautical.evening,
        astronomical.evening,
        astronomical.morning,
        nautical.morning,
        civil.morning,
        sunrise,
    ];
    let ordered = sequence.windows(2).all(|pair| pair[0] <= pair[1]);
    if !ordered {
        return Err(Error::Almanac(format!(
            "night events out of order: {}",
            sequence
                .iter()
                .map(|t| t.iso())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }
    Ok(())
}

/// Apply the end-defaulting rule and color the blocks.
fn resolve_blocks(
    spec: &BlockSpec,
    overall_end: Option<ModifiedJulianDate>,
) -> Result<Vec<ObservationBlock>> {
    if !spec.colors.is_empty() && spec.colors.len() != spec.starts.len() {
        return Err(Error::Config(format!(
            "{} block colors given for {} blocks",
            spec.colors.len(),
            spec.starts.len()
        )));
    }

    let colors = if spec.colors.is_empty() {
        muted_palette(spec.starts.len())
    } else {
        spec.colors.clone()
    };

    let mut blocks = Vec::with_capacity(spec.starts.len());
    for (i, (&start, color)) in spec.starts.iter().zip(colors).enumerate() {
        let explicit = spec.ends.get(i).copied().flatten();
        let end = match explicit {
            Some(end) => end,
            None => match spec.starts.get(i + 1) {
                Some(&next_start) => next_start,
                None => overall_end.ok_or_else(|| {
                    Error::Config(
                        "final block has no end time and no overall observation end was given"
                            .to_string(),
                    )
                })?,
            },
        };
        if end <= start {
            return Err(Error::Config(format!(
                "block {} ends at {} before it starts at {}",
                i + 1,
                end.iso(),
                start.iso()
            )));
        }
        blocks.push(ObservationBlock { start, end, color });
    }
    Ok(blocks)
}
