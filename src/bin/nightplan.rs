//! Plan one observing night from a configuration document and print the
//! night summary.

use std::path::PathBuf;
use std::process::ExitCode;

use nightplan::catalog::{HorizonsClient, SesameClient};
use nightplan::services::nearest_rise_set;
use nightplan::{pipeline, ReportConfig};

fn main() -> ExitCode {
    env_logger::init();

    let path = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => {
            eprintln!("usage: nightplan <config.json>");
            return ExitCode::FAILURE;
        }
    };

    match plan(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn plan(path: &std::path::Path) -> anyhow::Result<()> {
    let config = ReportConfig::from_file(path)?;
    let ephemerides = HorizonsClient::new()?;
    let names = SesameClient::new()?;

    let report = pipeline::run(&config, &ephemerides, &names)?;

    println!("Night at {}", report.observer.name);
    println!("  sunset        {}", report.window.sunset.iso());
    println!("  civil dusk    {}", report.window.civil.evening.iso());
    println!("  nautical dusk {}", report.window.nautical.evening.iso());
    println!("  astron. dusk  {}", report.window.astronomical.evening.iso());
    println!("  astron. dawn  {}", report.window.astronomical.morning.iso());
    println!("  nautical dawn {}", report.window.nautical.morning.iso());
    println!("  civil dawn    {}", report.window.civil.morning.iso());
    println!("  sunrise       {}", report.window.sunrise.iso());
    println!("  dark hours    {:.1}", report.window.dark_hours());

    if !report.window.blocks.is_empty() {
        println!("Blocks:");
        for block in &report.window.blocks {
            println!(
                "  {} to {}  {}",
                block.start.iso_time(),
                block.end.iso_time(),
                block.color
            );
        }
    }

    println!("Targets:");
    for (target, track) in report.targets.iter().zip(&report.tracks) {
        let visible = track
            .iter()
            .filter(|sample| sample.position.altitude_deg > 0.0)
            .count();
        print!(
            "  {:24} {:12} {:7}  up {:3}/{} samples",
            target.name,
            target.category().label(),
            target.color,
            visible,
            track.len()
        );
        if let (Some(rise), Some(set)) =
            nearest_rise_set(target, report.window.sunset, &report.observer.site)
        {
            print!("  rise {} set {}", rise.iso_time(), set.iso_time());
        }
        println!();
    }

    Ok(())
}
