//! Core data types shared across the crate.

pub mod night;
pub mod observer;
pub mod target;
pub mod time;

pub use night::{NightWindow, ObservationBlock, TwilightPair, OBS_WINDOW_LEN, PLOT_GRID_LEN};
pub use observer::{GeographicLocation, Observer};
pub use target::{Locator, Marker, TargetCategory, TargetRecord};
pub use time::{ModifiedJulianDate, Period};
