//! The crate's working layer: classification, night construction, color
//! assignment and track sampling.

pub mod night;
pub mod palette;
pub mod resolver;
pub mod track;

pub use night::{build_night_window, BlockSpec};
pub use resolver::TargetResolver;
pub use track::{horizontal_track, nearest_rise_set, TrackSample};
