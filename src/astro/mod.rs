//! Local astronomical computations: coordinates, the Sun, the Moon and the
//! major planets. Everything here is offline; remote ephemerides live in
//! [`crate::catalog`].

pub mod coords;
pub mod moon;
pub mod planets;
pub mod sun;

pub use coords::{Equatorial, Horizontal};
pub use planets::Body;
