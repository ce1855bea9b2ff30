//! Local planetary ephemeris.
//!
//! Keplerian mean elements (JPL approximate planetary positions, J2000
//! values plus centennial rates, valid 1800–2050) propagated with a Newton
//! solve of Kepler's equation. Positions are geocentric equatorial and good
//! to a few tenths of a degree, which is what a finder chart needs. No
//! network access; this is the "local ephemeris model" used by the planet
//! classification step.

use serde::{Deserialize, Serialize};

use crate::astro::coords::{mean_obliquity, Equatorial};
use crate::astro::{moon, sun};
use crate::models::ModifiedJulianDate;

/// A solar-system body with a locally computable position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    /// Case-insensitive name lookup. `None` for anything that is not a
    /// locally computable body.
    pub fn from_name(name: &str) -> Option<Body> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sun" => Some(Body::Sun),
            "moon" => Some(Body::Moon),
            "mercury" => Some(Body::Mercury),
            "venus" => Some(Body::Venus),
            "mars" => Some(Body::Mars),
            "jupiter" => Some(Body::Jupiter),
            "saturn" => Some(Body::Saturn),
            "uranus" => Some(Body::Uranus),
            "neptune" => Some(Body::Neptune),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }

    /// Geocentric equatorial coordinates at a given instant.
    pub fn equatorial(&self, time: ModifiedJulianDate) -> Equatorial {
        match self {
            Body::Sun => sun::solar_equatorial(time),
            Body::Moon => moon::lunar_equatorial(time),
            Body::Mercury => planet_equatorial(&MERCURY, time),
            Body::Venus => planet_equatorial(&VENUS, time),
            Body::Mars => planet_equatorial(&MARS, time),
            Body::Jupiter => planet_equatorial(&JUPITER, time),
            Body::Saturn => planet_equatorial(&SATURN, time),
            Body::Uranus => planet_equatorial(&URANUS, time),
            Body::Neptune => planet_equatorial(&NEPTUNE, time),
        }
    }
}

/// Keplerian elements at J2000 with per-century rates.
/// Order: a (AU), e, i (deg), mean longitude L (deg),
/// longitude of perihelion (deg), longitude of ascending node (deg).
struct Elements {
    base: [f64; 6],
    rate: [f64; 6],
}

const MERCURY: Elements = Elements {
    base: [0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593],
    rate: [0.00000037, 0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081],
};
const VENUS: Elements = Elements {
    base: [0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255],
    rate: [0.00000390, -0.00004107, -0.00078890, 58517.81538729, 0.00268329, -0.27769418],
};
const EARTH_MOON_BARY: Elements = Elements {
    base: [1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0],
    rate: [0.00000562, -0.00004392, -0.01294668, 35999.37244981, 0.32327364, 0.0],
};
const MARS: Elements = Elements {
    base: [1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891],
    rate: [0.00001847, 0.00007882, -0.00813131, 19140.30268499, 0.44441088, -0.29257343],
};
const JUPITER: Elements = Elements {
    base: [5.20288700, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909],
    rate: [-0.00011607, -0.00013253, -0.00183714, 3034.74612775, 0.21252668, 0.20469106],
};
const SATURN: Elements = Elements {
    base: [9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448],
    rate: [-0.00125060, -0.00050991, 0.00193609, 1222.49362201, -0.41897216, -0.28867794],
};
const URANUS: Elements = Elements {
    base: [19.18916464, 0.04725744, 0.77263783, 313.23810451, 170.95427630, 74.01692503],
    rate: [-0.00196176, -0.00004397, -0.00242939, 428.48202785, 0.40805281, 0.04240589],
};
const NEPTUNE: Elements = Elements {
    base: [30.06992276, 0.00859048, 1.77004347, -55.12002969, 44.96476227, 131.78422574],
    rate: [0.00026291, 0.00005105, 0.00035372, 218.45945325, -0.32241464, -0.00508664],
};

/// Solve Kepler's equation E - e sin E = M by Newton iteration.
/// `m` in radians; returns the eccentric anomaly in radians.
fn solve_kepler(m: f64, e: f64) -> f64 {
    let mut ea = m + e * m.sin();
    for _ in 0..30 {
        let delta = (ea - e * ea.sin() - m) / (1.0 - e * ea.cos());
        ea -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ea
}

/// Heliocentric ecliptic-of-J2000 rectangular position in AU.
fn heliocentric(elements: &Elements, jd: f64) -> [f64; 3] {
    let t = (jd - 2451545.0) / 36525.0;
    let at = |i: usize| elements.base[i] + elements.rate[i] * t;

    let a = at(0);
    let e = at(1);
    let incl = at(2).to_radians();
    let mean_lon = at(3);
    let lon_peri = at(4);
    let lon_node = at(5);

    // mean anomaly, wrapped to [-180, 180) for the Kepler solve
    let mut m = (mean_lon - lon_peri).rem_euclid(360.0);
    if m > 180.0 {
        m -= 360.0;
    }
    let ea = solve_kepler(m.to_radians(), e);

    // position in the orbital plane
    let xp = a * (ea.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ea.sin();

    let omega = (lon_peri - lon_node).to_radians();
    let node = lon_node.to_radians();

    let (so, co) = (omega.sin(), omega.cos());
    let (sn, cn) = (node.sin(), node.cos());
    let (si, ci) = (incl.sin(), incl.cos());

    [
        (co * cn - so * sn * ci) * xp + (-so * cn - co * sn * ci) * yp,
        (co * sn + so * cn * ci) * xp + (-so * sn + co * cn * ci) * yp,
        so * si * xp + co * si * yp,
    ]
}

fn planet_equatorial(elements: &Elements, time: ModifiedJulianDate) -> Equatorial {
    let jd = time.julian_date();
    let planet = heliocentric(elements, jd);
    let earth = heliocentric(&EARTH_MOON_BARY, jd);

    // geocentric ecliptic vector
    let xe = planet[0] - earth[0];
    let ye = planet[1] - earth[1];
    let ze = planet[2] - earth[2];

    // rotate ecliptic -> equatorial about the x axis
    let eps = mean_obliquity(jd).to_radians();
    let x = xe;
    let y = ye * eps.cos() - ze * eps.sin();
    let z = ye * eps.sin() + ze * eps.cos();

    let r = (x * x + y * y + z * z).sqrt();
    Equatorial::new(y.atan2(x).to_degrees(), (z / r).asin().to_degrees())
}
