//! Display color assignment.
//!
//! Targets and observation blocks each get a stable `#rrggbb` color drawn
//! from a palette sized to the list, with hues spread evenly around the
//! color wheel so neighbors stay visually distinct.

/// `n` distinct saturated colors for target curves.
pub fn distinct_palette(n: usize) -> Vec<String> {
    hue_spread(n, 0.65, 0.55)
}

/// `n` softer colors for shaded block annotations.
pub fn muted_palette(n: usize) -> Vec<String> {
    hue_spread(n, 0.45, 0.60)
}

fn hue_spread(n: usize, saturation: f64, lightness: f64) -> Vec<String> {
    (0..n)
        .map(|i| hsl_to_hex(360.0 * i as f64 / n.max(1) as f64, saturation, lightness))
        .collect()
}

/// Convert HSL (hue in degrees, saturation and lightness in [0, 1]) to a
/// `#rrggbb` string.
fn hsl_to_hex(hue_deg: f64, saturation: f64, lightness: f64) -> String {
    let h = hue_deg.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
    let (r1, g1, b1) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let to_byte = |v: f64| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        to_byte(r1),
        to_byte(g1),
        to_byte(b1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_palette_size_and_distinctness() {
        for n in 1..=24 {
            let palette = distinct_palette(n);
            assert_eq!(palette.len(), n);
            let unique: HashSet<&String> = palette.iter().collect();
            assert_eq!(unique.len(), n, "duplicate colors for n = {n}");
        }
    }

    #[test]
    fn test_palette_is_stable() {
        assert_eq!(distinct_palette(5), distinct_palette(5));
    }

    #[test]
    fn test_hex_format() {
        for color in distinct_palette(7).iter().chain(muted_palette(3).iter()) {
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_hex(0.0, 1.0, 0.5), "#ff0000");
        assert_eq!(hsl_to_hex(120.0, 1.0, 0.5), "#00ff00");
        assert_eq!(hsl_to_hex(240.0, 1.0, 0.5), "#0000ff");
    }

    #[test]
    fn test_empty_palette() {
        assert!(distinct_palette(0).is_empty());
    }
}
