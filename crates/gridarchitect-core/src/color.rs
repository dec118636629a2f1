//! Deterministic area colors.
//!
//! Hues are spaced by the golden angle so consecutive ordinals land far apart
//! on the color wheel. Each area gets a background, border and text shade of
//! the same hue.

use serde::{Deserialize, Serialize};

/// Hue step between consecutive ordinals, in degrees.
pub const GOLDEN_ANGLE: f64 = 137.508;

/// (saturation, lightness) pairs in percent.
const BG_SL: (f64, f64) = (45.0, 82.0);
const BORDER_SL: (f64, f64) = (40.0, 62.0);
const TEXT_SL: (f64, f64) = (35.0, 30.0);

/// Colors used to draw one area, as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaColor {
    pub bg: String,
    pub border: String,
    pub text: String,
}

impl AreaColor {
    /// Neutral colors for an area without an assigned ordinal.
    pub fn fallback() -> Self {
        Self {
            bg: "#333333".to_string(),
            border: "#555555".to_string(),
            text: "#ffffff".to_string(),
        }
    }
}

/// Hue in degrees for ordinal `index`.
pub fn area_hue(index: usize) -> f64 {
    (index as f64 * GOLDEN_ANGLE).rem_euclid(360.0)
}

/// Color triple for the area at ordinal `index`.
pub fn area_color(index: usize) -> AreaColor {
    let hue = area_hue(index);
    AreaColor {
        bg: hsl_to_hex(hue, BG_SL.0, BG_SL.1),
        border: hsl_to_hex(hue, BORDER_SL.0, BORDER_SL.1),
        text: hsl_to_hex(hue, TEXT_SL.0, TEXT_SL.1),
    }
}

/// Convert HSL (hue in degrees, saturation and lightness in percent)
/// to a lowercase `#rrggbb` string.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let s = s / 100.0;
    let l = l / 100.0;
    let a = s * l.min(1.0 - l);
    let channel = |n: f64| -> u8 {
        let k = (n + h / 30.0).rem_euclid(12.0);
        let value = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * value).round().clamp(0.0, 255.0) as u8
    };
    format!("#{:02x}{:02x}{:02x}", channel(0.0), channel(8.0), channel(4.0))
}

/// Colors for the declared areas, keyed by ordinal position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorMap {
    entries: Vec<(String, AreaColor)>,
}

impl ColorMap {
    /// Assign each declared area the color of its ordinal.
    pub fn for_areas<S: AsRef<str>>(areas: &[S]) -> Self {
        Self {
            entries: areas
                .iter()
                .enumerate()
                .map(|(i, name)| (name.as_ref().to_string(), area_color(i)))
                .collect(),
        }
    }

    /// Color of `name`, if declared.
    pub fn get(&self, name: &str) -> Option<&AreaColor> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, color)| color)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AreaColor)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colors() {
        assert_eq!(hsl_to_hex(0.0, 100.0, 50.0), "#ff0000");
        assert_eq!(hsl_to_hex(120.0, 100.0, 50.0), "#00ff00");
        assert_eq!(hsl_to_hex(240.0, 100.0, 50.0), "#0000ff");
        assert_eq!(hsl_to_hex(0.0, 0.0, 100.0), "#ffffff");
        assert_eq!(hsl_to_hex(0.0, 0.0, 0.0), "#000000");
    }

    #[test]
    fn test_ordinal_zero() {
        let color = area_color(0);
        // hue 0, s 45, l 82: a = 0.081, r = 0.901, g = b = 0.739
        assert_eq!(color.bg, "#e6bcbc");
        assert!(color.border.starts_with('#') && color.border.len() == 7);
        assert!(color.text.chars().skip(1).all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_negative_hue_wraps() {
        assert_eq!(hsl_to_hex(-120.0, 100.0, 50.0), hsl_to_hex(240.0, 100.0, 50.0));
    }

    #[test]
    fn test_small_ordinals_have_distinct_hues() {
        let hues: Vec<f64> = (0..9).map(area_hue).collect();
        for i in 0..hues.len() {
            for j in (i + 1)..hues.len() {
                let diff = (hues[i] - hues[j]).abs();
                let diff = diff.min(360.0 - diff);
                assert!(diff > 5.0, "ordinals {} and {} too close: {}", i, j, diff);
            }
        }
        let bgs: std::collections::HashSet<String> = (0..9).map(|i| area_color(i).bg).collect();
        assert_eq!(bgs.len(), 9);
    }

    #[test]
    fn test_hue_stays_in_range() {
        for i in [0, 1, 2, 3, 100, 1_000, 123_456] {
            let hue = area_hue(i);
            assert!((0.0..360.0).contains(&hue));
        }
    }

    #[test]
    fn test_color_map_follows_ordinal() {
        let map = ColorMap::for_areas(&["x", "y"]);
        assert_eq!(map.get("x"), Some(&area_color(0)));
        assert_eq!(map.get("y"), Some(&area_color(1)));
        assert_eq!(map.get("z"), None);

        let renamed = ColorMap::for_areas(&["other", "y"]);
        assert_eq!(renamed.get("other"), map.get("x"));
    }
}
