//! Discretization of a continuous value range into a fixed, ordered list of colors.
//!
//! Used by color axes, heat maps and contour series.

use plotmath::ValueRange;

use crate::Color32;

/// An ordered, fixed-length sequence of colors.
///
/// Immutable once assigned to an axis; build a new palette to change it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Palette {
    colors: Vec<Color32>,
}

impl Palette {
    pub fn new(colors: Vec<Color32>) -> Self {
        debug_assert!(!colors.is_empty(), "a palette needs at least one color");
        Self { colors }
    }

    /// Build an `n`-entry palette by linear interpolation between `stops`.
    ///
    /// The first and last stop map to the first and last entry.
    pub fn interpolated(n: usize, stops: &[Color32]) -> Self {
        let n = n.max(1);
        match stops {
            [] => Self::new(vec![Color32::BLACK; n]),
            [single] => Self::new(vec![*single; n]),
            _ => {
                let colors = (0..n)
                    .map(|i| {
                        let t = if n == 1 {
                            0.0
                        } else {
                            i as f32 / (n - 1) as f32
                        };
                        let scaled = t * (stops.len() - 1) as f32;
                        let lo = (scaled.floor() as usize).min(stops.len() - 2);
                        stops[lo].lerp_to(stops[lo + 1], scaled - lo as f32)
                    })
                    .collect();
                Self::new(colors)
            }
        }
    }

    /// The blue-cyan-green-yellow-red gradient most heat maps default to.
    pub fn jet(n: usize) -> Self {
        Self::interpolated(
            n,
            &[
                Color32::from_rgb(0, 0, 143),
                Color32::BLUE,
                Color32::CYAN,
                Color32::GREEN,
                Color32::YELLOW,
                Color32::ORANGE,
                Color32::RED,
                Color32::from_rgb(128, 0, 0),
            ],
        )
    }

    /// Black to white.
    pub fn gray(n: usize) -> Self {
        Self::interpolated(n, &[Color32::BLACK, Color32::WHITE])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn colors(&self) -> &[Color32] {
        &self.colors
    }

    /// `get_color(index) = palette[index]`, clamped to the last entry.
    #[inline]
    pub fn color(&self, index: usize) -> Color32 {
        self.colors[index.min(self.colors.len() - 1)]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::jet(64)
    }
}

/// Linearly bucket `value` within `range` into an index in `[0, palette_len - 1]`.
///
/// Out-of-range values clamp to the first/last index. A degenerate range
/// (`min == max`, or worse) maps every value to index 0 rather than
/// dividing by zero.
pub fn palette_index(value: f64, range: ValueRange, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    let last = palette_len - 1;
    if range.span() <= 0.0 || !range.span().is_finite() {
        return 0;
    }
    if value <= range.min {
        return 0;
    }
    if value >= range.max {
        return last;
    }
    let t = (value - range.min) / range.span();
    ((t * palette_len as f64).floor() as usize).min(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_clamps_out_of_range() {
        let range = ValueRange::new(0.0, 10.0);
        assert_eq!(palette_index(-5.0, range, 5), palette_index(0.0, range, 5));
        assert_eq!(palette_index(15.0, range, 5), palette_index(10.0, range, 5));
        assert_eq!(palette_index(15.0, range, 5), 4);
    }

    #[test]
    fn index_buckets_linearly() {
        let range = ValueRange::new(0.0, 10.0);
        assert_eq!(palette_index(1.0, range, 5), 0);
        assert_eq!(palette_index(3.0, range, 5), 1);
        assert_eq!(palette_index(5.0, range, 5), 2);
        assert_eq!(palette_index(9.9, range, 5), 4);
    }

    #[test]
    fn degenerate_range_is_index_zero() {
        let range = ValueRange::new(3.0, 3.0);
        for value in [-1.0, 3.0, 7.0] {
            assert_eq!(palette_index(value, range, 5), 0);
        }
    }

    #[test]
    fn interpolated_endpoints_hit_stops() {
        let palette = Palette::interpolated(11, &[Color32::BLACK, Color32::WHITE]);
        assert_eq!(palette.color(0), Color32::BLACK);
        assert_eq!(palette.color(10), Color32::WHITE);
        assert_eq!(palette.len(), 11);
        // Clamped lookup:
        assert_eq!(palette.color(99), Color32::WHITE);
    }
}
