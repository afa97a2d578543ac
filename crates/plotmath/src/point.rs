use std::fmt;

/// A point in data space.
///
/// Uses `f64` for improved accuracy to enable plotting
/// large values (e.g. unix time on the x axis).
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PlotPoint {
    /// Goes from left to right.
    pub x: f64,

    /// Goes from bottom to top in data space.
    pub y: f64,
}

/// `plot_point(x, y) == PlotPoint::new(x, y)`
#[inline(always)]
pub const fn plot_point(x: f64, y: f64) -> PlotPoint {
    PlotPoint { x, y }
}

impl PlotPoint {
    #[inline(always)]
    pub fn new(x: impl Into<f64>, y: impl Into<f64>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// True if both coordinates are neither infinite nor NaN.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation towards `other`, `t` in `0..=1`.
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: crate::lerp(self.x, other.x, t),
            y: crate::lerp(self.y, other.y, t),
        }
    }
}

impl From<[f64; 2]> for PlotPoint {
    #[inline(always)]
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for PlotPoint {
    #[inline(always)]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Debug for PlotPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2} {:.2})", self.x, self.y)
    }
}

// ----------------------------------------------------------------------------

/// A point in device-independent screen units.
///
/// Y increases downwards, as everywhere else on a screen.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ScreenPoint {
    /// How far to the right.
    pub x: f32,

    /// How far down.
    pub y: f32,
}

/// `screen_point(x, y) == ScreenPoint::new(x, y)`
#[inline(always)]
pub const fn screen_point(x: f32, y: f32) -> ScreenPoint {
    ScreenPoint { x, y }
}

impl ScreenPoint {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline(always)]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<[f32; 2]> for ScreenPoint {
    #[inline(always)]
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl fmt::Debug for ScreenPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.1} {:.1}]", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_and_distance() {
        let a = plot_point(0.0, 0.0);
        let b = plot_point(4.0, 3.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.lerp(b, 0.5), plot_point(2.0, 1.5));
    }
}
