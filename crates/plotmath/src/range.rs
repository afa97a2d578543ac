/// Inclusive range of data values, i.e. `min..=max`.
///
/// The ranges an axis resolves each update pass are stored in this type.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// The inverse of everything: stretches from positive infinity to negative infinity.
    /// Contains nothing. Use as the start value when accumulating data extents.
    pub const NOTHING: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    #[inline]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The length of the range, i.e. `max - min`.
    #[inline]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// The center of the range.
    #[inline]
    pub fn center(self) -> f64 {
        0.5 * (self.min + self.max)
    }

    /// True if `min` and `max` are finite and `min <= max`.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    #[inline]
    #[must_use]
    pub fn contains(self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Equivalent to `x.clamp(min, max)`.
    #[inline]
    #[must_use]
    pub fn clamp(self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Grow the range to include `x`. NaN is ignored.
    #[inline]
    pub fn extend_with(&mut self, x: f64) {
        if x.is_nan() {
            return;
        }
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    /// The smallest range containing both `self` and `other`.
    #[inline]
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Expand by this much on each side, keeping the center.
    #[inline]
    #[must_use]
    pub fn expand(self, amnt: f64) -> Self {
        Self {
            min: self.min - amnt,
            max: self.max + amnt,
        }
    }

    /// Expand by a fraction of the span on each side, keeping the center.
    #[inline]
    #[must_use]
    pub fn expand_rel(self, fraction: f64) -> Self {
        self.expand(self.span() * fraction)
    }

    /// Shift both ends by `amnt`.
    #[inline]
    #[must_use]
    pub fn translate(self, amnt: f64) -> Self {
        Self {
            min: self.min + amnt,
            max: self.max + amnt,
        }
    }

    /// Scale the span by `factor` around `center`.
    ///
    /// `factor < 1` zooms in (narrows the range), `factor > 1` zooms out.
    #[must_use]
    pub fn zoom_at(self, factor: f64, center: f64) -> Self {
        Self {
            min: center + (self.min - center) * factor,
            max: center + (self.max - center) * factor,
        }
    }
}

impl From<(f64, f64)> for ValueRange {
    #[inline]
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_accumulation() {
        let mut range = ValueRange::NOTHING;
        assert!(!range.is_valid());
        range.extend_with(2.0);
        range.extend_with(f64::NAN);
        range.extend_with(-1.0);
        assert_eq!(range, ValueRange::new(-1.0, 2.0));
        assert!(range.is_valid());
    }

    #[test]
    fn zoom_around_center() {
        let range = ValueRange::new(0.0, 10.0);
        assert_eq!(range.zoom_at(0.5, 5.0), ValueRange::new(2.5, 7.5));
        assert_eq!(range.zoom_at(2.0, 0.0), ValueRange::new(0.0, 20.0));
    }
}
