use crate::{screen_point, ScreenPoint};

/// A rectangular region in screen units, e.g. the plot area.
///
/// `min` is the left-top corner, `max` the right-bottom corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ScreenRect {
    pub min: ScreenPoint,
    pub max: ScreenPoint,
}

impl ScreenRect {
    #[inline]
    pub const fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn from_min_size(min: ScreenPoint, width: f32, height: f32) -> Self {
        Self {
            min,
            max: screen_point(min.x + width, min.y + height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> ScreenPoint {
        screen_point(
            0.5 * (self.min.x + self.max.x),
            0.5 * (self.min.y + self.max.y),
        )
    }

    /// `min <= max` on both dimensions and everything is finite.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.width() >= 0.0 && self.height() >= 0.0
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, p: ScreenPoint) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// Shrink by this much on each side, keeping the center.
    #[inline]
    #[must_use]
    pub fn shrink(&self, amnt: f32) -> Self {
        Self {
            min: screen_point(self.min.x + amnt, self.min.y + amnt),
            max: screen_point(self.max.x - amnt, self.max.y - amnt),
        }
    }

    /// Shrink each side by its own amount (left, top, right, bottom).
    #[must_use]
    pub fn shrink4(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: screen_point(self.min.x + left, self.min.y + top),
            max: screen_point(self.max.x - right, self.max.y - bottom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrink_keeps_orientation() {
        let rect = ScreenRect::from_min_size(screen_point(10.0, 20.0), 100.0, 50.0);
        let inner = rect.shrink4(5.0, 10.0, 15.0, 20.0);
        assert_eq!(inner.min, screen_point(15.0, 30.0));
        assert_eq!(inner.max, screen_point(95.0, 50.0));
        assert!(inner.contains(inner.center()));
    }
}
