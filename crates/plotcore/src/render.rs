//! The render-context contract.
//!
//! Every drawing surface (bitmap rasterizer, SVG/PDF writer, native UI
//! canvas) implements [`RenderContext`] once; axes and series emit their
//! geometry against it in device-independent screen units. The contract is
//! a pure output sink: implementations never read plot state and never call
//! back into the plot.

use plotmath::{ScreenPoint, ScreenRect};

use crate::Color32;

/// Describes the width and color of a line.
///
/// The default stroke is the same as [`Stroke::NONE`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Stroke {
    pub width: f32,
    pub color: Color32,
}

impl Stroke {
    /// Same as [`Stroke::default`].
    pub const NONE: Self = Self {
        width: 0.0,
        color: Color32::TRANSPARENT,
    };

    #[inline]
    pub fn new(width: impl Into<f32>, color: impl Into<Color32>) -> Self {
        Self {
            width: width.into(),
            color: color.into(),
        }
    }

    /// True if width is zero or color is transparent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.color.is_transparent()
    }
}

impl<Color> From<(f32, Color)> for Stroke
where
    Color: Into<Color32>,
{
    #[inline(always)]
    fn from((width, color): (f32, Color)) -> Self {
        Self::new(width, color)
    }
}

/// How two joined polyline segments meet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Solid, dotted, dashed, etc.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum LineStyle {
    Solid,
    Dotted { spacing: f32 },
    Dashed { length: f32 },
}

impl LineStyle {
    pub fn dashed_loose() -> Self {
        Self::Dashed { length: 10.0 }
    }

    pub fn dashed_dense() -> Self {
        Self::Dashed { length: 5.0 }
    }

    pub fn dotted_loose() -> Self {
        Self::Dotted { spacing: 10.0 }
    }

    pub fn dotted_dense() -> Self {
        Self::Dotted { spacing: 5.0 }
    }

    /// The `on, off` dash pattern to pass to a render context,
    /// or `None` for a solid line.
    pub fn dash_pattern(&self, stroke_width: f32) -> Option<Vec<f32>> {
        match *self {
            Self::Solid => None,
            Self::Dotted { spacing } => Some(vec![stroke_width.max(1.0), spacing]),
            Self::Dashed { length } => Some(vec![length, length * 0.5]),
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::Solid
    }
}

// ----------------------------------------------------------------------------

/// Font family choice, resolved by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FontFamily {
    #[default]
    Proportional,
    Monospace,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// How to select a font: size, family and weight.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FontId {
    /// Height in screen units.
    pub size: f32,
    pub family: FontFamily,
    pub weight: FontWeight,
}

impl Default for FontId {
    fn default() -> Self {
        Self {
            size: 12.0,
            family: FontFamily::Proportional,
            weight: FontWeight::Normal,
        }
    }
}

impl FontId {
    #[inline]
    pub const fn new(size: f32, family: FontFamily) -> Self {
        Self {
            size,
            family,
            weight: FontWeight::Normal,
        }
    }

    #[inline]
    pub const fn proportional(size: f32) -> Self {
        Self::new(size, FontFamily::Proportional)
    }

    #[inline]
    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }
}

/// Horizontal anchoring of drawn text relative to its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical anchoring of drawn text relative to its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// The size of a measured piece of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
}

// ----------------------------------------------------------------------------

/// The primitive drawing operations a surface must provide.
///
/// All coordinates are already in screen space (post axis-transform).
/// [`Self::measure_text`] must work before any drawing has happened; the
/// plot layout depends on it to size margins and legends.
pub trait RenderContext {
    /// Draw a connected polyline.
    fn draw_line(
        &mut self,
        points: &[ScreenPoint],
        stroke: Stroke,
        dash: Option<&[f32]>,
        join: LineJoin,
        antialias: bool,
    );

    /// Draw disconnected line segments (e.g. tick marks), where polyline
    /// joins would be undesired.
    fn draw_line_segments(&mut self, segments: &[[ScreenPoint; 2]], stroke: Stroke);

    /// Draw a closed polygon with optional fill and outline. The outline
    /// takes the same dash and join options as [`Self::draw_line`].
    fn draw_polygon(
        &mut self,
        points: &[ScreenPoint],
        fill: Option<Color32>,
        stroke: Stroke,
        dash: Option<&[f32]>,
        join: LineJoin,
    );

    /// Draw a rectangle with optional fill and outline.
    fn draw_rect(&mut self, rect: ScreenRect, fill: Option<Color32>, stroke: Stroke);

    /// Draw many identically-styled rectangles. Backends may batch this.
    fn draw_rects(&mut self, rects: &[ScreenRect], fill: Option<Color32>, stroke: Stroke) {
        for &rect in rects {
            self.draw_rect(rect, fill, stroke);
        }
    }

    /// Draw an axis-aligned ellipse.
    fn draw_ellipse(
        &mut self,
        center: ScreenPoint,
        radius_x: f32,
        radius_y: f32,
        fill: Option<Color32>,
        stroke: Stroke,
    );

    /// Draw many identically-styled ellipses. Backends may batch this.
    fn draw_ellipses(
        &mut self,
        centers: &[ScreenPoint],
        radius_x: f32,
        radius_y: f32,
        fill: Option<Color32>,
        stroke: Stroke,
    ) {
        for &center in centers {
            self.draw_ellipse(center, radius_x, radius_y, fill, stroke);
        }
    }

    /// Draw text anchored at `pos`.
    ///
    /// `angle` is in radians, clockwise, around the anchor point.
    /// `max_size` optionally bounds the laid-out text (for trimming).
    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        pos: ScreenPoint,
        text: &str,
        color: Color32,
        font: &FontId,
        angle: f32,
        halign: HAlign,
        valign: VAlign,
        max_size: Option<(f32, f32)>,
    );

    /// Measure the size of `text` in the given font.
    ///
    /// A pure query with no side effect.
    fn measure_text(&self, text: &str, font: &FontId) -> TextMetrics;

    /// Advisory tooltip hint; surfaces without tooltips ignore it.
    fn set_tooltip(&mut self, _text: Option<&str>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_emptiness() {
        assert!(Stroke::NONE.is_empty());
        assert!(Stroke::new(0.0, Color32::RED).is_empty());
        assert!(!Stroke::new(1.0, Color32::RED).is_empty());
    }

    #[test]
    fn dash_patterns() {
        assert_eq!(LineStyle::Solid.dash_pattern(2.0), None);
        assert_eq!(
            LineStyle::dashed_loose().dash_pattern(2.0),
            Some(vec![10.0, 5.0])
        );
        assert_eq!(
            LineStyle::dotted_dense().dash_pattern(2.0),
            Some(vec![2.0, 5.0])
        );
    }
}
