//! Annotations: extra marks drawn above everything else.

use plotmath::PlotPoint;

use crate::axis::Axis;
use crate::render::{FontId, HAlign, RenderContext, VAlign};
use crate::series::transform_point;
use crate::Color32;

/// A piece of text anchored at a data-space position.
#[derive(Clone, Debug)]
pub struct TextAnnotation {
    pub text: String,
    /// Anchor in data coordinates, transformed through the axis pair.
    pub position: PlotPoint,
    pub font: FontId,
    pub color: Color32,
    pub halign: HAlign,
    pub valign: VAlign,
    /// Rotation around the anchor, radians clockwise.
    pub angle: f32,
}

impl TextAnnotation {
    pub fn new(text: impl Into<String>, position: impl Into<PlotPoint>) -> Self {
        Self {
            text: text.into(),
            position: position.into(),
            font: FontId::default(),
            color: Color32::BLACK,
            halign: HAlign::Center,
            valign: VAlign::Center,
            angle: 0.0,
        }
    }

    #[inline]
    pub fn with_font(mut self, font: FontId) -> Self {
        self.font = font;
        self
    }

    #[inline]
    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn with_alignment(mut self, halign: HAlign, valign: VAlign) -> Self {
        self.halign = halign;
        self.valign = valign;
        self
    }

    pub fn render(&self, rc: &mut dyn RenderContext, x_axis: &Axis, y_axis: &Axis) {
        if !self.position.is_finite() {
            return;
        }
        let pos = transform_point(x_axis, y_axis, self.position);
        rc.draw_text(
            pos,
            &self.text,
            self.color,
            &self.font,
            self.angle,
            self.halign,
            self.valign,
            None,
        );
    }
}
