//! A [`RenderContext`] that records every primitive it receives.
//!
//! Useful as the test double for render-pipeline assertions and as the
//! front half of serializing exporters (an SVG writer, for instance, is a
//! straightforward fold over the recorded primitives).

use std::cell::Cell;

use plotmath::{ScreenPoint, ScreenRect};

use crate::render::{FontId, HAlign, LineJoin, RenderContext, Stroke, TextMetrics, VAlign};
use crate::Color32;

/// One recorded drawing operation, with owned data.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Line {
        points: Vec<ScreenPoint>,
        stroke: Stroke,
        dash: Option<Vec<f32>>,
        join: LineJoin,
        antialias: bool,
    },
    LineSegments {
        segments: Vec<[ScreenPoint; 2]>,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<ScreenPoint>,
        fill: Option<Color32>,
        stroke: Stroke,
        dash: Option<Vec<f32>>,
        join: LineJoin,
    },
    Rect {
        rect: ScreenRect,
        fill: Option<Color32>,
        stroke: Stroke,
    },
    Ellipse {
        center: ScreenPoint,
        radius_x: f32,
        radius_y: f32,
        fill: Option<Color32>,
        stroke: Stroke,
    },
    Text {
        pos: ScreenPoint,
        text: String,
        color: Color32,
        font: FontId,
        angle: f32,
        halign: HAlign,
        valign: VAlign,
        max_size: Option<(f32, f32)>,
    },
}

/// Records primitives and answers text measurement from a fixed
/// character-width model, so layout is deterministic in tests.
#[derive(Default)]
pub struct RecordingContext {
    primitives: Vec<Primitive>,
    measure_calls: Cell<usize>,
    measured_before_first_draw: Cell<bool>,
    tooltip: Option<String>,
}

/// Average glyph advance as a fraction of the font size.
const GLYPH_ASPECT: f32 = 0.6;

/// Line height as a fraction of the font size.
const LINE_HEIGHT: f32 = 1.2;

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn take_primitives(&mut self) -> Vec<Primitive> {
        std::mem::take(&mut self.primitives)
    }

    /// How often [`RenderContext::measure_text`] was called.
    #[inline]
    pub fn measure_calls(&self) -> usize {
        self.measure_calls.get()
    }

    /// True if at least one measurement happened before the first draw call.
    #[inline]
    pub fn measured_before_first_draw(&self) -> bool {
        self.measured_before_first_draw.get()
    }

    #[inline]
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Recorded polylines, in draw order.
    pub fn lines(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { .. }))
    }

    /// Recorded text draws, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Text { .. }))
    }
}

impl RenderContext for RecordingContext {
    fn draw_line(
        &mut self,
        points: &[ScreenPoint],
        stroke: Stroke,
        dash: Option<&[f32]>,
        join: LineJoin,
        antialias: bool,
    ) {
        self.primitives.push(Primitive::Line {
            points: points.to_vec(),
            stroke,
            dash: dash.map(<[f32]>::to_vec),
            join,
            antialias,
        });
    }

    fn draw_line_segments(&mut self, segments: &[[ScreenPoint; 2]], stroke: Stroke) {
        self.primitives.push(Primitive::LineSegments {
            segments: segments.to_vec(),
            stroke,
        });
    }

    fn draw_polygon(
        &mut self,
        points: &[ScreenPoint],
        fill: Option<Color32>,
        stroke: Stroke,
        dash: Option<&[f32]>,
        join: LineJoin,
    ) {
        self.primitives.push(Primitive::Polygon {
            points: points.to_vec(),
            fill,
            stroke,
            dash: dash.map(<[f32]>::to_vec),
            join,
        });
    }

    fn draw_rect(&mut self, rect: ScreenRect, fill: Option<Color32>, stroke: Stroke) {
        self.primitives.push(Primitive::Rect { rect, fill, stroke });
    }

    fn draw_ellipse(
        &mut self,
        center: ScreenPoint,
        radius_x: f32,
        radius_y: f32,
        fill: Option<Color32>,
        stroke: Stroke,
    ) {
        self.primitives.push(Primitive::Ellipse {
            center,
            radius_x,
            radius_y,
            fill,
            stroke,
        });
    }

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
    ) {
        self.primitives.push(Primitive::Text {
            pos,
            text: text.to_owned(),
            color,
            font: font.clone(),
            angle,
            halign,
            valign,
            max_size,
        });
    }

    fn measure_text(&self, text: &str, font: &FontId) -> TextMetrics {
        self.measure_calls.set(self.measure_calls.get() + 1);
        if self.primitives.is_empty() {
            self.measured_before_first_draw.set(true);
        }
        TextMetrics {
            width: text.chars().count() as f32 * font.size * GLYPH_ASPECT,
            height: font.size * LINE_HEIGHT,
        }
    }

    fn set_tooltip(&mut self, text: Option<&str>) {
        self.tooltip = text.map(str::to_owned);
    }
}
