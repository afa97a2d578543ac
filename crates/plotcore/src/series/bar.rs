use plotmath::{screen_point, PlotPoint, ScreenRect, ValueRange};

use crate::axis::Axis;
use crate::error::PlotError;
use crate::render::{RenderContext, Stroke};
use crate::Color32;

/// Vertical bars from a base value, with the bar width in data units.
#[derive(Clone, Debug)]
pub struct BarSeries {
    pub title: Option<String>,
    pub fill: Color32,
    pub stroke: Stroke,
    /// The value bars grow from.
    pub base_value: f64,
    /// Bar width in X data units.
    pub bar_width: f64,

    pub(crate) x_axis_key: String,
    pub(crate) y_axis_key: String,

    /// `(x, value)` per bar.
    items: Vec<PlotPoint>,
}

impl Default for BarSeries {
    fn default() -> Self {
        Self {
            title: None,
            fill: Color32::from_rgb(0x4C, 0x78, 0xA8),
            stroke: Stroke::NONE,
            base_value: 0.0,
            bar_width: 0.8,
            x_axis_key: String::new(),
            y_axis_key: String::new(),
            items: Vec::new(),
        }
    }
}

impl BarSeries {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[inline]
    pub fn with_items(mut self, items: Vec<PlotPoint>) -> Self {
        self.items = items;
        self
    }

    #[inline]
    pub fn with_fill(mut self, fill: Color32) -> Self {
        self.fill = fill;
        self
    }

    #[inline]
    pub fn with_base_value(mut self, base_value: f64) -> Self {
        self.base_value = base_value;
        self
    }

    #[inline]
    pub fn with_bar_width(mut self, bar_width: f64) -> Self {
        self.bar_width = bar_width;
        self
    }

    #[inline]
    pub fn with_axis_keys(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_axis_key = x.into();
        self.y_axis_key = y.into();
        self
    }

    #[inline]
    pub fn items(&self) -> &[PlotPoint] {
        &self.items
    }

    pub fn set_items(&mut self, items: Vec<PlotPoint>) {
        self.items = items;
    }

    /// X extent widened by half a bar on each side; Y extent includes the
    /// base value so bars are never clipped at their root.
    pub fn data_extent(&self) -> (ValueRange, ValueRange) {
        let mut x = ValueRange::NOTHING;
        let mut y = ValueRange::NOTHING;
        for item in &self.items {
            x.extend_with(item.x);
            y.extend_with(item.y);
        }
        if x.is_valid() {
            x = x.expand(self.bar_width * 0.5);
            y.extend_with(self.base_value);
        }
        (x, y)
    }

    pub fn render(
        &self,
        rc: &mut dyn RenderContext,
        x_axis: &Axis,
        y_axis: &Axis,
    ) -> Result<(), PlotError> {
        let half = self.bar_width * 0.5;
        let rects: Vec<ScreenRect> = self
            .items
            .iter()
            .filter(|item| item.is_finite())
            .map(|item| {
                let left = x_axis.transform(item.x - half) as f32;
                let right = x_axis.transform(item.x + half) as f32;
                let top = y_axis.transform(item.y) as f32;
                let base = y_axis.transform(self.base_value) as f32;
                ScreenRect::new(
                    screen_point(left.min(right), top.min(base)),
                    screen_point(left.max(right), top.max(base)),
                )
            })
            .collect();
        rc.draw_rects(&rects, Some(self.fill), self.stroke);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisPosition;
    use crate::recorder::{Primitive, RecordingContext};
    use plotmath::plot_point;

    #[test]
    fn extent_covers_base_and_bar_width() {
        let series = BarSeries::new()
            .with_items(vec![plot_point(1.0, 5.0), plot_point(3.0, -2.0)])
            .with_bar_width(1.0);
        let (x, y) = series.data_extent();
        assert_eq!(x, ValueRange::new(0.5, 3.5));
        assert_eq!(y, ValueRange::new(-2.0, 5.0)); // base 0 already inside
    }

    #[test]
    fn bars_are_rects_from_the_base() {
        let mut x = Axis::new("x", AxisPosition::Bottom).with_range(0.0, 10.0);
        let mut y = Axis::new("y", AxisPosition::Left).with_range(0.0, 10.0);
        let area = ScreenRect::from_min_size(screen_point(0.0, 0.0), 100.0, 100.0);
        for axis in [&mut x, &mut y] {
            axis.update_actual_range(ValueRange::NOTHING);
            axis.update_transform(area);
        }

        let series = BarSeries::new()
            .with_items(vec![plot_point(5.0, 4.0)])
            .with_bar_width(2.0);
        let mut rc = RecordingContext::new();
        series.render(&mut rc, &x, &y).unwrap();

        match &rc.primitives()[0] {
            Primitive::Rect { rect, .. } => {
                assert_eq!(rect.min, screen_point(40.0, 60.0));
                assert_eq!(rect.max, screen_point(60.0, 100.0));
            }
            other => panic!("expected a rect, got {other:?}"),
        }
    }
}
