use plotmath::{spline, PlotPoint, ScreenPoint};

use crate::axis::Axis;
use crate::error::PlotError;
use crate::render::{LineJoin, LineStyle, RenderContext, Stroke};
use crate::Color32;

use super::{transform_point, Marker, MarkerShape};

/// A polyline through ordered points, optionally smoothed and marked.
#[derive(Clone, Debug)]
pub struct LineSeries {
    pub title: Option<String>,
    pub stroke: Stroke,
    pub style: LineStyle,
    pub join: LineJoin,
    pub antialias: bool,
    pub marker: Option<Marker>,

    /// Run the points through the Catmull-Rom kernel before drawing.
    pub smooth: bool,
    /// Chord-length exponent; 0.5 is the centripetal parametrization.
    pub smooth_alpha: f64,
    /// Screen-unit flattening tolerance for the smoothed curve.
    pub smooth_tolerance: f64,
    pub smooth_max_segments: usize,

    pub(crate) x_axis_key: String,
    pub(crate) y_axis_key: String,

    points: Vec<PlotPoint>,
    data_version: u64,
    /// Smoothed points, stamped with the data version they were built from.
    smoothed: Option<(u64, Vec<PlotPoint>)>,
}

impl Default for LineSeries {
    fn default() -> Self {
        Self {
            title: None,
            stroke: Stroke::new(2.0, Color32::DARK_BLUE),
            style: LineStyle::Solid,
            join: LineJoin::Miter,
            antialias: true,
            marker: None,
            smooth: false,
            smooth_alpha: spline::CENTRIPETAL_ALPHA,
            smooth_tolerance: 1.0,
            smooth_max_segments: 100,
            x_axis_key: String::new(),
            y_axis_key: String::new(),
            points: Vec::new(),
            data_version: 0,
            smoothed: None,
        }
    }
}

impl LineSeries {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[inline]
    pub fn with_points(mut self, points: Vec<PlotPoint>) -> Self {
        self.set_points(points);
        self
    }

    #[inline]
    pub fn with_stroke(mut self, stroke: impl Into<Stroke>) -> Self {
        self.stroke = stroke.into();
        self
    }

    #[inline]
    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    #[inline]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    #[inline]
    pub fn smoothed(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    #[inline]
    pub fn with_axis_keys(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_axis_key = x.into();
        self.y_axis_key = y.into();
        self
    }

    #[inline]
    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    /// Replace all points. Invalidates the smoothing cache.
    pub fn set_points(&mut self, points: Vec<PlotPoint>) {
        self.points = points;
        self.data_version += 1;
    }

    /// Append a point. Invalidates the smoothing cache.
    pub fn push_point(&mut self, point: impl Into<PlotPoint>) {
        self.points.push(point.into());
        self.data_version += 1;
    }

    /// Rebuild the smoothing cache if it is stale. Called by the plot's
    /// update pass; render never computes geometry.
    pub fn update_data(&mut self) {
        if !self.smooth {
            self.smoothed = None;
            return;
        }
        let stale = !matches!(&self.smoothed, Some((version, _)) if *version == self.data_version);
        if stale {
            let smoothed = spline::catmull_rom(
                &self.points,
                false,
                self.smooth_alpha,
                self.smooth_tolerance,
                self.smooth_max_segments,
            );
            self.smoothed = Some((self.data_version, smoothed));
        }
    }

    /// The points actually drawn: the smoothing cache when fresh, raw
    /// points otherwise.
    fn effective_points(&self) -> &[PlotPoint] {
        if self.smooth {
            if let Some((version, smoothed)) = &self.smoothed {
                if *version == self.data_version {
                    return smoothed;
                }
            }
            log::warn!("line series rendered with a stale smoothing cache; drawing raw points");
        }
        &self.points
    }

    pub fn render(
        &self,
        rc: &mut dyn RenderContext,
        x_axis: &Axis,
        y_axis: &Axis,
    ) -> Result<(), PlotError> {
        // One polyline per run of finite points; a NaN data point, or a
        // point outside the axis domain (e.g. zero on a log axis), breaks
        // the line.
        let mut run: Vec<ScreenPoint> = Vec::new();
        for &p in self.effective_points() {
            let sp = transform_point(x_axis, y_axis, p);
            if p.is_finite() && sp.is_finite() {
                run.push(sp);
            } else if !run.is_empty() {
                self.draw_run(rc, &run);
                run.clear();
            }
        }
        if !run.is_empty() {
            self.draw_run(rc, &run);
        }

        if let Some(marker) = self.marker {
            let centers: Vec<ScreenPoint> = self
                .points
                .iter()
                .map(|&p| transform_point(x_axis, y_axis, p))
                .filter(|sp| sp.is_finite())
                .collect();
            draw_markers(rc, &centers, marker);
        }
        Ok(())
    }

    fn draw_run(&self, rc: &mut dyn RenderContext, run: &[ScreenPoint]) {
        if run.len() < 2 || self.stroke.is_empty() {
            return;
        }
        let dash = self.style.dash_pattern(self.stroke.width);
        rc.draw_line(run, self.stroke, dash.as_deref(), self.join, self.antialias);
    }
}

/// Draw a batch of identical markers.
pub(super) fn draw_markers(rc: &mut dyn RenderContext, centers: &[ScreenPoint], marker: Marker) {
    if centers.is_empty() {
        return;
    }
    match marker.shape {
        MarkerShape::Circle => {
            rc.draw_ellipses(
                centers,
                marker.size,
                marker.size,
                Some(marker.fill),
                marker.stroke,
            );
        }
        MarkerShape::Square => {
            let rects: Vec<_> = centers
                .iter()
                .map(|c| {
                    plotmath::ScreenRect::new(
                        plotmath::screen_point(c.x - marker.size, c.y - marker.size),
                        plotmath::screen_point(c.x + marker.size, c.y + marker.size),
                    )
                })
                .collect();
            rc.draw_rects(&rects, Some(marker.fill), marker.stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisPosition;
    use crate::recorder::{Primitive, RecordingContext};
    use plotmath::{plot_point, screen_point, ScreenRect, ValueRange};

    fn axis_pair() -> (Axis, Axis) {
        let area = ScreenRect::from_min_size(screen_point(0.0, 0.0), 100.0, 100.0);
        let mut x = Axis::new("x", AxisPosition::Bottom).with_range(0.0, 10.0);
        let mut y = Axis::new("y", AxisPosition::Left).with_range(0.0, 10.0);
        for axis in [&mut x, &mut y] {
            axis.update_actual_range(ValueRange::NOTHING);
            axis.update_transform(area);
        }
        (x, y)
    }

    #[test]
    fn nan_breaks_the_polyline() {
        let (x, y) = axis_pair();
        let series = LineSeries::new().with_points(vec![
            plot_point(0.0, 0.0),
            plot_point(2.0, 2.0),
            plot_point(f64::NAN, 5.0),
            plot_point(6.0, 6.0),
            plot_point(8.0, 8.0),
        ]);

        let mut rc = RecordingContext::new();
        series.render(&mut rc, &x, &y).unwrap();
        assert_eq!(rc.lines().count(), 2);
    }

    #[test]
    fn smoothing_cache_follows_data_version() {
        let mut series = LineSeries::new()
            .smoothed(true)
            .with_points(vec![
                plot_point(0.0, 0.0),
                plot_point(1.0, 2.0),
                plot_point(2.0, 0.0),
            ]);
        series.update_data();
        let first_len = series.effective_points().len();
        assert!(first_len > 3, "smoothing should insert points");

        // Mutating data invalidates the cache until the next update:
        series.push_point(plot_point(3.0, 2.0));
        assert_eq!(series.effective_points().len(), 4); // stale cache unused
        series.update_data();
        assert!(series.effective_points().len() > 4);
    }

    #[test]
    fn markers_are_batched() {
        let (x, y) = axis_pair();
        let series = LineSeries::new()
            .with_points(vec![plot_point(1.0, 1.0), plot_point(2.0, 2.0)])
            .with_marker(Marker::default());

        let mut rc = RecordingContext::new();
        series.render(&mut rc, &x, &y).unwrap();
        let ellipse_batches = rc
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Ellipse { .. }))
            .count();
        // Two markers via the batched entry point -> two ellipse records,
        // but exactly one polyline:
        assert_eq!(ellipse_batches, 2);
        assert_eq!(rc.lines().count(), 1);
    }
}
