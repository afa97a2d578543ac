//! The plot orchestrator: owns axes, series, legend and annotations, and
//! runs the two-phase update/render cycle.
//!
//! The cycle is driven synchronously by a host loop: `update` resolves data
//! extents and derived geometry, `render` lays out margins (text measurement
//! first, drawing second) and emits primitives. The only cross-thread entry
//! point is [`PlotModel::invalidate`]; everything else takes `&mut self`, so
//! a render pass can never be re-entered.

use parking_lot::Mutex;
use plotmath::{screen_point, ScreenRect, ValueRange};

use crate::annotation::TextAnnotation;
use crate::axis::Axis;
use crate::error::PlotError;
use crate::legend::Legend;
use crate::render::{FontId, HAlign, RenderContext, Stroke, VAlign};
use crate::series::{find_color_axis, find_x_axis, find_y_axis, Series};
use crate::Color32;

/// Pending invalidation state, shared with producer threads.
///
/// Guarded by a mutex held only long enough to set or drain the two flags;
/// never held across an update or render pass.
#[derive(Default)]
struct Pending {
    invalidated: bool,
    update_data: bool,
}

/// A complete plot: axes, series, annotations, legend and chrome.
pub struct PlotModel {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub title_font: FontId,
    pub text_color: Color32,
    pub background: Option<Color32>,
    /// Blank space around the outside of everything.
    pub padding: f32,
    pub legend: Option<Legend>,

    axes: Vec<Axis>,
    series: Vec<Series>,
    annotations: Vec<TextAnnotation>,

    pending: Mutex<Pending>,
}

impl Default for PlotModel {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            title_font: FontId::proportional(16.0).bold(),
            text_color: Color32::BLACK,
            background: Some(Color32::WHITE),
            padding: 8.0,
            legend: None,
            axes: Vec::new(),
            series: Vec::new(),
            annotations: Vec::new(),
            pending: Mutex::new(Pending::default()),
        }
    }
}

impl PlotModel {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn add_axis(&mut self, axis: Axis) {
        self.axes.push(axis);
    }

    pub fn add_series(&mut self, series: impl Into<Series>) {
        self.series.push(series.into());
    }

    pub fn add_annotation(&mut self, annotation: TextAnnotation) {
        self.annotations.push(annotation);
    }

    #[inline]
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    #[inline]
    pub fn axes_mut(&mut self) -> &mut [Axis] {
        &mut self.axes
    }

    #[inline]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[inline]
    pub fn series_mut(&mut self) -> &mut [Series] {
        &mut self.series
    }

    /// Discard pan/zoom state on every axis.
    pub fn reset_axes(&mut self) {
        for axis in &mut self.axes {
            axis.reset();
        }
    }

    // --- invalidation -----------------------------------------------------

    /// Request an update/render pass. Callable from any thread, including
    /// while a render is in progress on the host thread; requests coalesce
    /// by OR-ing until the next render drains them.
    pub fn invalidate(&self, update_data: bool) {
        let mut pending = self.pending.lock();
        pending.invalidated = true;
        pending.update_data |= update_data;
    }

    /// Drain the pending invalidation; `Some(update_data)` if one was set.
    fn take_pending(&self) -> Option<bool> {
        let mut pending = self.pending.lock();
        if !pending.invalidated {
            return None;
        }
        pending.invalidated = false;
        Some(std::mem::take(&mut pending.update_data))
    }

    /// True if an invalidation is waiting to be drained.
    pub fn is_invalidated(&self) -> bool {
        self.pending.lock().invalidated
    }

    // --- update -----------------------------------------------------------

    /// Phase one: refresh derived series geometry (when `update_data`) and
    /// resolve every axis's actual range from the extents of the series
    /// bound to it. Dangling axis keys and bad grids surface here.
    pub fn update(&mut self, update_data: bool) -> Result<(), PlotError> {
        log::trace!(
            "update pass over {} series (update_data: {update_data})",
            self.series.len()
        );
        if update_data {
            for series in &mut self.series {
                series.update_data()?;
            }
        }

        let mut extents = vec![ValueRange::NOTHING; self.axes.len()];
        for series in &self.series {
            let (xi, yi, ci) = resolve_axes(&self.axes, series)?;
            let (x_extent, y_extent) = series.data_extent();
            extents[xi] = extents[xi].union(x_extent);
            extents[yi] = extents[yi].union(y_extent);
            if let (Some(ci), Some(c_extent)) = (ci, series.color_extent()) {
                extents[ci] = extents[ci].union(c_extent);
            }
        }
        for (axis, extent) in self.axes.iter_mut().zip(extents) {
            axis.update_actual_range(extent);
        }
        Ok(())
    }

    // --- render -----------------------------------------------------------

    /// Phase two: drain any pending invalidation, lay out the plot area
    /// (all text measurement happens here, before any draw call), update
    /// axis transforms, then draw everything in order.
    pub fn render(
        &mut self,
        rc: &mut dyn RenderContext,
        width: f32,
        height: f32,
    ) -> Result<(), PlotError> {
        if let Some(update_data) = self.take_pending() {
            self.update(update_data)?;
        }

        let full = ScreenRect::from_min_size(screen_point(0.0, 0.0), width, height);
        let outer = full.shrink(self.padding);

        // Measurement phase: title band and per-edge axis margins.
        let title_height = self.measure_title_band(rc);
        let mut margins = EdgeMargins::default();
        for axis in &self.axes {
            let approx = if axis.position().is_horizontal() {
                outer.width()
            } else {
                outer.height()
            };
            let thickness = axis.measure(rc, approx)?;
            margins.add(axis, thickness);
        }

        let area = outer.shrink4(
            margins.left,
            margins.top + title_height,
            margins.right,
            margins.bottom,
        );
        if !area.is_valid() || area.width() <= 0.0 || area.height() <= 0.0 {
            log::warn!("plot area {area:?} is empty at {width}x{height}; skipping render");
            return Ok(());
        }

        for axis in &mut self.axes {
            axis.update_transform(area);
        }

        // Draw phase. Fixed order: background, series in z-order, axes and
        // gridlines, legend, annotations on top.
        if let Some(background) = self.background {
            rc.draw_rect(full, Some(background), Stroke::NONE);
        }
        self.render_title_band(rc, outer);

        for series in &self.series {
            let (xi, yi, ci) = resolve_axes(&self.axes, series)?;
            series.render(rc, &self.axes[xi], &self.axes[yi], ci.map(|i| &self.axes[i]))?;
        }

        for axis in &self.axes {
            axis.render_gridlines(rc, area)?;
        }
        for axis in &self.axes {
            axis.render(rc, area)?;
        }

        if let Some(legend) = &self.legend {
            let entries: Vec<_> = self.series.iter().filter_map(Series::legend_entry).collect();
            legend.render(rc, &entries, area);
        }

        if !self.annotations.is_empty() {
            let x_axis = self.axes.iter().find(|a| a.position().is_horizontal());
            let y_axis = self.axes.iter().find(|a| a.position().is_vertical());
            if let (Some(x_axis), Some(y_axis)) = (x_axis, y_axis) {
                for annotation in &self.annotations {
                    annotation.render(rc, x_axis, y_axis);
                }
            } else {
                log::warn!("annotations need an x/y axis pair; none configured");
            }
        }
        Ok(())
    }

    fn measure_title_band(&self, rc: &dyn RenderContext) -> f32 {
        let mut height = 0.0;
        if let Some(title) = &self.title {
            height += rc.measure_text(title, &self.title_font).height;
        }
        if let Some(subtitle) = &self.subtitle {
            height += rc.measure_text(subtitle, &FontId::default()).height;
        }
        if height > 0.0 {
            height += self.padding;
        }
        height
    }

    fn render_title_band(&self, rc: &mut dyn RenderContext, outer: ScreenRect) {
        let center_x = outer.center().x;
        let mut y = outer.min.y;
        if let Some(title) = &self.title {
            rc.draw_text(
                screen_point(center_x, y),
                title,
                self.text_color,
                &self.title_font,
                0.0,
                HAlign::Center,
                VAlign::Top,
                None,
            );
            y += self.title_font.size * 1.2;
        }
        if let Some(subtitle) = &self.subtitle {
            rc.draw_text(
                screen_point(center_x, y),
                subtitle,
                self.text_color,
                &FontId::default(),
                0.0,
                HAlign::Center,
                VAlign::Top,
                None,
            );
        }
    }
}

/// Resolve the (x, y, color) axis indices for a series.
fn resolve_axes(
    axes: &[Axis],
    series: &Series,
) -> Result<(usize, usize, Option<usize>), PlotError> {
    let xi = find_x_axis(axes, series.x_axis_key(), series)?;
    let yi = find_y_axis(axes, series.y_axis_key(), series)?;
    let ci = match series.color_axis_key() {
        Some(key) => Some(find_color_axis(axes, key, series)?),
        None => None,
    };
    Ok((xi, yi, ci))
}

/// Accumulated margin per plot edge. Same-edge axes stack, so their
/// thicknesses add.
#[derive(Default)]
struct EdgeMargins {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl EdgeMargins {
    fn add(&mut self, axis: &Axis, thickness: f32) {
        use crate::axis::AxisPosition;
        match axis.position() {
            AxisPosition::Left => self.left += thickness,
            AxisPosition::Right => self.right += thickness,
            AxisPosition::Top => self.top += thickness,
            AxisPosition::Bottom => self.bottom += thickness,
            AxisPosition::None | AxisPosition::Angle | AxisPosition::Magnitude => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisPosition;
    use crate::recorder::RecordingContext;
    use crate::series::LineSeries;
    use plotmath::plot_point;

    fn xy_model() -> PlotModel {
        let mut model = PlotModel::new();
        model.add_axis(Axis::new("x", AxisPosition::Bottom).with_range(0.0, 40.0));
        model.add_axis(Axis::new("y", AxisPosition::Left).with_range(0.0, 10.0));
        model
    }

    #[test]
    fn invalidation_coalesces_by_or() {
        let model = xy_model();
        assert!(!model.is_invalidated());

        model.invalidate(false);
        model.invalidate(true);
        model.invalidate(false);
        assert!(model.is_invalidated());

        // One drain sees the OR of all requests:
        assert_eq!(model.take_pending(), Some(true));
        assert_eq!(model.take_pending(), None);
    }

    #[test]
    fn unknown_axis_key_fails_update() {
        let mut model = xy_model();
        model.add_series(LineSeries::new().with_axis_keys("nope", "y"));
        assert!(matches!(
            model.update(true),
            Err(PlotError::UnknownAxis { .. })
        ));
    }

    #[test]
    fn axes_resolve_from_series_extents() {
        let mut model = PlotModel::new();
        model.add_axis(Axis::new("x", AxisPosition::Bottom).with_padding_fraction(0.0));
        model.add_axis(Axis::new("y", AxisPosition::Left).with_padding_fraction(0.0));
        model.add_series(
            LineSeries::new().with_points(vec![plot_point(2.0, -1.0), plot_point(8.0, 5.0)]),
        );

        model.update(true).unwrap();
        assert_eq!(model.axes()[0].actual_range(), ValueRange::new(2.0, 8.0));
        assert_eq!(model.axes()[1].actual_range(), ValueRange::new(-1.0, 5.0));
    }

    #[test]
    fn render_is_skipped_when_too_small() {
        let mut model = xy_model();
        let mut rc = RecordingContext::new();
        // Too small for the axis margins; must not draw or panic.
        model.update(true).unwrap();
        model.render(&mut rc, 10.0, 10.0).unwrap();
        assert!(rc.primitives().is_empty());
    }

    #[test]
    fn render_drains_pending_invalidation() {
        let mut model = xy_model();
        model.add_series(
            LineSeries::new().with_points(vec![plot_point(0.0, 0.0), plot_point(40.0, 10.0)]),
        );
        model.invalidate(true);

        let mut rc = RecordingContext::new();
        model.render(&mut rc, 600.0, 400.0).unwrap();
        assert!(!model.is_invalidated());
        assert!(rc.lines().count() >= 1);
    }
}
