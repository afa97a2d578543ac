//! Axes: the mapping between one data dimension and a screen-space interval,
//! plus tick layout and gridlines.

use std::fmt;
use std::sync::Arc;

use plotmath::{
    calculate_minor_interval, create_default_tick_values, nice_interval, round_to_decimals,
    screen_point, ScreenRect, ValueRange,
};

use crate::error::PlotError;
use crate::palette::{palette_index, Palette};
use crate::render::{FontId, HAlign, RenderContext, Stroke, VAlign};
use crate::Color32;

/// Where an axis lives, logically.
///
/// `None` axes (e.g. pure color axes) take part in range resolution but are
/// not drawn along a plot edge. `Angle` and `Magnitude` are the polar
/// positions; polar series are out of scope for the core, but the positions
/// are part of the data model so hosts can configure them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AxisPosition {
    Left,
    Right,
    Top,
    Bottom,
    None,
    Angle,
    Magnitude,
}

impl AxisPosition {
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Linear, or a monotonic pre-transform composed around the affine core.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AxisKind {
    Linear,
    Logarithmic { base: f64 },
}

impl AxisKind {
    /// The monotonic pre-transform applied before the affine scale/offset.
    #[inline]
    fn pre(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Logarithmic { base } => value.log(base),
        }
    }

    /// Inverse of [`Self::pre`].
    #[inline]
    fn post(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Logarithmic { base } => base.powf(value),
        }
    }
}

pub(crate) type TickFormatterFn = dyn Fn(f64, &ValueRange) -> String + Send + Sync;

/// Fallback range when there is neither explicit bounds nor data.
const FALLBACK_RANGE: ValueRange = ValueRange::new(0.0, 100.0);

/// Fallback range for logarithmic axes whose resolved range has no
/// positive part at all.
const LOG_FALLBACK_RANGE: ValueRange = ValueRange::new(1.0, 100.0);

/// When a log axis range straddles zero, the lower bound is pulled up to
/// this fraction of the upper bound.
const LOG_DOMAIN_FRACTION: f64 = 1e-3;

/// Rough screen distance between major ticks that auto stepping aims for.
const TARGET_TICK_SPACING: f32 = 60.0;

/// One coordinate dimension (X, Y or color) of a plot.
///
/// Owns the mapping `screen = (pre(value) - offset) * scale` plus its tick
/// configuration. `actual` bounds and `scale`/`offset` are resolved during
/// the plot's update/layout pass; pan and zoom mutate the view range
/// directly and bump [`Self::version`] so dependents can react.
#[derive(Clone)]
pub struct Axis {
    key: String,
    position: AxisPosition,
    kind: AxisKind,

    /// Explicit user bounds; NaN means "auto" (resolve from data).
    minimum: f64,
    maximum: f64,

    /// Hard pins the view can never leave.
    absolute_minimum: f64,
    absolute_maximum: f64,

    /// Pan/zoom override; NaN means "no override".
    view_minimum: f64,
    view_maximum: f64,

    /// Relative padding applied around an auto-resolved data extent.
    padding_fraction: f64,

    /// The currently resolved visible range. Valid after the update pass.
    actual: ValueRange,

    /// Data extent from the last update pass, kept for [`Self::reset`].
    data_extent: ValueRange,

    /// Screen segment as fractions of the plot area (for stacked axes).
    start_fraction: f32,
    end_fraction: f32,

    /// Screen endpoints for `actual.min` / `actual.max`, set during layout.
    screen_min: f32,
    screen_max: f32,

    scale: f64,
    offset: f64,

    /// Explicit tick steps; `None` means auto ("nice numbers").
    major_step: Option<f64>,
    minor_step: Option<f64>,

    pub title: Option<String>,
    formatter: Option<Arc<TickFormatterFn>>,

    /// Palette for color axes; an axis with a palette maps values to colors.
    palette: Option<Palette>,
    low_color: Option<Color32>,
    high_color: Option<Color32>,

    pub font: FontId,
    pub text_color: Color32,
    pub axisline_stroke: Stroke,
    pub major_gridline_stroke: Stroke,
    pub minor_gridline_stroke: Stroke,
    pub tick_size: f32,

    /// Bumped on every range mutation; replaces change-event callbacks.
    version: u64,
}

impl fmt::Debug for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Axis")
            .field("key", &self.key)
            .field("position", &self.position)
            .field("actual", &self.actual)
            .finish_non_exhaustive()
    }
}

impl Axis {
    pub fn new(key: impl Into<String>, position: AxisPosition) -> Self {
        Self {
            key: key.into(),
            position,
            kind: AxisKind::Linear,
            minimum: f64::NAN,
            maximum: f64::NAN,
            absolute_minimum: f64::NEG_INFINITY,
            absolute_maximum: f64::INFINITY,
            view_minimum: f64::NAN,
            view_maximum: f64::NAN,
            padding_fraction: 0.01,
            actual: FALLBACK_RANGE,
            data_extent: ValueRange::NOTHING,
            start_fraction: 0.0,
            end_fraction: 1.0,
            screen_min: 0.0,
            screen_max: 1.0,
            scale: 1.0,
            offset: 0.0,
            major_step: None,
            minor_step: None,
            title: None,
            formatter: None,
            palette: None,
            low_color: None,
            high_color: None,
            font: FontId::default(),
            text_color: Color32::BLACK,
            axisline_stroke: Stroke::new(1.0, Color32::BLACK),
            major_gridline_stroke: Stroke::new(1.0, Color32::from_rgb(0xE0, 0xE0, 0xE0)),
            minor_gridline_stroke: Stroke::NONE,
            tick_size: 5.0,
            version: 0,
        }
    }

    /// A color axis: not drawn along an edge, maps values into `palette`.
    /// No padding, so the palette spans exactly the value extent.
    pub fn color(key: impl Into<String>, palette: Palette) -> Self {
        let mut axis = Self::new(key, AxisPosition::None);
        axis.palette = Some(palette);
        axis.padding_fraction = 0.0;
        axis
    }

    // --- builders ---------------------------------------------------------

    /// Explicit bounds instead of auto-resolving from data.
    #[inline]
    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    /// Hard pins the view can never pan or zoom past.
    #[inline]
    pub fn with_absolute_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.absolute_minimum = minimum;
        self.absolute_maximum = maximum;
        self
    }

    #[inline]
    pub fn with_kind(mut self, kind: AxisKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub fn logarithmic(self, base: f64) -> Self {
        self.with_kind(AxisKind::Logarithmic { base })
    }

    #[inline]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Explicit major tick step. Validated during the update pass:
    /// zero or negative is a hard error, not a silent fallback.
    #[inline]
    pub fn with_major_step(mut self, step: f64) -> Self {
        self.major_step = Some(step);
        self
    }

    #[inline]
    pub fn with_minor_step(mut self, step: f64) -> Self {
        self.minor_step = Some(step);
        self
    }

    /// Relative padding around auto-resolved data extents.
    #[inline]
    pub fn with_padding_fraction(mut self, fraction: f64) -> Self {
        self.padding_fraction = fraction;
        self
    }

    /// The screen segment as fractions of the plot area, for stacking
    /// multiple parallel axes.
    #[inline]
    pub fn with_screen_segment(mut self, start_fraction: f32, end_fraction: f32) -> Self {
        self.start_fraction = start_fraction;
        self.end_fraction = end_fraction;
        self
    }

    /// Custom tick label formatter.
    pub fn with_formatter(
        mut self,
        formatter: impl Fn(f64, &ValueRange) -> String + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Sentinel colors for values outside a color axis range.
    /// Without them, out-of-range values clamp into the palette.
    #[inline]
    pub fn with_out_of_range_colors(mut self, low: Color32, high: Color32) -> Self {
        self.low_color = Some(low);
        self.high_color = Some(high);
        self
    }

    // --- accessors --------------------------------------------------------

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn position(&self) -> AxisPosition {
        self.position
    }

    #[inline]
    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    /// The currently resolved visible range,
    /// distinct from any user-configured bounds.
    #[inline]
    pub fn actual_range(&self) -> ValueRange {
        self.actual
    }

    #[inline]
    pub fn is_color_axis(&self) -> bool {
        self.palette.is_some()
    }

    #[inline]
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Change counter; bumped by every range mutation.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    fn mark_changed(&mut self) {
        self.version += 1;
    }

    // --- coordinate transform ---------------------------------------------

    /// Data value to screen coordinate.
    #[inline]
    pub fn transform(&self, value: f64) -> f64 {
        (self.kind.pre(value) - self.offset) * self.scale
    }

    /// Screen coordinate back to data value.
    #[inline]
    pub fn inverse_transform(&self, screen: f64) -> f64 {
        self.kind.post(screen / self.scale + self.offset)
    }

    /// Resolve `actual` from (in priority order) an active pan/zoom view,
    /// explicit user bounds, the given data extent with padding, or the
    /// fallback range. Never leaves `actual.max <= actual.min`.
    pub fn update_actual_range(&mut self, data_extent: ValueRange) {
        self.data_extent = data_extent;

        let mut min = if self.view_minimum.is_finite() {
            self.view_minimum
        } else if self.minimum.is_finite() {
            self.minimum
        } else if data_extent.is_valid() {
            data_extent.min - data_extent.span() * self.padding_fraction
        } else {
            f64::NAN
        };
        let mut max = if self.view_maximum.is_finite() {
            self.view_maximum
        } else if self.maximum.is_finite() {
            self.maximum
        } else if data_extent.is_valid() {
            data_extent.max + data_extent.span() * self.padding_fraction
        } else {
            f64::NAN
        };

        // One-sided resolution when only one bound is known:
        if min.is_nan() && max.is_finite() {
            min = max - FALLBACK_RANGE.span();
        }
        if max.is_nan() && min.is_finite() {
            max = min + FALLBACK_RANGE.span();
        }
        if min.is_nan() || max.is_nan() {
            (min, max) = (FALLBACK_RANGE.min, FALLBACK_RANGE.max);
        }
        if max < min {
            (min, max) = (max, min);
        }

        let resolved = self.clamp_to_domain(expand_degenerate(ValueRange::new(min, max)));
        if resolved != self.actual {
            self.actual = resolved;
            self.mark_changed();
        }
        debug_assert!(self.actual.max > self.actual.min);
    }

    /// Recompute `scale`/`offset` for the resolved range and the axis's
    /// segment of the plot area. Vertical axes are inverted: increasing
    /// data values move toward decreasing screen Y.
    pub fn update_transform(&mut self, area: ScreenRect) {
        let (s0, s1) = if self.position.is_vertical() {
            let top = area.min.y + (1.0 - self.end_fraction) * area.height();
            let bottom = area.max.y - self.start_fraction * area.height();
            (bottom, top)
        } else {
            let left = area.min.x + self.start_fraction * area.width();
            let right = area.min.x + self.end_fraction * area.width();
            (left, right)
        };
        self.screen_min = s0;
        self.screen_max = s1;

        let pre_min = self.kind.pre(self.actual.min);
        let pre_max = self.kind.pre(self.actual.max);
        let pre_span = pre_max - pre_min;
        debug_assert!(pre_span != 0.0);

        self.scale = f64::from(s1 - s0) / pre_span;
        self.offset = pre_min - f64::from(s0) / self.scale;
    }

    // --- view manipulation ------------------------------------------------

    /// Shift the visible range by the data-space equivalent of a screen
    /// delta. Positive delta moves the content in the positive screen
    /// direction. Unbounded unless absolute pins are configured.
    pub fn pan(&mut self, screen_delta: f32) {
        let data_delta = f64::from(screen_delta) / self.scale;
        let range = self
            .actual
            .translate(-data_delta)
            .clamped_to(self.absolute_minimum, self.absolute_maximum);
        self.set_view(range);
    }

    /// Explicitly set the visible range.
    pub fn zoom(&mut self, minimum: f64, maximum: f64) {
        let range = ValueRange::new(minimum.min(maximum), minimum.max(maximum))
            .clamped_to(self.absolute_minimum, self.absolute_maximum);
        self.set_view(expand_degenerate(range));
    }

    /// Scale the visible range around a pivot given in data coordinates.
    /// `factor > 1` zooms in.
    pub fn zoom_at(&mut self, factor: f64, center: f64) {
        debug_assert!(factor > 0.0);
        let range = self
            .actual
            .zoom_at(1.0 / factor, center)
            .clamped_to(self.absolute_minimum, self.absolute_maximum);
        self.set_view(expand_degenerate(range));
    }

    /// Discard pan/zoom state and restore the configured (or auto) bounds.
    pub fn reset(&mut self) {
        self.view_minimum = f64::NAN;
        self.view_maximum = f64::NAN;
        self.update_actual_range(self.data_extent);
        self.mark_changed();
    }

    /// Restrict a range to the domain of the axis kind. Logarithmic axes
    /// only cover strictly positive values: a range straddling zero keeps
    /// its upper bound and pulls the lower one just above zero, and a range
    /// with no positive part falls back to [`LOG_FALLBACK_RANGE`].
    fn clamp_to_domain(&self, range: ValueRange) -> ValueRange {
        match self.kind {
            AxisKind::Linear => range,
            AxisKind::Logarithmic { .. } => {
                if range.max <= 0.0 {
                    log::debug!(
                        "log axis {:?}: range {range:?} has no positive part, using {LOG_FALLBACK_RANGE:?}",
                        self.key
                    );
                    LOG_FALLBACK_RANGE
                } else if range.min <= 0.0 {
                    log::debug!("log axis {:?}: clamping range {range:?} to positive", self.key);
                    ValueRange::new(range.max * LOG_DOMAIN_FRACTION, range.max)
                } else {
                    range
                }
            }
        }
    }

    fn set_view(&mut self, range: ValueRange) {
        let range = self.clamp_to_domain(range);
        self.view_minimum = range.min;
        self.view_maximum = range.max;
        if range != self.actual {
            self.actual = range;
            self.mark_changed();
        }
    }

    // --- ticks ------------------------------------------------------------

    /// The effective major tick step: explicit if configured (validated),
    /// otherwise a "nice" 1-2-5 step aimed at [`TARGET_TICK_SPACING`].
    pub fn actual_major_step(&self, screen_length: f32) -> Result<f64, PlotError> {
        if let Some(step) = self.major_step {
            if !(step.is_finite() && step > 0.0) {
                return Err(plotmath::InvalidTickStep { step }.into());
            }
            return Ok(step);
        }
        let target_count = (screen_length / TARGET_TICK_SPACING).round().max(2.0) as usize;
        Ok(nice_interval(self.tick_range().span(), target_count))
    }

    /// The effective minor tick step, inferred from the major step
    /// unless explicitly configured.
    pub fn actual_minor_step(&self, major_step: f64) -> Result<f64, PlotError> {
        if let Some(step) = self.minor_step {
            if !(step.is_finite() && step > 0.0) {
                return Err(plotmath::InvalidTickStep { step }.into());
            }
            return Ok(step);
        }
        Ok(calculate_minor_interval(major_step))
    }

    /// Major tick values over the visible range.
    pub fn tick_values(&self, step: f64) -> Result<Vec<f64>, PlotError> {
        let range = self.tick_range();
        Ok(create_default_tick_values(range.min, range.max, step)?)
    }

    /// The range ticks are generated over: pre-transformed for log axes
    /// (so ticks land on powers of the base), plain otherwise.
    fn tick_range(&self) -> ValueRange {
        match self.kind {
            AxisKind::Linear => self.actual,
            AxisKind::Logarithmic { .. } => ValueRange::new(
                self.kind.pre(self.actual.min),
                self.kind.pre(self.actual.max),
            ),
        }
    }

    /// A tick value (in [`Self::tick_range`] space) back in data space.
    fn tick_to_value(&self, tick: f64) -> f64 {
        match self.kind {
            AxisKind::Linear => tick,
            AxisKind::Logarithmic { .. } => self.kind.post(tick),
        }
    }

    /// Format a tick label.
    pub fn format_value(&self, value: f64) -> String {
        match &self.formatter {
            Some(formatter) => formatter(value, &self.actual),
            None => default_format(value),
        }
    }

    // --- color mapping ----------------------------------------------------

    /// Map a value through this color axis.
    ///
    /// Out-of-range values use the configured sentinel colors if present,
    /// otherwise they clamp to the palette ends. Returns the first palette
    /// color when the axis has a degenerate range.
    pub fn color_for_value(&self, value: f64) -> Option<Color32> {
        let palette = self.palette.as_ref()?;
        if value < self.actual.min {
            if let Some(low) = self.low_color {
                return Some(low);
            }
        }
        if value > self.actual.max {
            if let Some(high) = self.high_color {
                return Some(high);
            }
        }
        let index = palette_index(value, self.actual, palette.len());
        Some(palette.color(index))
    }

    // --- layout & rendering -----------------------------------------------

    /// The edge-band thickness this axis needs, using text measurement.
    /// Called before any drawing.
    pub fn measure(&self, rc: &dyn RenderContext, approx_length: f32) -> Result<f32, PlotError> {
        if !(self.position.is_horizontal() || self.position.is_vertical()) {
            return Ok(0.0);
        }

        let step = self.actual_major_step(approx_length)?;
        let mut label_extent = 0.0_f32;
        for tick in self.tick_values(step)? {
            let label = self.format_value(self.tick_to_value(tick));
            let metrics = rc.measure_text(&label, &self.font);
            let extent = if self.position.is_horizontal() {
                metrics.height
            } else {
                metrics.width
            };
            label_extent = label_extent.max(extent);
        }

        let title_extent = match &self.title {
            Some(title) => rc.measure_text(title, &self.font).height + TICK_LABEL_GAP,
            None => 0.0,
        };

        Ok(self.tick_size + TICK_LABEL_GAP + label_extent + title_extent)
    }

    /// Emit gridlines for this axis across the plot area.
    /// Minor lines first so major lines draw over them.
    pub fn render_gridlines(
        &self,
        rc: &mut dyn RenderContext,
        area: ScreenRect,
    ) -> Result<(), PlotError> {
        if !(self.position.is_horizontal() || self.position.is_vertical()) {
            return Ok(());
        }

        let major_step = self.actual_major_step(self.screen_length())?;

        if !self.minor_gridline_stroke.is_empty() {
            let minor_step = self.actual_minor_step(major_step)?;
            let segments = self.gridline_segments(&self.tick_values(minor_step)?, area);
            rc.draw_line_segments(&segments, self.minor_gridline_stroke);
        }
        if !self.major_gridline_stroke.is_empty() {
            let segments = self.gridline_segments(&self.tick_values(major_step)?, area);
            rc.draw_line_segments(&segments, self.major_gridline_stroke);
        }
        Ok(())
    }

    /// Emit the axis line, tick marks, tick labels and title.
    pub fn render(&self, rc: &mut dyn RenderContext, area: ScreenRect) -> Result<(), PlotError> {
        if !(self.position.is_horizontal() || self.position.is_vertical()) {
            return Ok(());
        }

        let edge = self.edge_coordinate(area);
        let out = self.outward_sign();

        // Axis line:
        if !self.axisline_stroke.is_empty() {
            let segment = if self.position.is_horizontal() {
                [
                    screen_point(self.screen_min.min(self.screen_max), edge),
                    screen_point(self.screen_min.max(self.screen_max), edge),
                ]
            } else {
                [
                    screen_point(edge, self.screen_min.min(self.screen_max)),
                    screen_point(edge, self.screen_min.max(self.screen_max)),
                ]
            };
            rc.draw_line_segments(&[segment], self.axisline_stroke);
        }

        // Tick marks and labels:
        let major_step = self.actual_major_step(self.screen_length())?;
        let ticks = self.tick_values(major_step)?;
        let mut marks = Vec::with_capacity(ticks.len());
        for &tick in &ticks {
            let value = self.tick_to_value(tick);
            let along = self.transform(value) as f32;
            let (mark, label_pos) = if self.position.is_horizontal() {
                (
                    [
                        screen_point(along, edge),
                        screen_point(along, edge + out * self.tick_size),
                    ],
                    screen_point(along, edge + out * (self.tick_size + TICK_LABEL_GAP)),
                )
            } else {
                (
                    [
                        screen_point(edge, along),
                        screen_point(edge + out * self.tick_size, along),
                    ],
                    screen_point(edge + out * (self.tick_size + TICK_LABEL_GAP), along),
                )
            };
            marks.push(mark);

            let (halign, valign) = self.label_alignment();
            rc.draw_text(
                label_pos,
                &self.format_value(value),
                self.text_color,
                &self.font,
                0.0,
                halign,
                valign,
                None,
            );
        }
        if !marks.is_empty() && !self.axisline_stroke.is_empty() {
            rc.draw_line_segments(&marks, self.axisline_stroke);
        }

        if let Some(title) = &self.title {
            self.render_title(rc, title, area);
        }
        Ok(())
    }

    fn render_title(&self, rc: &mut dyn RenderContext, title: &str, area: ScreenRect) {
        let edge = self.edge_coordinate(area);
        let out = self.outward_sign();
        let offset = out * (self.tick_size + TICK_LABEL_GAP * 2.0 + self.font.size * 1.5);
        let mid = 0.5 * (self.screen_min + self.screen_max);
        let (pos, angle) = if self.position.is_horizontal() {
            (screen_point(mid, edge + offset), 0.0)
        } else {
            (
                screen_point(edge + offset, mid),
                -std::f32::consts::FRAC_PI_2,
            )
        };
        rc.draw_text(
            pos,
            title,
            self.text_color,
            &self.font,
            angle,
            HAlign::Center,
            VAlign::Center,
            None,
        );
    }

    fn gridline_segments(&self, ticks: &[f64], area: ScreenRect) -> Vec<[plotmath::ScreenPoint; 2]> {
        ticks
            .iter()
            .map(|&tick| {
                let along = self.transform(self.tick_to_value(tick)) as f32;
                if self.position.is_horizontal() {
                    [
                        screen_point(along, area.min.y),
                        screen_point(along, area.max.y),
                    ]
                } else {
                    [
                        screen_point(area.min.x, along),
                        screen_point(area.max.x, along),
                    ]
                }
            })
            .collect()
    }

    #[inline]
    fn screen_length(&self) -> f32 {
        (self.screen_max - self.screen_min).abs()
    }

    /// The plot-area edge coordinate this axis is drawn against.
    fn edge_coordinate(&self, area: ScreenRect) -> f32 {
        match self.position {
            AxisPosition::Left => area.min.x,
            AxisPosition::Right => area.max.x,
            AxisPosition::Top => area.min.y,
            AxisPosition::Bottom => area.max.y,
            AxisPosition::None | AxisPosition::Angle | AxisPosition::Magnitude => 0.0,
        }
    }

    /// +1 when ticks/labels extend toward greater screen coordinates.
    fn outward_sign(&self) -> f32 {
        match self.position {
            AxisPosition::Left | AxisPosition::Top => -1.0,
            _ => 1.0,
        }
    }

    fn label_alignment(&self) -> (HAlign, VAlign) {
        match self.position {
            AxisPosition::Left => (HAlign::Right, VAlign::Center),
            AxisPosition::Right => (HAlign::Left, VAlign::Center),
            AxisPosition::Top => (HAlign::Center, VAlign::Bottom),
            _ => (HAlign::Center, VAlign::Top),
        }
    }
}

/// Space between a tick mark and its label, and between labels and title.
const TICK_LABEL_GAP: f32 = 4.0;

/// Expand a zero-width (or inverted) range about its center so the
/// transform never divides by zero.
fn expand_degenerate(range: ValueRange) -> ValueRange {
    if range.span() > 0.0 {
        return range;
    }
    let center = range.center();
    let epsilon = (center.abs() * 1e-3).max(0.5);
    log::debug!("expanding degenerate axis range {range:?} by {epsilon}");
    ValueRange::new(center - epsilon, center + epsilon)
}

/// Default tick label formatting: integers without decimals, everything
/// else with a few.
fn default_format(value: f64) -> String {
    let rounded = round_to_decimals(value, 6);
    if rounded == rounded.trunc() && rounded.abs() < 1e12 {
        format!("{rounded:.0}")
    } else {
        rounded.to_string()
    }
}

trait RangeClamp {
    fn clamped_to(self, min: f64, max: f64) -> Self;
}

impl RangeClamp for ValueRange {
    /// Slide (not shrink) the range back inside `min..=max` where possible.
    fn clamped_to(mut self, min: f64, max: f64) -> Self {
        if self.min < min {
            let shift = min - self.min;
            self.min += shift;
            self.max = (self.max + shift).min(max);
        }
        if self.max > max {
            let shift = self.max - max;
            self.max -= shift;
            self.min = (self.min - shift).max(min);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotmath::almost_equal;

    fn laid_out_axis(position: AxisPosition, min: f64, max: f64) -> Axis {
        let mut axis = Axis::new("test", position).with_range(min, max);
        axis.update_actual_range(ValueRange::NOTHING);
        axis.update_transform(ScreenRect::from_min_size(
            screen_point(0.0, 0.0),
            600.0,
            400.0,
        ));
        axis
    }

    #[test]
    fn transform_round_trip() {
        let axis = laid_out_axis(AxisPosition::Bottom, 0.0, 40.0);
        for value in [0.0, 1.0, 13.37, 40.0] {
            let round_tripped = axis.inverse_transform(axis.transform(value));
            assert!(almost_equal(value, round_tripped, 1e-12));
        }
        assert_eq!(axis.transform(0.0), 0.0);
        assert_eq!(axis.transform(40.0), 600.0);
    }

    #[test]
    fn vertical_axes_are_inverted() {
        let axis = laid_out_axis(AxisPosition::Left, 0.0, 10.0);
        // Increasing data value moves toward decreasing screen Y:
        assert_eq!(axis.transform(0.0), 400.0);
        assert_eq!(axis.transform(10.0), 0.0);
        assert!(almost_equal(
            axis.inverse_transform(200.0),
            5.0,
            1e-12
        ));
    }

    #[test]
    fn log_axis_round_trip() {
        let mut axis = Axis::new("log", AxisPosition::Left)
            .logarithmic(10.0)
            .with_range(1.0, 1000.0);
        axis.update_actual_range(ValueRange::NOTHING);
        axis.update_transform(ScreenRect::from_min_size(
            screen_point(0.0, 0.0),
            100.0,
            300.0,
        ));
        for value in [1.0, 10.0, 100.0, 1000.0] {
            assert!(almost_equal(
                axis.inverse_transform(axis.transform(value)),
                value,
                1e-9
            ));
        }
        // Log decades are equidistant on screen:
        let d1 = axis.transform(10.0) - axis.transform(1.0);
        let d2 = axis.transform(100.0) - axis.transform(10.0);
        assert!(almost_equal(d1, d2, 1e-9));
    }

    #[test]
    fn log_axis_never_resolves_a_nonpositive_range() {
        // Data touching zero keeps its upper bound but loses the
        // nonpositive part, so tick generation stays finite.
        let mut axis = Axis::new("x", AxisPosition::Bottom).logarithmic(10.0);
        axis.update_actual_range(ValueRange::new(0.0, 100.0));
        let actual = axis.actual_range();
        assert!(actual.min > 0.0);
        assert_eq!(actual.max, 101.0); // data padding still applies
        let step = axis.actual_major_step(600.0).unwrap();
        assert!(step.is_finite() && step > 0.0);

        // All-negative data has no positive part to keep:
        let mut axis = Axis::new("x", AxisPosition::Bottom).logarithmic(10.0);
        axis.update_actual_range(ValueRange::new(-50.0, -1.0));
        assert_eq!(axis.actual_range(), LOG_FALLBACK_RANGE);

        // Pan/zoom cannot push the view out of the domain either:
        let mut axis = Axis::new("x", AxisPosition::Bottom)
            .logarithmic(10.0)
            .with_range(1.0, 1000.0);
        axis.update_actual_range(ValueRange::NOTHING);
        axis.zoom(-10.0, 1000.0);
        assert!(axis.actual_range().min > 0.0);
    }

    #[test]
    fn actual_range_priorities() {
        let mut axis = Axis::new("x", AxisPosition::Bottom);

        // No data, no bounds: fallback.
        axis.update_actual_range(ValueRange::NOTHING);
        assert_eq!(axis.actual_range(), FALLBACK_RANGE);

        // Data extent with padding:
        axis.update_actual_range(ValueRange::new(0.0, 100.0));
        assert_eq!(axis.actual_range(), ValueRange::new(-1.0, 101.0));

        // Explicit bounds win over data:
        let mut axis = Axis::new("x", AxisPosition::Bottom).with_range(5.0, 6.0);
        axis.update_actual_range(ValueRange::new(0.0, 100.0));
        assert_eq!(axis.actual_range(), ValueRange::new(5.0, 6.0));
    }

    #[test]
    fn degenerate_range_is_expanded() {
        let mut axis = Axis::new("x", AxisPosition::Bottom);
        axis.update_actual_range(ValueRange::new(3.0, 3.0));
        let actual = axis.actual_range();
        assert!(actual.max > actual.min);
        assert!(almost_equal(actual.center(), 3.0, 1e-12));
    }

    #[test]
    fn pan_zoom_reset() {
        let mut axis = laid_out_axis(AxisPosition::Bottom, 0.0, 40.0);
        let before = axis.actual_range();
        let version_before = axis.version();

        // 600 px over a span of 40 data units: 150 px = 10 units.
        axis.pan(150.0);
        assert_eq!(axis.actual_range(), ValueRange::new(-10.0, 30.0));
        assert!(axis.version() > version_before);

        axis.zoom_at(2.0, 10.0);
        assert_eq!(axis.actual_range(), ValueRange::new(0.0, 20.0));

        axis.zoom(2.0, 4.0);
        assert_eq!(axis.actual_range(), ValueRange::new(2.0, 4.0));

        axis.reset();
        assert_eq!(axis.actual_range(), before);
    }

    #[test]
    fn zoom_respects_absolute_pins() {
        let mut axis = Axis::new("x", AxisPosition::Bottom)
            .with_range(0.0, 40.0)
            .with_absolute_range(0.0, 50.0);
        axis.update_actual_range(ValueRange::NOTHING);
        axis.update_transform(ScreenRect::from_min_size(
            screen_point(0.0, 0.0),
            600.0,
            400.0,
        ));

        axis.pan(-600.0); // tries to move 40 units past the pin
        let actual = axis.actual_range();
        assert!(actual.max <= 50.0);
        assert!(actual.min >= 0.0);
    }

    #[test]
    fn explicit_bad_step_fails_fast() {
        let axis = Axis::new("x", AxisPosition::Bottom).with_major_step(0.0);
        assert!(matches!(
            axis.actual_major_step(600.0),
            Err(PlotError::InvalidTickStep(_))
        ));
    }

    #[test]
    fn color_axis_mapping() {
        let mut axis = Axis::color("c", Palette::gray(5)).with_range(0.0, 10.0);
        axis.update_actual_range(ValueRange::NOTHING);

        assert_eq!(axis.color_for_value(-5.0), axis.color_for_value(0.0));
        assert_eq!(axis.color_for_value(15.0), axis.color_for_value(10.0));

        let mut axis = axis.with_out_of_range_colors(Color32::MAGENTA, Color32::CYAN);
        axis.update_actual_range(ValueRange::NOTHING);
        assert_eq!(axis.color_for_value(-5.0), Some(Color32::MAGENTA));
        assert_eq!(axis.color_for_value(15.0), Some(Color32::CYAN));
        // In-range values still go through the palette:
        assert_eq!(axis.color_for_value(0.0), Some(Color32::BLACK));
    }
}
