use ahash::HashMap;
use plotmath::{PlotPoint, ScreenPoint, ValueRange};

use crate::axis::Axis;
use crate::error::PlotError;
use crate::render::RenderContext;
use crate::Color32;

use super::line::draw_markers;
use super::{transform_point, Marker};

/// Markers at data points, optionally colored per point through a color axis.
#[derive(Clone, Debug, Default)]
pub struct ScatterSeries {
    pub title: Option<String>,
    pub marker: Marker,

    pub(crate) x_axis_key: String,
    pub(crate) y_axis_key: String,
    pub(crate) color_axis_key: String,

    points: Vec<PlotPoint>,
    /// Optional per-point values, parallel to `points`. Non-empty means
    /// the markers are colored through the plot's color axis.
    pub(crate) values: Vec<f64>,
}

impl ScatterSeries {
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
        self.points = points;
        self
    }

    /// Per-point values for color-axis mapping; must be parallel to the
    /// points.
    #[inline]
    pub fn with_values(mut self, values: Vec<f64>) -> Self {
        self.values = values;
        self
    }

    #[inline]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    #[inline]
    pub fn with_axis_keys(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_axis_key = x.into();
        self.y_axis_key = y.into();
        self
    }

    #[inline]
    pub fn with_color_axis_key(mut self, key: impl Into<String>) -> Self {
        self.color_axis_key = key.into();
        self
    }

    #[inline]
    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    pub fn set_points(&mut self, points: Vec<PlotPoint>) {
        self.points = points;
    }

    /// Check that values (when present) pair one-to-one with points.
    /// Called by the plot's update pass.
    pub(crate) fn validate(&self) -> Result<(), PlotError> {
        if self.values.is_empty() || self.values.len() == self.points.len() {
            Ok(())
        } else {
            Err(PlotError::MismatchedValues {
                series: self.title.clone().unwrap_or_else(|| "untitled".to_owned()),
                points: self.points.len(),
                values: self.values.len(),
            })
        }
    }

    /// Extent of the per-point values, if any.
    pub fn color_extent(&self) -> Option<ValueRange> {
        if self.values.is_empty() {
            return None;
        }
        let mut extent = ValueRange::NOTHING;
        for &v in &self.values {
            extent.extend_with(v);
        }
        Some(extent)
    }

    pub fn render(
        &self,
        rc: &mut dyn RenderContext,
        x_axis: &Axis,
        y_axis: &Axis,
        color_axis: Option<&Axis>,
    ) -> Result<(), PlotError> {
        if self.values.is_empty() {
            let centers: Vec<ScreenPoint> = self
                .points
                .iter()
                .filter(|p| p.is_finite())
                .map(|&p| transform_point(x_axis, y_axis, p))
                .collect();
            draw_markers(rc, &centers, self.marker);
            return Ok(());
        }

        // Per-point colors: group by resolved color so each distinct color
        // still goes through the batched draw entry points.
        let color_axis = color_axis.ok_or_else(|| PlotError::MissingColorAxis {
            series: self.title.clone().unwrap_or_else(|| "untitled".to_owned()),
        })?;
        let mut groups: HashMap<Color32, Vec<ScreenPoint>> = HashMap::default();
        for (p, &value) in self.points.iter().zip(&self.values) {
            if !p.is_finite() {
                continue;
            }
            let color = color_axis
                .color_for_value(value)
                .unwrap_or(self.marker.fill);
            groups
                .entry(color)
                .or_default()
                .push(transform_point(x_axis, y_axis, *p));
        }
        for (color, centers) in groups {
            let marker = Marker {
                fill: color,
                ..self.marker
            };
            draw_markers(rc, &centers, marker);
        }
        Ok(())
    }
}
