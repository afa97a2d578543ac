use plotmath::{contour, ContourRun, ValueRange};

use crate::axis::Axis;
use crate::error::PlotError;
use crate::render::{RenderContext, Stroke};

use super::transform_point;

/// Iso-lines of a scalar grid at a set of levels.
///
/// Segments are traced during the update pass and cached per data version;
/// render only transforms and emits them. Levels are independent of each
/// other, so hosts are free to parallelize the tracing if they take it over.
#[derive(Clone, Debug)]
pub struct ContourSeries {
    pub title: Option<String>,
    pub stroke: Stroke,
    /// Color each level's stroke through the plot's color axis instead of
    /// using the uniform stroke color.
    pub use_color_axis: bool,

    pub(crate) x_axis_key: String,
    pub(crate) y_axis_key: String,
    pub(crate) color_axis_key: String,

    x: Vec<f64>,
    y: Vec<f64>,
    /// Row-major, `y.len()` rows of `x.len()` values.
    values: Vec<f64>,
    levels: Vec<f64>,

    data_version: u64,
    /// Traced segments, stamped with the data version they were built from.
    traced: Option<(u64, Vec<ContourRun>)>,
}

impl Default for ContourSeries {
    fn default() -> Self {
        Self {
            title: None,
            stroke: Stroke::new(1.0, crate::Color32::BLACK),
            use_color_axis: false,
            x_axis_key: String::new(),
            y_axis_key: String::new(),
            color_axis_key: String::new(),
            x: Vec::new(),
            y: Vec::new(),
            values: Vec::new(),
            levels: Vec::new(),
            data_version: 0,
            traced: None,
        }
    }
}

impl ContourSeries {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[inline]
    pub fn with_grid(mut self, x: Vec<f64>, y: Vec<f64>, values: Vec<f64>) -> Self {
        self.set_grid(x, y, values);
        self
    }

    #[inline]
    pub fn with_levels(mut self, levels: Vec<f64>) -> Self {
        self.levels = levels;
        self.data_version += 1;
        self
    }

    #[inline]
    pub fn with_stroke(mut self, stroke: impl Into<Stroke>) -> Self {
        self.stroke = stroke.into();
        self
    }

    #[inline]
    pub fn colored_by_axis(mut self, use_color_axis: bool) -> Self {
        self.use_color_axis = use_color_axis;
        self
    }

    #[inline]
    pub fn with_axis_keys(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_axis_key = x.into();
        self.y_axis_key = y.into();
        self
    }

    pub fn set_grid(&mut self, x: Vec<f64>, y: Vec<f64>, values: Vec<f64>) {
        self.x = x;
        self.y = y;
        self.values = values;
        self.data_version += 1;
    }

    #[inline]
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// The traced runs from the last update pass, if fresh.
    pub fn runs(&self) -> Option<&[ContourRun]> {
        match &self.traced {
            Some((version, runs)) if *version == self.data_version => Some(runs),
            _ => None,
        }
    }

    /// Extent of the grid coordinate arrays.
    pub fn data_extent(&self) -> (ValueRange, ValueRange) {
        let mut x = ValueRange::NOTHING;
        let mut y = ValueRange::NOTHING;
        for &v in &self.x {
            x.extend_with(v);
        }
        for &v in &self.y {
            y.extend_with(v);
        }
        (x, y)
    }

    /// Extent of the levels, for color-axis auto-ranging.
    pub fn color_extent(&self) -> Option<ValueRange> {
        if !self.use_color_axis || self.levels.is_empty() {
            return None;
        }
        let mut extent = ValueRange::NOTHING;
        for &level in &self.levels {
            extent.extend_with(level);
        }
        Some(extent)
    }

    /// Re-trace the contour segments if the grid or levels changed.
    pub fn update_data(&mut self) -> Result<(), PlotError> {
        if self.values.len() != self.x.len() * self.y.len() {
            return Err(PlotError::InvalidGrid {
                columns: self.x.len(),
                rows: self.y.len(),
                values: self.values.len(),
            });
        }
        let stale = !matches!(&self.traced, Some((version, _)) if *version == self.data_version);
        if stale {
            let runs = contour::trace_contours(&self.x, &self.y, &self.values, &self.levels);
            self.traced = Some((self.data_version, runs));
        }
        Ok(())
    }

    pub fn render(
        &self,
        rc: &mut dyn RenderContext,
        x_axis: &Axis,
        y_axis: &Axis,
        color_axis: Option<&Axis>,
    ) -> Result<(), PlotError> {
        let Some(runs) = self.runs() else {
            log::warn!("contour series rendered without a fresh trace; skipping");
            return Ok(());
        };
        if self.use_color_axis && color_axis.is_none() {
            return Err(PlotError::MissingColorAxis {
                series: self.title.clone().unwrap_or_else(|| "untitled".to_owned()),
            });
        }

        for run in runs {
            let stroke = match color_axis.filter(|_| self.use_color_axis) {
                Some(axis) => Stroke::new(
                    self.stroke.width,
                    axis.color_for_value(run.level).unwrap_or(self.stroke.color),
                ),
                None => self.stroke,
            };
            let segments: Vec<_> = run
                .segments
                .iter()
                .map(|[a, b]| {
                    [
                        transform_point(x_axis, y_axis, *a),
                        transform_point(x_axis, y_axis, *b),
                    ]
                })
                .collect();
            if !segments.is_empty() {
                rc.draw_line_segments(&segments, stroke);
            }
        }
        Ok(())
    }
}
