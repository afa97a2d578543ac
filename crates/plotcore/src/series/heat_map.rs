use ahash::HashMap;
use plotmath::{screen_point, ScreenRect, ValueRange};

use crate::axis::Axis;
use crate::error::PlotError;
use crate::render::{RenderContext, Stroke};
use crate::Color32;

/// A row-major value matrix over an axis-aligned extent, with each cell
/// filled through the plot's color axis.
#[derive(Clone, Debug, Default)]
pub struct HeatMapSeries {
    pub title: Option<String>,

    /// Data-space extent of the matrix: `x0` is the center of the first
    /// column, `x1` the center of the last (and likewise `y0`/`y1`).
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,

    columns: usize,
    rows: usize,
    /// Row-major, `rows` rows of `columns` values.
    data: Vec<f64>,

    pub(crate) x_axis_key: String,
    pub(crate) y_axis_key: String,
    pub(crate) color_axis_key: String,
}

impl HeatMapSeries {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[inline]
    pub fn with_extent(mut self, x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        self.x0 = x0;
        self.x1 = x1;
        self.y0 = y0;
        self.y1 = y1;
        self
    }

    #[inline]
    pub fn with_data(mut self, columns: usize, rows: usize, data: Vec<f64>) -> Self {
        self.set_data(columns, rows, data);
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

    pub fn set_data(&mut self, columns: usize, rows: usize, data: Vec<f64>) {
        self.columns = columns;
        self.rows = rows;
        self.data = data;
    }

    /// Dimension mismatch is a configuration error, caught at update time.
    pub fn validate(&self) -> Result<(), PlotError> {
        if self.data.len() != self.columns * self.rows {
            return Err(PlotError::InvalidGrid {
                columns: self.columns,
                rows: self.rows,
                values: self.data.len(),
            });
        }
        Ok(())
    }

    /// The matrix extent, padded by half a cell so edge cells draw whole.
    pub fn data_extent(&self) -> (ValueRange, ValueRange) {
        if self.data.is_empty() {
            return (ValueRange::NOTHING, ValueRange::NOTHING);
        }
        let (cw, ch) = self.cell_size();
        let x = ValueRange::new(self.x0.min(self.x1), self.x0.max(self.x1)).expand(cw * 0.5);
        let y = ValueRange::new(self.y0.min(self.y1), self.y0.max(self.y1)).expand(ch * 0.5);
        (x, y)
    }

    /// Min/max of the matrix values, skipping NaN.
    pub fn value_extent(&self) -> ValueRange {
        let mut extent = ValueRange::NOTHING;
        for &v in &self.data {
            extent.extend_with(v);
        }
        extent
    }

    fn cell_size(&self) -> (f64, f64) {
        let cw = if self.columns > 1 {
            (self.x1 - self.x0) / (self.columns - 1) as f64
        } else {
            1.0
        };
        let ch = if self.rows > 1 {
            (self.y1 - self.y0) / (self.rows - 1) as f64
        } else {
            1.0
        };
        (cw, ch)
    }

    pub fn render(
        &self,
        rc: &mut dyn RenderContext,
        x_axis: &Axis,
        y_axis: &Axis,
        color_axis: Option<&Axis>,
    ) -> Result<(), PlotError> {
        self.validate()?;
        let color_axis = color_axis.ok_or_else(|| PlotError::MissingColorAxis {
            series: self.title.clone().unwrap_or_else(|| "untitled".to_owned()),
        })?;

        let (cw, ch) = self.cell_size();
        // One batched rect draw per distinct palette color.
        let mut groups: HashMap<Color32, Vec<ScreenRect>> = HashMap::default();
        for j in 0..self.rows {
            for i in 0..self.columns {
                let value = self.data[j * self.columns + i];
                if value.is_nan() {
                    continue;
                }
                let Some(color) = color_axis.color_for_value(value) else {
                    continue;
                };
                let cx = self.x0 + i as f64 * cw;
                let cy = self.y0 + j as f64 * ch;
                let left = x_axis.transform(cx - cw * 0.5) as f32;
                let right = x_axis.transform(cx + cw * 0.5) as f32;
                let top = y_axis.transform(cy + ch * 0.5) as f32;
                let bottom = y_axis.transform(cy - ch * 0.5) as f32;
                groups.entry(color).or_default().push(ScreenRect::new(
                    screen_point(left.min(right), top.min(bottom)),
                    screen_point(left.max(right), top.max(bottom)),
                ));
            }
        }
        for (color, rects) in groups {
            rc.draw_rects(&rects, Some(color), Stroke::NONE);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisPosition;
    use crate::palette::Palette;
    use crate::recorder::{Primitive, RecordingContext};

    #[test]
    fn dimension_mismatch_is_an_error() {
        let series = HeatMapSeries::new().with_data(2, 3, vec![0.0; 5]);
        assert_eq!(
            series.validate(),
            Err(PlotError::InvalidGrid {
                columns: 2,
                rows: 3,
                values: 5,
            })
        );
        assert!(HeatMapSeries::new()
            .with_data(2, 3, vec![0.0; 6])
            .validate()
            .is_ok());
    }

    #[test]
    fn nan_cells_are_skipped() {
        let mut x = Axis::new("x", AxisPosition::Bottom).with_range(-1.0, 2.0);
        let mut y = Axis::new("y", AxisPosition::Left).with_range(-1.0, 2.0);
        let mut c = Axis::color("c", Palette::gray(4)).with_range(0.0, 1.0);
        let area = ScreenRect::from_min_size(screen_point(0.0, 0.0), 100.0, 100.0);
        for axis in [&mut x, &mut y, &mut c] {
            axis.update_actual_range(ValueRange::NOTHING);
        }
        x.update_transform(area);
        y.update_transform(area);

        let series = HeatMapSeries::new()
            .with_extent(0.0, 1.0, 0.0, 1.0)
            .with_data(2, 2, vec![0.0, 0.5, f64::NAN, 1.0]);

        let mut rc = RecordingContext::new();
        series.render(&mut rc, &x, &y, Some(&c)).unwrap();
        let rects = rc
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Rect { .. }))
            .count();
        assert_eq!(rects, 3);
    }
}
