//! The closed family of series kinds.
//!
//! Each kind owns its raw data plus any derived-geometry cache (smoothed
//! spline points, traced contour segments). Caches are stamped with the
//! series' data version and recomputed during the plot's update pass, never
//! during render. Shared behavior (axis lookup, point transformation) lives
//! in free functions here rather than in a base type.

use plotmath::{screen_point, PlotPoint, ScreenPoint, ValueRange};

use crate::axis::Axis;
use crate::error::PlotError;
use crate::render::{LineStyle, RenderContext, Stroke};
use crate::Color32;

mod bar;
mod contour;
mod heat_map;
mod line;
mod scatter;

pub use bar::BarSeries;
pub use contour::ContourSeries;
pub use heat_map::HeatMapSeries;
pub use line::LineSeries;
pub use scatter::ScatterSeries;

// ----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum MarkerShape {
    #[default]
    Circle,
    Square,
}

/// How a scatter point or line-series marker is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Marker {
    pub shape: MarkerShape,
    /// Radius (half extent) in screen units.
    pub size: f32,
    pub fill: Color32,
    pub stroke: Stroke,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            shape: MarkerShape::Circle,
            size: 3.0,
            fill: Color32::DARK_BLUE,
            stroke: Stroke::NONE,
        }
    }
}

/// What a legend shows next to a series label.
#[derive(Clone, Debug, PartialEq)]
pub enum LegendSwatch {
    Line { stroke: Stroke, style: LineStyle },
    Marker(Marker),
    FilledBox(Color32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub swatch: LegendSwatch,
}

// ----------------------------------------------------------------------------

/// One plottable data set. A closed set of kinds; hosts configure a variant
/// and the plot dispatches on it.
#[derive(Clone, Debug)]
pub enum Series {
    Line(LineSeries),
    Scatter(ScatterSeries),
    Bar(BarSeries),
    HeatMap(HeatMapSeries),
    Contour(ContourSeries),
}

impl Series {
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Line(s) => s.title.as_deref(),
            Self::Scatter(s) => s.title.as_deref(),
            Self::Bar(s) => s.title.as_deref(),
            Self::HeatMap(s) => s.title.as_deref(),
            Self::Contour(s) => s.title.as_deref(),
        }
    }

    /// Title for error messages; never empty.
    pub(crate) fn debug_title(&self) -> String {
        self.title().unwrap_or("untitled").to_owned()
    }

    pub fn x_axis_key(&self) -> &str {
        match self {
            Self::Line(s) => &s.x_axis_key,
            Self::Scatter(s) => &s.x_axis_key,
            Self::Bar(s) => &s.x_axis_key,
            Self::HeatMap(s) => &s.x_axis_key,
            Self::Contour(s) => &s.x_axis_key,
        }
    }

    pub fn y_axis_key(&self) -> &str {
        match self {
            Self::Line(s) => &s.y_axis_key,
            Self::Scatter(s) => &s.y_axis_key,
            Self::Bar(s) => &s.y_axis_key,
            Self::HeatMap(s) => &s.y_axis_key,
            Self::Contour(s) => &s.y_axis_key,
        }
    }

    /// `Some(key)` if this series maps values through a color axis.
    pub fn color_axis_key(&self) -> Option<&str> {
        match self {
            Self::Line(_) | Self::Bar(_) => None,
            Self::Scatter(s) => (!s.values.is_empty()).then_some(s.color_axis_key.as_str()),
            Self::HeatMap(s) => Some(&s.color_axis_key),
            Self::Contour(s) => s.use_color_axis.then_some(s.color_axis_key.as_str()),
        }
    }

    /// X and Y data extents, skipping NaN points. Invalid (`NOTHING`)
    /// extents mean "no data"; axes fall back on their own policy.
    pub fn data_extent(&self) -> (ValueRange, ValueRange) {
        match self {
            Self::Line(s) => point_extent(s.points()),
            Self::Scatter(s) => point_extent(s.points()),
            Self::Bar(s) => s.data_extent(),
            Self::HeatMap(s) => s.data_extent(),
            Self::Contour(s) => s.data_extent(),
        }
    }

    /// Extent of the values a color axis should cover, if any.
    pub fn color_extent(&self) -> Option<ValueRange> {
        match self {
            Self::Line(_) | Self::Bar(_) => None,
            Self::Scatter(s) => s.color_extent(),
            Self::HeatMap(s) => Some(s.value_extent()),
            Self::Contour(s) => s.color_extent(),
        }
    }

    /// Recompute derived geometry (spline, contour segments) if the data
    /// version moved since the cache was built. Grid dimension mismatches
    /// surface here.
    pub fn update_data(&mut self) -> Result<(), PlotError> {
        match self {
            Self::Line(s) => {
                s.update_data();
                Ok(())
            }
            Self::Scatter(s) => s.validate(),
            Self::Bar(_) => Ok(()),
            Self::HeatMap(s) => s.validate(),
            Self::Contour(s) => s.update_data(),
        }
    }

    /// Emit this series' primitives. Axes must have valid transforms.
    pub fn render(
        &self,
        rc: &mut dyn RenderContext,
        x_axis: &Axis,
        y_axis: &Axis,
        color_axis: Option<&Axis>,
    ) -> Result<(), PlotError> {
        match self {
            Self::Line(s) => s.render(rc, x_axis, y_axis),
            Self::Scatter(s) => s.render(rc, x_axis, y_axis, color_axis),
            Self::Bar(s) => s.render(rc, x_axis, y_axis),
            Self::HeatMap(s) => s.render(rc, x_axis, y_axis, color_axis),
            Self::Contour(s) => s.render(rc, x_axis, y_axis, color_axis),
        }
    }

    /// The legend entry for this series, if it has a title.
    pub fn legend_entry(&self) -> Option<LegendEntry> {
        let label = self.title()?.to_owned();
        let swatch = match self {
            Self::Line(s) => LegendSwatch::Line {
                stroke: s.stroke,
                style: s.style,
            },
            Self::Scatter(s) => LegendSwatch::Marker(s.marker),
            Self::Bar(s) => LegendSwatch::FilledBox(s.fill),
            Self::HeatMap(_) => LegendSwatch::FilledBox(Color32::GRAY),
            Self::Contour(s) => LegendSwatch::Line {
                stroke: s.stroke,
                style: LineStyle::Solid,
            },
        };
        Some(LegendEntry { label, swatch })
    }
}

impl From<LineSeries> for Series {
    fn from(s: LineSeries) -> Self {
        Self::Line(s)
    }
}
impl From<ScatterSeries> for Series {
    fn from(s: ScatterSeries) -> Self {
        Self::Scatter(s)
    }
}
impl From<BarSeries> for Series {
    fn from(s: BarSeries) -> Self {
        Self::Bar(s)
    }
}
impl From<HeatMapSeries> for Series {
    fn from(s: HeatMapSeries) -> Self {
        Self::HeatMap(s)
    }
}
impl From<ContourSeries> for Series {
    fn from(s: ContourSeries) -> Self {
        Self::Contour(s)
    }
}

// ----------------------------------------------------------------------------
// Shared helpers.

/// Find the X axis for a series: by key, or the first horizontal axis when
/// the key is empty. A dangling key is a configuration error.
pub(crate) fn find_x_axis(axes: &[Axis], key: &str, series: &Series) -> Result<usize, PlotError> {
    find_axis(axes, key, series, |axis| axis.position().is_horizontal())
}

/// Find the Y axis for a series: by key, or the first vertical axis.
pub(crate) fn find_y_axis(axes: &[Axis], key: &str, series: &Series) -> Result<usize, PlotError> {
    find_axis(axes, key, series, |axis| axis.position().is_vertical())
}

/// Find the color axis for a series: by key, or the first color axis.
/// Needing one and having none configured is its own error.
pub(crate) fn find_color_axis(
    axes: &[Axis],
    key: &str,
    series: &Series,
) -> Result<usize, PlotError> {
    if key.is_empty() {
        return axes
            .iter()
            .position(Axis::is_color_axis)
            .ok_or_else(|| PlotError::MissingColorAxis {
                series: series.debug_title(),
            });
    }
    find_axis(axes, key, series, Axis::is_color_axis)
}

fn find_axis(
    axes: &[Axis],
    key: &str,
    series: &Series,
    default_predicate: impl Fn(&Axis) -> bool,
) -> Result<usize, PlotError> {
    let found = if key.is_empty() {
        axes.iter().position(default_predicate)
    } else {
        axes.iter().position(|axis| axis.key() == key)
    };
    found.ok_or_else(|| PlotError::UnknownAxis {
        series: series.debug_title(),
        key: key.to_owned(),
    })
}

/// Data point to screen point through an axis pair.
#[inline]
pub(crate) fn transform_point(x_axis: &Axis, y_axis: &Axis, p: PlotPoint) -> ScreenPoint {
    screen_point(x_axis.transform(p.x) as f32, y_axis.transform(p.y) as f32)
}

/// X/Y extents over a point slice, skipping NaN coordinates.
fn point_extent(points: &[PlotPoint]) -> (ValueRange, ValueRange) {
    let mut x = ValueRange::NOTHING;
    let mut y = ValueRange::NOTHING;
    for p in points {
        x.extend_with(p.x);
        y.extend_with(p.y);
    }
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisPosition;
    use crate::palette::Palette;

    fn axes() -> Vec<Axis> {
        vec![
            Axis::new("x", AxisPosition::Bottom),
            Axis::new("y", AxisPosition::Left),
            Axis::color("c", Palette::default()),
        ]
    }

    #[test]
    fn empty_key_finds_first_matching_axis() {
        let axes = axes();
        let series = Series::from(LineSeries::new());
        assert_eq!(find_x_axis(&axes, "", &series), Ok(0));
        assert_eq!(find_y_axis(&axes, "", &series), Ok(1));
        assert_eq!(find_color_axis(&axes, "", &series), Ok(2));
    }

    #[test]
    fn dangling_key_fails_fast() {
        let axes = axes();
        let series = Series::from(LineSeries::new().with_title("velocity"));
        let err = find_x_axis(&axes, "nope", &series).unwrap_err();
        assert_eq!(
            err,
            PlotError::UnknownAxis {
                series: "velocity".to_owned(),
                key: "nope".to_owned(),
            }
        );
    }

    #[test]
    fn missing_color_axis_is_its_own_error() {
        let axes = vec![
            Axis::new("x", AxisPosition::Bottom),
            Axis::new("y", AxisPosition::Left),
        ];
        let series = Series::from(LineSeries::new());
        assert!(matches!(
            find_color_axis(&axes, "", &series),
            Err(PlotError::MissingColorAxis { .. })
        ));
    }

    #[test]
    fn extent_skips_nan_points() {
        let series = Series::from(LineSeries::new().with_points(vec![
            PlotPoint::new(0.0, 1.0),
            PlotPoint::new(f64::NAN, 99.0),
            PlotPoint::new(4.0, -1.0),
        ]));
        let (x, y) = series.data_extent();
        assert_eq!(x, ValueRange::new(0.0, 4.0));
        // Coordinates are skipped independently; the finite y still counts.
        assert_eq!(y, ValueRange::new(-1.0, 99.0));
    }
}
