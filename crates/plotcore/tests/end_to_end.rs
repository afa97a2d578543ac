//! Whole-cycle tests: model -> update -> render against the recorder.

use plotcore::plotmath::plot_point;
use plotcore::{
    Axis, AxisPosition, Color32, ContourSeries, HeatMapSeries, LineSeries, Palette, PlotModel,
    Primitive, RecordingContext,
};

fn xy_model() -> PlotModel {
    let mut model = PlotModel::new();
    model.add_axis(Axis::new("x", AxisPosition::Bottom).with_range(0.0, 40.0));
    model.add_axis(Axis::new("y", AxisPosition::Left).with_range(0.0, 10.0));
    model
}

#[test]
fn line_plot_produces_one_monotonic_polyline() {
    let mut model = xy_model();
    model.add_series(LineSeries::new().with_points(vec![
        plot_point(0.0, 0.0),
        plot_point(10.0, 4.0),
        plot_point(30.0, 2.0),
        plot_point(40.0, 8.0),
    ]));

    let mut rc = RecordingContext::new();
    model.update(true).unwrap();
    model.render(&mut rc, 600.0, 400.0).unwrap();

    // Layout precedes drawing: tick labels were measured before any
    // primitive was issued.
    assert!(rc.measure_calls() > 0);
    assert!(rc.measured_before_first_draw());

    let polylines: Vec<_> = rc.lines().collect();
    assert_eq!(polylines.len(), 1, "exactly one polyline for the series");
    let Primitive::Line { points, .. } = polylines[0] else {
        unreachable!();
    };
    assert_eq!(points.len(), 4);
    for pair in points.windows(2) {
        assert!(pair[0].x < pair[1].x, "screen X must increase with data X");
    }
    // Data Y grows upward, screen Y grows downward:
    assert!(points[0].y > points[1].y);
}

#[test]
fn log_axis_renders_data_touching_zero() {
    let mut model = PlotModel::new();
    model.add_axis(Axis::new("x", AxisPosition::Bottom).logarithmic(10.0));
    model.add_axis(Axis::new("y", AxisPosition::Left));
    model.add_series(LineSeries::new().with_points(vec![
        plot_point(0.0, 1.0),
        plot_point(10.0, 2.0),
        plot_point(100.0, 3.0),
    ]));

    let mut rc = RecordingContext::new();
    model.update(true).unwrap();
    // The auto-resolved range stays inside the log domain:
    let x_range = model.axes()[0].actual_range();
    assert!(x_range.min > 0.0);
    assert!(x_range.max >= 100.0);

    model.render(&mut rc, 600.0, 400.0).unwrap();

    // The x = 0 point has no finite screen position and is dropped;
    // the rest draw as one finite polyline.
    let polylines: Vec<_> = rc.lines().collect();
    assert_eq!(polylines.len(), 1);
    let Primitive::Line { points, .. } = polylines[0] else {
        unreachable!();
    };
    assert_eq!(points.len(), 2);
    assert!(points.iter().all(|p| p.is_finite()));
}

#[test]
fn invalidation_coalesces_into_one_update() {
    let mut model = xy_model();
    model.add_series(LineSeries::new().with_points(vec![
        plot_point(0.0, 1.0),
        plot_point(40.0, 9.0),
    ]));

    // Producer-side requests, e.g. from a data thread:
    model.invalidate(false);
    model.invalidate(true);
    model.invalidate(false);

    let mut rc = RecordingContext::new();
    model.render(&mut rc, 600.0, 400.0).unwrap();
    assert!(!model.is_invalidated(), "render drains the pending flags");
    assert_eq!(rc.lines().count(), 1);

    // Nothing pending: a second render re-renders but re-runs no update.
    let mut rc = RecordingContext::new();
    model.render(&mut rc, 600.0, 400.0).unwrap();
    assert_eq!(rc.lines().count(), 1);
}

#[test]
fn pan_then_render_moves_the_polyline() {
    let mut model = xy_model();
    model.add_series(
        LineSeries::new().with_points(vec![plot_point(0.0, 5.0), plot_point(40.0, 5.0)]),
    );
    model.update(true).unwrap();

    let mut rc = RecordingContext::new();
    model.render(&mut rc, 600.0, 400.0).unwrap();
    let Primitive::Line { points, .. } = rc.lines().next().unwrap() else {
        unreachable!();
    };
    let before = points[0].x;

    model.axes_mut()[0].pan(100.0);

    let mut rc = RecordingContext::new();
    model.render(&mut rc, 600.0, 400.0).unwrap();
    let Primitive::Line { points, .. } = rc.lines().next().unwrap() else {
        unreachable!();
    };
    assert!(
        points[0].x > before,
        "panning the view moves the content with it"
    );
}

#[test]
fn heat_map_maps_cells_through_the_color_axis() {
    let mut model = PlotModel::new();
    model.add_axis(Axis::new("x", AxisPosition::Bottom));
    model.add_axis(Axis::new("y", AxisPosition::Left));
    model.add_axis(Axis::color("value", Palette::gray(16)));
    model.add_series(
        HeatMapSeries::new()
            .with_extent(0.0, 3.0, 0.0, 1.0)
            .with_data(4, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
    );

    let mut rc = RecordingContext::new();
    model.update(true).unwrap();
    // The color axis picked up the value extent:
    assert_eq!(
        model.axes()[2].actual_range(),
        plotcore::plotmath::ValueRange::new(0.0, 7.0)
    );

    model.render(&mut rc, 600.0, 400.0).unwrap();
    let cell_rects = rc
        .primitives()
        .iter()
        .filter(|p| matches!(p, Primitive::Rect { fill: Some(_), .. }))
        .count();
    // 8 cells plus the background rect:
    assert_eq!(cell_rects, 8 + 1);
}

#[test]
fn contour_levels_render_as_segment_batches() {
    let mut model = PlotModel::new();
    model.add_axis(Axis::new("x", AxisPosition::Bottom));
    model.add_axis(Axis::new("y", AxisPosition::Left));
    model.add_series(
        ContourSeries::new()
            .with_grid(
                vec![0.0, 1.0],
                vec![0.0, 1.0],
                vec![0.0, 0.0, 10.0, 10.0],
            )
            .with_levels(vec![5.0])
            .with_stroke((1.5, Color32::MAGENTA)),
    );

    let mut rc = RecordingContext::new();
    model.update(true).unwrap();
    model.render(&mut rc, 600.0, 400.0).unwrap();

    // The series stroke color separates its batches from axis chrome:
    let contour_segments: usize = rc
        .primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::LineSegments { segments, stroke } if stroke.color == Color32::MAGENTA => {
                Some(segments.len())
            }
            _ => None,
        })
        .sum();
    assert_eq!(
        contour_segments, 1,
        "the 2x2 gradient yields exactly one segment at the mid level"
    );
}
