//! Catmull-Rom spline flattening.
//!
//! Turns an ordered point sequence into a denser sequence that follows a
//! smooth interpolating curve through every input point. Used by line
//! series when smoothing is enabled.

use crate::PlotPoint;

/// Centripetal parametrization. The usual choice: no cusps, no self-intersections.
pub const CENTRIPETAL_ALPHA: f64 = 0.5;

/// How far (as a fraction of the adjacent chord) a virtual neighbor is
/// extrapolated when a boundary point is duplicated. Keeps every knot
/// interval strictly positive.
const VIRTUAL_NEIGHBOR_EPSILON: f64 = 1e-4;

/// Flatten a Catmull-Rom spline through `points` into a polyline.
///
/// * `closed`: treat the sequence as a cycle (the curve returns to the first point).
/// * `alpha`: knot parametrization exponent; [`CENTRIPETAL_ALPHA`] for the
///   centripetal variant, `0.0` for uniform, `1.0` for chordal.
/// * `tolerance`: target spacing of emitted points along each chord,
///   in the same units as the input points.
/// * `max_segments`: cap on the subdivision count per input segment.
///
/// Inputs with fewer than two points are returned unchanged. Adjacent
/// duplicate points short-circuit to a single emitted point, so degenerate
/// data never divides by zero.
pub fn catmull_rom(
    points: &[PlotPoint],
    closed: bool,
    alpha: f64,
    tolerance: f64,
    max_segments: usize,
) -> Vec<PlotPoint> {
    if points.len() < 2 {
        return points.to_vec();
    }
    debug_assert!(tolerance > 0.0);

    let n = points.len();
    let segment_count = if closed { n } else { n - 1 };
    let mut result = Vec::with_capacity(segment_count * 8);

    for i in 0..segment_count {
        let p1 = points[i];
        let p2 = points[(i + 1) % n];

        if p1 == p2 {
            // Zero-length chord: the curve cannot leave the point.
            push_unless_repeat(&mut result, p1);
            continue;
        }

        let p0 = if closed {
            points[(i + n - 1) % n]
        } else if i == 0 {
            p1 // duplicated boundary, replaced below
        } else {
            points[i - 1]
        };
        let p3 = if closed {
            points[(i + 2) % n]
        } else if i + 2 < n {
            points[i + 2]
        } else {
            p2 // duplicated boundary, replaced below
        };

        // A duplicated neighbor would make a knot interval zero; synthesize
        // a virtual neighbor just beyond the real one instead.
        let p0 = if p0 == p1 {
            extrapolate(p2, p1, VIRTUAL_NEIGHBOR_EPSILON)
        } else {
            p0
        };
        let p3 = if p3 == p2 {
            extrapolate(p1, p2, VIRTUAL_NEIGHBOR_EPSILON)
        } else {
            p3
        };

        let chord = p1.distance(p2);
        let steps = ((chord / tolerance).ceil() as usize).clamp(1, max_segments.max(1));

        let t0 = 0.0;
        let t1 = t0 + p0.distance(p1).powf(alpha);
        let t2 = t1 + chord.powf(alpha);
        let t3 = t2 + p2.distance(p3).powf(alpha);

        for step in 0..steps {
            let t = crate::lerp(t1, t2, step as f64 / steps as f64);
            let point = eval_segment(p0, p1, p2, p3, [t0, t1, t2, t3], t);
            push_unless_repeat(&mut result, point);
        }
    }

    // Close the polyline on the last input point (or back on the first).
    let last = if closed { points[0] } else { points[n - 1] };
    push_unless_repeat(&mut result, last);

    result
}

/// [`catmull_rom`] with the centripetal exponent.
#[inline]
pub fn catmull_rom_centripetal(
    points: &[PlotPoint],
    closed: bool,
    tolerance: f64,
    max_segments: usize,
) -> Vec<PlotPoint> {
    catmull_rom(points, closed, CENTRIPETAL_ALPHA, tolerance, max_segments)
}

/// The point a small fraction beyond `to`, continuing the direction `from -> to`.
fn extrapolate(from: PlotPoint, to: PlotPoint, fraction: f64) -> PlotPoint {
    PlotPoint {
        x: to.x + (to.x - from.x) * fraction,
        y: to.y + (to.y - from.y) * fraction,
    }
}

/// Evaluate one Catmull-Rom segment at knot parameter `t` in `t1..=t2`,
/// by repeated linear interpolation (the Barry-Goldman pyramid).
fn eval_segment(
    p0: PlotPoint,
    p1: PlotPoint,
    p2: PlotPoint,
    p3: PlotPoint,
    [t0, t1, t2, t3]: [f64; 4],
    t: f64,
) -> PlotPoint {
    let a1 = lerp_knot(p0, p1, t0, t1, t);
    let a2 = lerp_knot(p1, p2, t1, t2, t);
    let a3 = lerp_knot(p2, p3, t2, t3, t);
    let b1 = lerp_knot(a1, a2, t0, t2, t);
    let b2 = lerp_knot(a2, a3, t1, t3, t);
    lerp_knot(b1, b2, t1, t2, t)
}

#[inline]
fn lerp_knot(a: PlotPoint, b: PlotPoint, ta: f64, tb: f64, t: f64) -> PlotPoint {
    debug_assert!(tb > ta);
    let u = (t - ta) / (tb - ta);
    a.lerp(b, u)
}

fn push_unless_repeat(out: &mut Vec<PlotPoint>, point: PlotPoint) {
    if out.last() != Some(&point) {
        out.push(point);
    }
}
