//! Iso-line extraction from a rectangular scalar grid.
//!
//! Produces raw line segments per contour level (marching squares with
//! center-averaged saddle disambiguation). Segments are deliberately not
//! joined into polylines here; that is a rendering-time concern.
//!
//! Levels are independent of each other and of any shared state, so a host
//! may compute them in parallel.

use crate::{plot_point, PlotPoint};

/// The segments traced for a single contour level.
#[derive(Clone, Debug, PartialEq)]
pub struct ContourRun {
    pub level: f64,
    pub segments: Vec<[PlotPoint; 2]>,
}

/// Trace iso-line segments for each of `levels` over a scalar grid.
///
/// * `x` are the column coordinates, `y` the row coordinates.
/// * `values` is row-major with `y.len()` rows of `x.len()` values;
///   the value at `(x[i], y[j])` is `values[j * x.len() + i]`.
///
/// Tie-break: a corner value exactly equal to the level counts as *above*
/// the level (`value >= level`), applied uniformly. A grid that equals the
/// level everywhere therefore produces no segments at all, never a mix.
///
/// Cells with a NaN corner are skipped. A grid with fewer than two rows or
/// columns (or mismatched dimensions) produces empty runs.
pub fn trace_contours(x: &[f64], y: &[f64], values: &[f64], levels: &[f64]) -> Vec<ContourRun> {
    levels
        .iter()
        .map(|&level| ContourRun {
            level,
            segments: trace_level(x, y, values, level),
        })
        .collect()
}

/// Trace the segments of a single level. See [`trace_contours`].
pub fn trace_level(x: &[f64], y: &[f64], values: &[f64], level: f64) -> Vec<[PlotPoint; 2]> {
    let (nx, ny) = (x.len(), y.len());
    if nx < 2 || ny < 2 || values.len() != nx * ny {
        debug_assert!(
            values.len() == nx * ny,
            "grid is {}x{} but {} values were given",
            nx,
            ny,
            values.len()
        );
        return Vec::new();
    }

    let mut segments = Vec::new();

    for j in 0..ny - 1 {
        for i in 0..nx - 1 {
            let cell = Cell {
                x0: x[i],
                x1: x[i + 1],
                y0: y[j],
                y1: y[j + 1],
                v00: values[j * nx + i],
                v10: values[j * nx + i + 1],
                v01: values[(j + 1) * nx + i],
                v11: values[(j + 1) * nx + i + 1],
            };
            cell.trace(level, &mut segments);
        }
    }

    segments
}

/// One grid cell: corner coordinates and corner values.
/// `v00` is at `(x0, y0)`, `v11` at `(x1, y1)`.
struct Cell {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    v00: f64,
    v10: f64,
    v01: f64,
    v11: f64,
}

/// The four cell edges a contour can cross.
#[derive(Clone, Copy)]
enum Edge {
    Bottom,
    Right,
    Top,
    Left,
}

impl Cell {
    fn trace(&self, level: f64, out: &mut Vec<[PlotPoint; 2]>) {
        let Self {
            v00, v10, v01, v11, ..
        } = *self;

        if v00.is_nan() || v10.is_nan() || v01.is_nan() || v11.is_nan() {
            return;
        }

        // `>=` is the uniform tie-break: a corner on the level is "above".
        let mut case = 0_u8;
        if v00 >= level {
            case |= 1;
        }
        if v10 >= level {
            case |= 2;
        }
        if v11 >= level {
            case |= 4;
        }
        if v01 >= level {
            case |= 8;
        }

        use Edge::{Bottom, Left, Right, Top};
        let edge_pairs: &[(Edge, Edge)] = match case {
            0 | 15 => &[],
            1 | 14 => &[(Left, Bottom)],
            2 | 13 => &[(Bottom, Right)],
            3 | 12 => &[(Left, Right)],
            4 | 11 => &[(Right, Top)],
            6 | 9 => &[(Bottom, Top)],
            7 | 8 => &[(Top, Left)],
            5 => {
                // Saddle: v00 and v11 above. The cell-center average decides
                // whether the two "above" corners connect through the middle.
                if self.center() >= level {
                    &[(Left, Top), (Bottom, Right)]
                } else {
                    &[(Left, Bottom), (Right, Top)]
                }
            }
            10 => {
                // Saddle: v10 and v01 above.
                if self.center() >= level {
                    &[(Left, Bottom), (Right, Top)]
                } else {
                    &[(Left, Top), (Bottom, Right)]
                }
            }
            _ => unreachable!("marching squares case index is 4 bits"),
        };

        for &(a, b) in edge_pairs {
            let p0 = self.crossing(a, level);
            let p1 = self.crossing(b, level);
            if p0 != p1 {
                out.push([p0, p1]);
            }
        }
    }

    fn center(&self) -> f64 {
        0.25 * (self.v00 + self.v10 + self.v01 + self.v11)
    }

    /// Where the level crosses the given edge, by linear interpolation
    /// between the edge's corner values.
    fn crossing(&self, edge: Edge, level: f64) -> PlotPoint {
        let (va, vb, pa, pb) = match edge {
            Edge::Bottom => (
                self.v00,
                self.v10,
                plot_point(self.x0, self.y0),
                plot_point(self.x1, self.y0),
            ),
            Edge::Right => (
                self.v10,
                self.v11,
                plot_point(self.x1, self.y0),
                plot_point(self.x1, self.y1),
            ),
            Edge::Top => (
                self.v01,
                self.v11,
                plot_point(self.x0, self.y1),
                plot_point(self.x1, self.y1),
            ),
            Edge::Left => (
                self.v00,
                self.v01,
                plot_point(self.x0, self.y0),
                plot_point(self.x0, self.y1),
            ),
        };

        // The edge straddles the level, so the denominator is non-zero.
        debug_assert!(va != vb);
        let t = (level - va) / (vb - va);
        pa.lerp(pb, t.clamp(0.0, 1.0))
    }
}
