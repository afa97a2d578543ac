//! Minimal 2D math and geometry kernel for plotting.
//!
//! Pure functions and plain data types: data-space points, screen-space
//! points and rectangles, value ranges, "nice number" tick math,
//! Catmull-Rom spline flattening and contour tracing over scalar grids.
//!
//! Conventions (unless otherwise specified):
//!
//! * Data space uses `f64`, screen space uses `f32`.
//! * In screen space X+ is right and Y+ is down, (0,0) is left top.
//! * Nothing in this crate holds state; everything is recomputed on demand.
//!
//! ## Feature flags
#![cfg_attr(feature = "document-features", doc = document_features::document_features!())]
//!

pub mod contour;
mod point;
mod range;
mod rect;
pub mod spline;
pub mod ticks;

pub use self::{
    contour::{trace_contours, ContourRun},
    point::{plot_point, screen_point, PlotPoint, ScreenPoint},
    range::ValueRange,
    rect::ScreenRect,
    ticks::{
        calculate_minor_interval, create_default_tick_values, create_tick_values, nice_interval,
        InvalidTickStep,
    },
};

/// Linear interpolation: `lerp(a, b, 0.0)` is `a` and `lerp(a, b, 1.0)` is `b`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// Round a value to the given number of decimal places.
pub fn round_to_decimals(value: f64, decimal_places: usize) -> f64 {
    // This is a stupid way of doing this, but stupid works.
    format!("{value:.decimal_places$}").parse().unwrap_or(value)
}

/// Should return true when arguments are the same within some rounding error.
///
/// For instance `almost_equal(x, x.to_degrees().to_radians(), f64::EPSILON)`
/// should hold true for all x.
/// The `epsilon`  can be `f64::EPSILON` to handle simple transforms (like degrees -> radians)
/// but should be higher to handle more complex transformations.
pub fn almost_equal(a: f64, b: f64, epsilon: f64) -> bool {
    if a == b {
        true // handle infinites
    } else {
        let abs_max = a.abs().max(b.abs());
        abs_max <= epsilon || ((a - b).abs() / abs_max) <= epsilon
    }
}
