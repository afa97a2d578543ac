//! Platform-independent plotting core.
//!
//! Turns numeric data series into ordered, device-independent drawing
//! primitives. Nothing here knows about a concrete surface: backends
//! implement [`RenderContext`] once (bitmap, vector writer, UI canvas) and
//! the core emits against it.
//!
//! The shape of a plot:
//!
//! * [`PlotModel`] owns [`Axis`] and [`Series`] collections plus legend and
//!   annotations, and runs the two-phase update/render cycle.
//! * [`Axis`] maps one data dimension to a screen interval (pan, zoom and
//!   tick layout included).
//! * [`Series`] variants turn their data into primitives: polylines,
//!   markers, bars, heat-map cells, contour segments.
//! * [`RecordingContext`] is a render context that records everything, for
//!   tests and primitive-stream consumers.
//!
//! Geometry and tick math live in the [`plotmath`] crate, re-exported here.
//!
//! ## Feature flags
#![cfg_attr(feature = "document-features", doc = document_features::document_features!())]
//!

mod annotation;
mod axis;
mod color;
mod error;
mod legend;
mod palette;
mod plot;
pub mod recorder;
mod render;
pub mod series;

pub use plotmath;

pub use self::{
    annotation::TextAnnotation,
    axis::{Axis, AxisKind, AxisPosition},
    color::Color32,
    error::PlotError,
    legend::{Corner, Legend},
    palette::{palette_index, Palette},
    plot::PlotModel,
    recorder::{Primitive, RecordingContext},
    render::{
        FontFamily, FontId, FontWeight, HAlign, LineJoin, LineStyle, RenderContext, Stroke,
        TextMetrics, VAlign,
    },
    series::{
        BarSeries, ContourSeries, HeatMapSeries, LegendEntry, LegendSwatch, LineSeries, Marker,
        MarkerShape, ScatterSeries, Series,
    },
};
