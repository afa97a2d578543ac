use plotmath::InvalidTickStep;

/// Errors surfaced by the update/render cycle.
///
/// Configuration errors fail fast so they are caught during development;
/// degenerate *data* (empty series, flat ranges) is never an error and is
/// handled by documented fallbacks instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlotError {
    /// A series references an axis key with no matching axis.
    #[error("series {series:?} references unknown axis key {key:?}")]
    UnknownAxis { series: String, key: String },

    /// A series needs a color axis but the plot has none.
    #[error("series {series:?} needs a color axis but none is configured")]
    MissingColorAxis { series: String },

    /// An explicit zero or negative tick step was configured.
    #[error(transparent)]
    InvalidTickStep(#[from] InvalidTickStep),

    /// A scatter series whose per-point values do not pair up with its
    /// points.
    #[error("series {series:?} has {points} points but {values} color values")]
    MismatchedValues {
        series: String,
        points: usize,
        values: usize,
    },

    /// A heat-map or contour grid whose dimensions do not match its data.
    #[error("grid is {columns}x{rows} but {values} values were given")]
    InvalidGrid {
        columns: usize,
        rows: usize,
        values: usize,
    },
}
