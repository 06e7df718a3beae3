//! Error types.

use crate::series::TimeValueId;

/// Fatal configuration errors raised while assembling a sparkline.
///
/// These are reported once, at construction time. A sparkline that built
/// successfully never fails to render for lack of a surface element.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// The drawing surface has no canvas to host overlays and markers.
    #[error("sparkline surface has no canvas element")]
    MissingCanvas,
    /// The drawing surface has no polyline to append points to.
    #[error("sparkline surface has no polyline element")]
    MissingPolyline,
}

/// Errors raised by [`TimeSeries`](crate::series::TimeSeries) mutations.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum SeriesError {
    /// The value is NaN or infinite.
    #[error("sample value {0} is not finite")]
    NonFiniteValue(f64),
    /// A replacement batch carried the same identifier twice.
    #[error("duplicate time value id {0}")]
    DuplicateId(TimeValueId),
    /// No identifier is left to hand out.
    #[error("time value ids exhausted")]
    IdsExhausted,
}
