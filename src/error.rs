//! Error type shared by grid construction and radius queries.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RadialError>;

/// Contract violations reported by [`BucketGrid`](crate::BucketGrid) and
/// [`RadialCells`](crate::RadialCells).
///
/// Every variant is a caller error. None of them leaves a partially built
/// index or a partially filled result buffer behind.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum RadialError {
    /// A point lies outside `[0, height) x [0, width)`.
    #[error("point {index} at (row {row}, col {col}) is out of bounds")]
    OutOfBoundsPoint {
        /// Position of the point in the caller's input.
        index: usize,
        /// Row coordinate of the point.
        row: f32,
        /// Column coordinate of the point.
        col: f32,
    },

    /// A query radius that is negative or NaN.
    #[error("invalid query radius {0}")]
    InvalidRadius(f32),

    /// A query centre with a non-finite coordinate.
    #[error("invalid query centre ({x}, {y})")]
    InvalidCenter {
        /// Column coordinate of the centre.
        x: f32,
        /// Row coordinate of the centre.
        y: f32,
    },

    /// Grid geometry that cannot be partitioned into cells.
    #[error("invalid grid geometry: width {width}, height {height}, step {step}")]
    InvalidSpec {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
        /// Requested cell step.
        step: f32,
    },
}
