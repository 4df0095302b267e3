//! Error types for distance field computation and rendering.

use thiserror::Error;

/// Result type for distance field operations.
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors that can occur while building or transforming a distance field.
#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    /// Downsample factor is zero or does not divide the field dimensions.
    #[error("invalid downsample factor {factor} for a {width}x{height} field")]
    InvalidFactor {
        factor: usize,
        width: usize,
        height: usize,
    },

    /// Oversample factor is not a power of two.
    #[error("invalid oversample factor {0} (must be a power of two)")]
    InvalidOversample(u32),

    /// Mask exceeds the largest size the sentinel values can cover.
    #[error("mask of {width}x{height} exceeds the maximum dimension of {max}")]
    DimensionsTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    /// Cell buffer length does not match the declared dimensions.
    #[error("expected {expected} cells for the given dimensions, got {actual}")]
    CellCount { expected: usize, actual: usize },

    /// Hex color could not be parsed.
    #[error("invalid color format ('{0}')")]
    InvalidColor(String),

    /// Color stop is not of the form `dist:color`.
    #[error("invalid dist:color format ('{0}')")]
    InvalidColorStop(String),

    /// An outline needs at least one color stop.
    #[error("no color stops given")]
    EmptyColorStops,
}
