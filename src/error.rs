use thiserror::Error;

/// Errors raised by the curve and scoring engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlendError {
    /// A Bezier curve needs at least two control points.
    #[error("invalid curve: need at least 2 control points, got {points}")]
    InvalidCurve { points: usize },

    /// A control point has a NaN or infinite coordinate.
    #[error("control point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    /// A reconstructed control point lies outside the unit square.
    #[error("control point {index} ({x}, {y}) is outside [0, 1]")]
    PointOutOfRange { index: usize, x: f64, y: f64 },

    /// Strict input validation rejected a score input.
    #[error("{name} score {value} is outside [{min}, {max}]")]
    OutOfRangeInput {
        name: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    /// A point file could not be read, parsed or written.
    #[error("point file error: {0}")]
    PointFile(String),

    /// No built-in curve with that name.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, BlendError>;
