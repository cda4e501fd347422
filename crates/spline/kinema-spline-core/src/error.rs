//! Error types for editing operations and the serialized curve model.

use thiserror::Error;

/// Errors produced by editing operations on a [`Spline`](crate::Spline).
///
/// These are recoverable caller mistakes, not panics. Evaluation never
/// returns them: per-frame lookups degrade to zero vectors instead of
/// interrupting the caller's update loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    #[error("key index {index} out of range (have {len} keys)")]
    KeyIndexOutOfRange { index: usize, len: usize },
    #[error("control point index {index} out of range (have {len} control points)")]
    ControlPointIndexOutOfRange { index: usize, len: usize },
    #[error("a key already exists at time {time}")]
    DuplicateKeyTime { time: f64 },
    #[error("key time {time} must be greater than the last key time {last}")]
    KeyTimeNotIncreasing { time: f64, last: f64 },
}

/// Errors produced while parsing or validating [`CurveData`](crate::CurveData).
#[derive(Debug, Error)]
pub enum CurveDataError {
    #[error("curve json parse error: {0}")]
    Parse(String),
    #[error("invalid curve data: {0}")]
    Invalid(String),
}
