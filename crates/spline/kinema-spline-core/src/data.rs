//! Canonical serialized curve model (CurveData) and the key type.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::CurveDataError;
use crate::interp::InterpolationKind;

/// A (time, value) sample the curve passes through exactly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Key {
    /// Time in seconds. Strictly increasing within a curve.
    pub time: f64,
    pub value: DVec3,
}

impl Key {
    pub fn new(time: f64, value: DVec3) -> Self {
        Self { time, value }
    }
}

/// Serialized authoring format for a single curve.
///
/// Values serialize as `[x, y, z]` arrays; interpolation kinds use
/// kebab-case tags (`"bernstein"`, `"b-spline"`, `"euler-cubic"`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveData {
    pub name: String,
    pub kind: InterpolationKind,
    pub framerate: f64,
    #[serde(default)]
    pub looping: bool,
    pub keys: Vec<Key>,
}

impl CurveData {
    /// Validate basic invariants: positive finite framerate, finite and
    /// strictly increasing key times.
    pub fn validate(&self) -> Result<(), CurveDataError> {
        if !self.framerate.is_finite() || self.framerate <= 0.0 {
            return Err(CurveDataError::Invalid(format!(
                "framerate must be finite and positive, got {}",
                self.framerate
            )));
        }
        let mut last = f64::NEG_INFINITY;
        for key in &self.keys {
            if !key.time.is_finite() {
                return Err(CurveDataError::Invalid(format!(
                    "key times must be finite in curve '{}'",
                    self.name
                )));
            }
            if key.time <= last {
                return Err(CurveDataError::Invalid(format!(
                    "key times must be strictly increasing in curve '{}' (violated at t={})",
                    self.name, key.time
                )));
            }
            last = key.time;
        }
        Ok(())
    }
}

/// Parse CurveData JSON and run [`CurveData::validate`] on the result.
pub fn parse_curve_json(s: &str) -> Result<CurveData, CurveDataError> {
    let data: CurveData =
        serde_json::from_str(s).map_err(|e| CurveDataError::Parse(e.to_string()))?;
    data.validate()?;
    Ok(data)
}
