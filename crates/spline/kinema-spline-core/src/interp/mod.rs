//! Interpolation kinds and the per-curve interpolator value.

pub mod control_points;
pub mod functions;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use self::control_points::{
    bspline_control_polygon, cubic_bezier_control_points, euler_cubic_control_points,
    hermite_tangents,
};
use self::functions::{
    bernstein, bspline_segment, casteljau, convert_angles, hermite, lerp, matrix_form, unwrap_near,
};
use crate::data::Key;

/// Default sampling rate when none is configured.
pub const DEFAULT_FRAMERATE: f64 = 120.0;

/// Segment interpolation family. The Euler kinds treat values as per-axis
/// Euler angles in degrees and follow the shortest rotational path.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterpolationKind {
    Linear,
    Bernstein,
    Casteljau,
    Matrix,
    Hermite,
    BSpline,
    EulerLinear,
    EulerCubic,
}

/// Immutable per-curve interpolation configuration.
///
/// Changing the kind or framerate produces a fresh value (see [`with_kind`]
/// and [`with_framerate`](Self::with_framerate)); nothing is mutated in
/// place, so a built interpolator can be copied and shared freely.
///
/// [`with_kind`]: Self::with_kind
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interpolator {
    kind: InterpolationKind,
    dt: f64,
}

impl Interpolator {
    /// Build an interpolator sampling at `framerate` Hz. Non-finite or
    /// non-positive rates fall back to [`DEFAULT_FRAMERATE`].
    pub fn new(kind: InterpolationKind, framerate: f64) -> Self {
        let fps = if framerate.is_finite() && framerate > 0.0 {
            framerate
        } else {
            log::warn!("invalid framerate {framerate}, falling back to {DEFAULT_FRAMERATE}");
            DEFAULT_FRAMERATE
        };
        Self {
            kind,
            dt: 1.0 / fps,
        }
    }

    pub fn kind(&self) -> InterpolationKind {
        self.kind
    }

    pub fn framerate(&self) -> f64 {
        1.0 / self.dt
    }

    /// Fixed cache sampling step (1 / framerate), in seconds.
    pub fn delta_time(&self) -> f64 {
        self.dt
    }

    pub fn with_kind(self, kind: InterpolationKind) -> Self {
        Self { kind, dt: self.dt }
    }

    pub fn with_framerate(self, framerate: f64) -> Self {
        Self::new(self.kind, framerate)
    }

    /// Derive the auxiliary geometry this kind needs from the full key
    /// sequence plus the phantom boundary points. Layout per kind:
    /// none (linear kinds), 4 per segment (Bezier family), one tangent per
    /// key (Hermite), key count + 2 (B-spline).
    pub fn compute_control_points(
        &self,
        keys: &[Key],
        start_point: DVec3,
        end_point: DVec3,
    ) -> Vec<DVec3> {
        match self.kind {
            InterpolationKind::Linear | InterpolationKind::EulerLinear => Vec::new(),
            InterpolationKind::Bernstein
            | InterpolationKind::Casteljau
            | InterpolationKind::Matrix => {
                cubic_bezier_control_points(keys, start_point, end_point)
            }
            InterpolationKind::Hermite => hermite_tangents(keys),
            InterpolationKind::BSpline => bspline_control_polygon(keys),
            InterpolationKind::EulerCubic => {
                euler_cubic_control_points(keys, start_point, end_point)
            }
        }
    }

    /// Evaluate one segment at u in [0,1]; a pure function of the inputs.
    /// u = 0 reproduces the segment's start key, u = 1 its end key.
    ///
    /// `segment` must address a valid segment (`segment + 1 < keys.len()`)
    /// and `ctrl` must come from [`compute_control_points`] for the same
    /// keys; both are internal invariants, not caller-facing conditions.
    ///
    /// [`compute_control_points`]: Self::compute_control_points
    pub fn interpolate_segment(
        &self,
        keys: &[Key],
        ctrl: &[DVec3],
        segment: usize,
        u: f64,
    ) -> DVec3 {
        match self.kind {
            InterpolationKind::Linear => {
                lerp(keys[segment].value, keys[segment + 1].value, u)
            }
            InterpolationKind::Bernstein => {
                let [b0, b1, b2, b3] = bezier_block(ctrl, segment);
                bernstein(b0, b1, b2, b3, u)
            }
            InterpolationKind::Casteljau => {
                let [b0, b1, b2, b3] = bezier_block(ctrl, segment);
                casteljau(b0, b1, b2, b3, u)
            }
            InterpolationKind::Matrix => {
                let [b0, b1, b2, b3] = bezier_block(ctrl, segment);
                matrix_form(b0, b1, b2, b3, u)
            }
            InterpolationKind::Hermite => hermite(
                keys[segment].value,
                keys[segment + 1].value,
                ctrl[segment],
                ctrl[segment + 1],
                u,
            ),
            InterpolationKind::BSpline => bspline_segment(ctrl, keys.len(), segment, u),
            InterpolationKind::EulerLinear => {
                let (k0, k1) =
                    convert_angles(keys[segment].value, keys[segment + 1].value);
                lerp(k0, k1, u)
            }
            InterpolationKind::EulerCubic => {
                // The block is already one coherent unwrapped frame; chain
                // unwrapping here only guards externally edited control
                // points and must not rebase b0.
                let [b0, b1, b2, b3] = bezier_block(ctrl, segment);
                let b1 = unwrap_near(b0, b1);
                let b2 = unwrap_near(b1, b2);
                let b3 = unwrap_near(b2, b3);
                bernstein(b0, b1, b2, b3, u)
            }
        }
    }
}

#[inline]
fn bezier_block(ctrl: &[DVec3], segment: usize) -> [DVec3; 4] {
    let base = 4 * segment;
    [ctrl[base], ctrl[base + 1], ctrl[base + 2], ctrl[base + 3]]
}
