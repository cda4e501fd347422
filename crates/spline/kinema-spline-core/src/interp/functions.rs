//! Pure segment evaluation math shared by the interpolation kinds:
//! - lerp / Bernstein closed form / de Casteljau recursion / matrix form
//! - Hermite basis
//! - Cox–de Boor B-spline basis over a uniform knot vector
//! - angle unwrapping for the Euler kinds

use glam::{DMat4, DVec3, DVec4};

/// Linear blend so that u = 0 returns `a` and u = 1 returns `b`.
#[inline]
pub fn lerp(a: DVec3, b: DVec3, u: f64) -> DVec3 {
    a * (1.0 - u) + b * u
}

/// Cubic Bezier via the closed-form Bernstein basis.
#[inline]
pub fn bernstein(b0: DVec3, b1: DVec3, b2: DVec3, b3: DVec3, u: f64) -> DVec3 {
    let v = 1.0 - u;
    b0 * (v * v * v) + b1 * (3.0 * u * v * v) + b2 * (3.0 * u * u * v) + b3 * (u * u * u)
}

/// Cubic Bezier via de Casteljau's algorithm: three levels of pairwise
/// blends. Numerically equivalent to [`bernstein`] but a distinct algorithm.
#[inline]
pub fn casteljau(b0: DVec3, b1: DVec3, b2: DVec3, b3: DVec3, u: f64) -> DVec3 {
    let b01 = lerp(b0, b1, u);
    let b11 = lerp(b1, b2, u);
    let b21 = lerp(b2, b3, u);
    let b02 = lerp(b01, b11, u);
    let b12 = lerp(b11, b21, u);
    lerp(b02, b12, u)
}

/// Cubic Bezier in matrix form: `[b0 b1 b2 b3] * M * [1, u, u^2, u^3]^T`
/// with the standard Bezier basis matrix.
#[inline]
pub fn matrix_form(b0: DVec3, b1: DVec3, b2: DVec3, b3: DVec3, u: f64) -> DVec3 {
    // Rows of M; glam stores columns, so the rows go in transposed.
    let m = DMat4::from_cols(
        DVec4::new(1.0, 0.0, 0.0, 0.0),
        DVec4::new(-3.0, 3.0, 0.0, 0.0),
        DVec4::new(3.0, -6.0, 3.0, 0.0),
        DVec4::new(-1.0, 3.0, -3.0, 1.0),
    );
    let w = m * DVec4::new(1.0, u, u * u, u * u * u);
    b0 * w.x + b1 * w.y + b2 * w.z + b3 * w.w
}

/// Cubic Hermite with endpoint values `p0`/`p1` and tangents `q0`/`q1`.
#[inline]
pub fn hermite(p0: DVec3, p1: DVec3, q0: DVec3, q1: DVec3, u: f64) -> DVec3 {
    let u2 = u * u;
    let u3 = u2 * u;
    p0 * (2.0 * u3 - 3.0 * u2 + 1.0)
        + p1 * (-2.0 * u3 + 3.0 * u2)
        + q0 * (u3 - 2.0 * u2 + u)
        + q1 * (u3 - u2)
}

/// Uniform knot vector for a cubic B-spline interpolating `num_keys` keys:
/// knots spaced 1 apart, extended three knots past the curve domain on both
/// sides so the domain endpoints stay interior to the basis recursion.
pub fn uniform_knots(num_keys: usize) -> Vec<f64> {
    (0..num_keys + 6).map(|j| j as f64 - 3.0).collect()
}

/// Recursive Cox–de Boor basis function `N_{i,k}` over `knots`.
/// Intervals are half-open; zero-width spans contribute nothing.
pub fn cox_de_boor(knots: &[f64], i: usize, k: usize, t: f64) -> f64 {
    if k == 0 {
        return if knots[i] <= t && t < knots[i + 1] { 1.0 } else { 0.0 };
    }
    let left_den = knots[i + k] - knots[i];
    let right_den = knots[i + k + 1] - knots[i + 1];
    let mut value = 0.0;
    if left_den > 0.0 {
        value += (t - knots[i]) / left_den * cox_de_boor(knots, i, k - 1, t);
    }
    if right_den > 0.0 {
        value += (knots[i + k + 1] - t) / right_den * cox_de_boor(knots, i + 1, k - 1, t);
    }
    value
}

/// Evaluate one cubic B-spline segment at u in [0,1] over the control
/// polygon from [`bspline_control_polygon`](super::control_points::bspline_control_polygon).
/// Segment s covers parameter [s, s+1]; only basis functions s..s+3 are
/// nonzero there.
pub fn bspline_segment(ctrl: &[DVec3], num_keys: usize, segment: usize, u: f64) -> DVec3 {
    let knots = uniform_knots(num_keys);
    let t = segment as f64 + u;
    let mut value = DVec3::ZERO;
    for (i, point) in ctrl.iter().enumerate().skip(segment).take(4) {
        value += *point * cox_de_boor(&knots, i, 3, t);
    }
    value
}

/// Reduce a pair of Euler-angle vectors (degrees) so the second lies along
/// the shortest rotational path from the first.
///
/// Each axis of both inputs is first folded into (-360, 360]; the per-axis
/// delta is then folded into (-180, 180] and re-applied to the first vector,
/// so the returned pair never differs by more than half a turn on any axis.
pub fn convert_angles(key0: DVec3, key1: DVec3) -> (DVec3, DVec3) {
    let mut out0 = DVec3::ZERO;
    for axis in 0..3 {
        out0[axis] = wrap_full_turn(key0[axis]);
    }
    (out0, unwrap_near(out0, key1))
}

/// Unwrap `target` onto the shortest rotational path from `reference`,
/// leaving `reference`'s frame untouched. Used wherever a running unwrapped
/// frame may already sit past a full turn and must not be rebased.
pub fn unwrap_near(reference: DVec3, target: DVec3) -> DVec3 {
    let mut out = DVec3::ZERO;
    for axis in 0..3 {
        let delta =
            fold_half_turn(wrap_full_turn(target[axis]) - wrap_full_turn(reference[axis]));
        out[axis] = reference[axis] + delta;
    }
    out
}

#[inline]
fn fold_half_turn(delta: f64) -> f64 {
    let mut delta = delta % 360.0;
    if delta <= -180.0 {
        delta += 360.0;
    } else if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

#[inline]
fn wrap_full_turn(angle: f64) -> f64 {
    if angle > 360.0 || angle < -360.0 {
        angle % 360.0
    } else {
        angle
    }
}
