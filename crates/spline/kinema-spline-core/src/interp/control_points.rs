//! Control point derivation, one routine per interpolation family.
//!
//! All routines rebuild their output wholesale from the full key sequence
//! (plus the phantom boundary points where the family needs them); nothing is
//! patched incrementally.

use glam::DVec3;

use super::functions::{convert_angles, unwrap_near};
use crate::data::Key;

/// Catmull-Rom-style Bezier control points: 4 per segment, contiguous.
/// Inner points sit 1/3 of the way along half the neighbor span; the phantom
/// `start_point`/`end_point` stand in for the missing neighbor at the
/// boundaries.
pub fn cubic_bezier_control_points(
    keys: &[Key],
    start_point: DVec3,
    end_point: DVec3,
) -> Vec<DVec3> {
    let n = keys.len();
    if n < 2 {
        return Vec::new();
    }
    let mut ctrl = Vec::with_capacity(4 * (n - 1));
    for i in 1..n {
        let b0 = keys[i - 1].value;
        let b3 = keys[i].value;
        let prev = if i == 1 { start_point } else { keys[i - 2].value };
        let next = if i == n - 1 { end_point } else { keys[i + 1].value };
        let b1 = b0 + (b3 - prev) / 6.0;
        let b2 = b3 - (next - b0) / 6.0;
        ctrl.extend_from_slice(&[b0, b1, b2, b3]);
    }
    ctrl
}

/// Per-key tangents for the clamped-endpoint cubic Hermite spline.
///
/// Solves the classic tridiagonal system (rows `[2 1]`, `[1 4 1]`, ...,
/// `[1 2]`) for all three axes simultaneously. The boundary right-hand sides
/// follow the clamped-derivative expressions `3*k[1] - k[0]` and
/// `3*k[n-1] - k[n-2]`, applied per axis.
pub fn hermite_tangents(keys: &[Key]) -> Vec<DVec3> {
    let n = keys.len();
    if n < 2 {
        return vec![DVec3::ZERO; n];
    }
    let mut diag = vec![4.0; n];
    diag[0] = 2.0;
    diag[n - 1] = 2.0;
    let lower = vec![1.0; n];
    let upper = vec![1.0; n];

    let mut rhs = Vec::with_capacity(n);
    rhs.push(keys[1].value * 3.0 - keys[0].value);
    for i in 1..n - 1 {
        rhs.push((keys[i + 1].value - keys[i - 1].value) * 3.0);
    }
    rhs.push(keys[n - 1].value * 3.0 - keys[n - 2].value);

    solve_tridiagonal(&lower, &diag, &upper, rhs)
}

/// Control polygon (key count + 2 points) for the natural uniform cubic
/// B-spline interpolating the keys at integer parameters.
///
/// Folding the natural end conditions (zero second derivative) into the
/// interpolation system pins `c[1]` to the first key and `c[n]` to the last;
/// the interior points come from the 1-4-1 tridiagonal system
/// `(c[i] + 4 c[i+1] + c[i+2]) / 6 = key[i]`, and the outermost points are
/// reflections across the pinned ones.
pub fn bspline_control_polygon(keys: &[Key]) -> Vec<DVec3> {
    let n = keys.len();
    let mut ctrl = vec![DVec3::ZERO; n + 2];
    if n < 2 {
        return ctrl;
    }
    ctrl[1] = keys[0].value;
    ctrl[n] = keys[n - 1].value;

    let interior = n - 2;
    if interior > 0 {
        let lower = vec![1.0; interior];
        let diag = vec![4.0; interior];
        let upper = vec![1.0; interior];
        let mut rhs: Vec<DVec3> = keys[1..n - 1].iter().map(|k| k.value * 6.0).collect();
        rhs[0] -= ctrl[1];
        rhs[interior - 1] -= ctrl[n];
        let solved = solve_tridiagonal(&lower, &diag, &upper, rhs);
        ctrl[2..n].copy_from_slice(&solved);
    }

    ctrl[0] = ctrl[1] * 2.0 - ctrl[2];
    ctrl[n + 1] = ctrl[n] * 2.0 - ctrl[n - 1];
    ctrl
}

/// Euler-angle variant of [`cubic_bezier_control_points`]: identical tangent
/// construction, but every pairwise difference between angle-valued keys is
/// unwrapped onto the shortest rotational path first. The neighbor terms are
/// unwrapped relative to the block's own endpoints ([`unwrap_near`]), so the
/// whole block stays in one coherent frame even when an unwrapped endpoint
/// sits past a full turn.
pub fn euler_cubic_control_points(
    keys: &[Key],
    start_point: DVec3,
    end_point: DVec3,
) -> Vec<DVec3> {
    let n = keys.len();
    if n < 2 {
        return Vec::new();
    }
    let mut ctrl = Vec::with_capacity(4 * (n - 1));
    for i in 1..n {
        let (b0, b3) = convert_angles(keys[i - 1].value, keys[i].value);
        let prev = if i == 1 {
            unwrap_near(b0, start_point)
        } else {
            unwrap_near(b0, keys[i - 2].value)
        };
        let next = if i == n - 1 {
            unwrap_near(b3, end_point)
        } else {
            unwrap_near(b3, keys[i + 1].value)
        };
        let b1 = b0 + (b3 - prev) / 6.0;
        let b2 = b3 - (next - b0) / 6.0;
        ctrl.extend_from_slice(&[b0, b1, b2, b3]);
    }
    ctrl
}

/// Thomas algorithm for a tridiagonal system with vector right-hand sides
/// (one solve covers all three axes). `lower[0]` and `upper[len-1]` are
/// ignored. Diagonal dominance of the spline systems keeps the sweep stable.
pub fn solve_tridiagonal(
    lower: &[f64],
    diag: &[f64],
    upper: &[f64],
    mut rhs: Vec<DVec3>,
) -> Vec<DVec3> {
    let n = rhs.len();
    debug_assert!(lower.len() == n && diag.len() == n && upper.len() == n);
    if n == 0 {
        return rhs;
    }

    let mut scratch = vec![0.0; n];
    scratch[0] = upper[0] / diag[0];
    rhs[0] /= diag[0];
    for i in 1..n {
        let denom = diag[i] - lower[i] * scratch[i - 1];
        scratch[i] = upper[i] / denom;
        rhs[i] = (rhs[i] - rhs[i - 1] * lower[i]) / denom;
    }
    for i in (0..n - 1).rev() {
        let next = rhs[i + 1];
        rhs[i] -= next * scratch[i];
    }
    rhs
}
