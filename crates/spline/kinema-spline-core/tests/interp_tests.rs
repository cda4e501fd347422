use glam::DVec3;
use kinema_spline_core::interp::control_points::{bspline_control_polygon, hermite_tangents};
use kinema_spline_core::interp::functions::{bernstein, casteljau, convert_angles, matrix_form};
use kinema_spline_core::{InterpolationKind, Interpolator, Key};

fn approx(a: DVec3, b: DVec3, eps: f64) {
    assert!((a - b).length() <= eps, "left={a} right={b} eps={eps}");
}

fn sample_keys() -> Vec<Key> {
    [
        (0.0, [0.0, 0.0, 0.0]),
        (1.0, [2.0, 1.0, -1.0]),
        (2.0, [1.5, 3.0, 0.5]),
        (3.0, [-1.0, 2.0, 2.0]),
        (4.0, [0.0, 0.0, 1.0]),
    ]
    .into_iter()
    .map(|(time, v)| Key {
        time,
        value: DVec3::from_array(v),
    })
    .collect()
}

fn angle_keys() -> Vec<Key> {
    [
        (0.0, [10.0, 20.0, 30.0]),
        (1.0, [50.0, -40.0, 90.0]),
        (2.0, [120.0, 30.0, -60.0]),
    ]
    .into_iter()
    .map(|(time, v)| Key {
        time,
        value: DVec3::from_array(v),
    })
    .collect()
}

fn phantom_points(keys: &[Key]) -> (DVec3, DVec3) {
    let n = keys.len();
    let start = keys[0].value + (keys[0].value - keys[1].value) * 0.25;
    let end = keys[n - 1].value + (keys[n - 1].value - keys[n - 2].value) * 0.25;
    (start, end)
}

/// it should reproduce both segment endpoints at u = 0 and u = 1 for every kind
#[test]
fn endpoints_reproduced_for_all_kinds() {
    let cases = [
        (InterpolationKind::Linear, 1e-9),
        (InterpolationKind::Bernstein, 1e-9),
        (InterpolationKind::Casteljau, 1e-9),
        (InterpolationKind::Matrix, 1e-9),
        (InterpolationKind::Hermite, 1e-9),
        (InterpolationKind::BSpline, 1e-6),
    ];
    let keys = sample_keys();
    let (start, end) = phantom_points(&keys);

    for (kind, eps) in cases {
        let interp = Interpolator::new(kind, 120.0);
        let ctrl = interp.compute_control_points(&keys, start, end);
        for segment in 0..keys.len() - 1 {
            let at0 = interp.interpolate_segment(&keys, &ctrl, segment, 0.0);
            let at1 = interp.interpolate_segment(&keys, &ctrl, segment, 1.0);
            approx(at0, keys[segment].value, eps);
            approx(at1, keys[segment + 1].value, eps);
        }
    }

    // Euler kinds, with key deltas below a half turn so no unwrap shifts.
    let keys = angle_keys();
    let (start, end) = phantom_points(&keys);
    for kind in [InterpolationKind::EulerLinear, InterpolationKind::EulerCubic] {
        let interp = Interpolator::new(kind, 120.0);
        let ctrl = interp.compute_control_points(&keys, start, end);
        for segment in 0..keys.len() - 1 {
            approx(
                interp.interpolate_segment(&keys, &ctrl, segment, 0.0),
                keys[segment].value,
                1e-9,
            );
            approx(
                interp.interpolate_segment(&keys, &ctrl, segment, 1.0),
                keys[segment + 1].value,
                1e-9,
            );
        }
    }
}

/// it should evaluate the same cubic through Bernstein, de Casteljau, and the
/// matrix form
#[test]
fn cubic_evaluation_schemes_agree() {
    let b0 = DVec3::new(0.0, 0.0, 0.0);
    let b1 = DVec3::new(1.0, 2.0, -0.5);
    let b2 = DVec3::new(3.0, -1.0, 0.5);
    let b3 = DVec3::new(4.0, 1.0, 2.0);

    for i in 0..=16 {
        let u = i as f64 / 16.0;
        let reference = bernstein(b0, b1, b2, b3, u);
        approx(casteljau(b0, b1, b2, b3, u), reference, 1e-9);
        approx(matrix_form(b0, b1, b2, b3, u), reference, 1e-9);
    }
}

/// it should produce Hermite tangents that satisfy the clamped end conditions
#[test]
fn hermite_tangents_satisfy_system() {
    let keys = sample_keys();
    let n = keys.len();
    let q = hermite_tangents(&keys);
    assert_eq!(q.len(), n);

    let k: Vec<DVec3> = keys.iter().map(|key| key.value).collect();
    approx(q[0] * 2.0 + q[1], k[1] * 3.0 - k[0], 1e-9);
    for i in 1..n - 1 {
        approx(
            q[i - 1] + q[i] * 4.0 + q[i + 1],
            (k[i + 1] - k[i - 1]) * 3.0,
            1e-9,
        );
    }
    approx(q[n - 2] + q[n - 1] * 2.0, k[n - 1] * 3.0 - k[n - 2], 1e-9);
}

/// it should pass the B-spline through every key of the control polygon
#[test]
fn bspline_passes_through_keys() {
    let keys = sample_keys();
    let n = keys.len();
    let ctrl = bspline_control_polygon(&keys);
    assert_eq!(ctrl.len(), n + 2);

    let interp = Interpolator::new(InterpolationKind::BSpline, 120.0);
    for i in 0..n {
        let (segment, u) = if i + 1 == n { (n - 2, 1.0) } else { (i, 0.0) };
        approx(
            interp.interpolate_segment(&keys, &ctrl, segment, u),
            keys[i].value,
            1e-9,
        );
    }
}

/// it should unwrap the second angle onto the shortest rotational path
#[test]
fn convert_angles_takes_shortest_path() {
    let (k0, k1) = convert_angles(DVec3::new(350.0, 0.0, 0.0), DVec3::new(10.0, 0.0, 0.0));
    approx(k0, DVec3::new(350.0, 0.0, 0.0), 1e-12);
    approx(k1, DVec3::new(370.0, 0.0, 0.0), 1e-12);

    // Exact half turns stay at +180 rather than flipping to -180.
    let (k0, k1) = convert_angles(DVec3::ZERO, DVec3::new(180.0, 0.0, 0.0));
    approx(k0, DVec3::ZERO, 1e-12);
    approx(k1, DVec3::new(180.0, 0.0, 0.0), 1e-12);

    // Inputs far outside a full turn are wrapped before unwrapping.
    let (_, k1) = convert_angles(DVec3::ZERO, DVec3::new(725.0, 0.0, 0.0));
    approx(k1, DVec3::new(5.0, 0.0, 0.0), 1e-12);
}

/// it should cross the zero-degree seam linearly instead of spinning backward
#[test]
fn euler_linear_crosses_zero_seam() {
    let keys: Vec<Key> = [(0.0, [350.0, 0.0, 0.0]), (1.0, [10.0, 0.0, 0.0])]
        .into_iter()
        .map(|(time, v)| Key {
            time,
            value: DVec3::from_array(v),
        })
        .collect();

    let interp = Interpolator::new(InterpolationKind::EulerLinear, 120.0);
    let ctrl = interp.compute_control_points(&keys, DVec3::ZERO, DVec3::ZERO);
    approx(
        interp.interpolate_segment(&keys, &ctrl, 0, 0.5),
        DVec3::new(360.0, 0.0, 0.0),
        1e-9,
    );
}

/// it should keep each Euler-cubic control block in one coherent frame even
/// when an unwrapped endpoint sits past a full turn
#[test]
fn euler_cubic_control_points_stay_coherent() {
    let keys: Vec<Key> = [
        (0.0, [350.0, 0.0, 0.0]),
        (1.0, [10.0, 45.0, 0.0]),
        (2.0, [30.0, -45.0, 0.0]),
    ]
    .into_iter()
    .map(|(time, v)| Key {
        time,
        value: DVec3::from_array(v),
    })
    .collect();
    let (start, end) = phantom_points(&keys);

    let interp = Interpolator::new(InterpolationKind::EulerCubic, 120.0);
    let ctrl = interp.compute_control_points(&keys, start, end);

    // Raw consecutive control points never jump more than a half turn.
    for segment in 0..keys.len() - 1 {
        let base = 4 * segment;
        for pair in ctrl[base..base + 4].windows(2) {
            let delta = pair[1] - pair[0];
            for axis in 0..3 {
                assert!(
                    delta[axis].abs() <= 180.0 + 1e-9,
                    "segment {segment}: axis {axis} jumps {delta}"
                );
            }
        }
    }

    // Segment 0 crosses the seam: 350 -> 370, with the neighbor term
    // unwrapped into the same frame (30 -> 390), not rebased to 30.
    let x: Vec<f64> = ctrl[0..4].iter().map(|b| b.x).collect();
    assert!((x[0] - 350.0).abs() < 1e-9, "b0={}", x[0]);
    assert!((x[1] - (350.0 - 65.0 / 6.0)).abs() < 1e-9, "b1={}", x[1]);
    assert!((x[2] - (370.0 - 40.0 / 6.0)).abs() < 1e-9, "b2={}", x[2]);
    assert!((x[3] - 370.0).abs() < 1e-9, "b3={}", x[3]);

    // The evaluated curve stays near the seam mid-segment.
    let mid = interp.interpolate_segment(&keys, &ctrl, 0, 0.5);
    assert!(mid.x > 340.0 && mid.x < 380.0, "mid={mid}");
}
