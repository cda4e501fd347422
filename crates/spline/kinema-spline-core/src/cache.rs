//! Dense sample cache built by walking every curve segment at a fixed step.

use glam::DVec3;

use crate::data::Key;
use crate::interp::Interpolator;

/// Guard against re-sampling a segment boundary that floating-point step
/// accumulation lands on from below.
pub(crate) const BOUNDARY_EPS: f64 = f32::EPSILON as f64;

/// Sample every segment at the interpolator's fixed time step, then append
/// the exact u = 1 value of the final segment so the cache always ends on
/// the last key. Curves with fewer than two keys produce an empty cache.
pub fn build_cache(interp: &Interpolator, keys: &[Key], ctrl: &[DVec3]) -> Vec<DVec3> {
    if keys.len() < 2 {
        return Vec::new();
    }
    let dt = interp.delta_time();
    let num_segments = keys.len() - 1;
    let span = keys[num_segments].time - keys[0].time;
    let mut curve = Vec::with_capacity((span / dt) as usize + num_segments + 1);

    for segment in 0..num_segments {
        let t0 = keys[segment].time;
        let t1 = keys[segment + 1].time;
        let mut t = t0;
        while t < t1 - BOUNDARY_EPS {
            let u = (t - t0) / (t1 - t0);
            curve.push(interp.interpolate_segment(keys, ctrl, segment, u));
            t += dt;
        }
    }
    curve.push(interp.interpolate_segment(keys, ctrl, num_segments - 1, 1.0));
    curve
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::InterpolationKind;

    #[test]
    fn cache_ends_exactly_on_last_key() {
        let keys = vec![
            Key::new(0.0, DVec3::ZERO),
            Key::new(1.0, DVec3::new(10.0, 0.0, 0.0)),
            Key::new(2.0, DVec3::new(10.0, 10.0, 0.0)),
        ];
        let interp = Interpolator::new(InterpolationKind::Linear, 1.0);
        let cache = build_cache(&interp, &keys, &[]);
        // One sample per whole second plus the trailing u=1 sample.
        assert_eq!(cache.len(), 3);
        assert_eq!(cache[2], keys[2].value);
    }

    #[test]
    fn short_curves_cache_nothing() {
        let interp = Interpolator::new(InterpolationKind::Linear, 30.0);
        assert!(build_cache(&interp, &[], &[]).is_empty());
        assert!(build_cache(&interp, &[Key::new(0.0, DVec3::ONE)], &[]).is_empty());
    }
}
