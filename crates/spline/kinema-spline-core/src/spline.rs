//! The spline: ordered key store, derived control points, dense sample
//! cache, and the cache-backed evaluator.
//!
//! Every non-deferred edit validates its arguments, mutates the key store,
//! and runs control-point derivation plus a full cache rebuild before
//! returning, so readers never observe derived state that disagrees with the
//! keys. The type is single-threaded by design; sharing one across threads
//! requires external mutual exclusion over the whole value.

use glam::DVec3;

use crate::cache::build_cache;
use crate::data::{CurveData, Key};
use crate::error::{CurveDataError, SplineError};
use crate::interp::{InterpolationKind, Interpolator, DEFAULT_FRAMERATE};

/// Fraction of the distance to the adjacent key used when extrapolating the
/// phantom boundary points along the first/last tangent.
const ENDPOINT_OFFSET: f64 = 0.25;

#[derive(Clone, Debug)]
pub struct Spline {
    keys: Vec<Key>,
    interp: Interpolator,
    looping: bool,
    start_point: DVec3,
    end_point: DVec3,
    control_points: Vec<DVec3>,
    cache: Vec<DVec3>,
}

impl Default for Spline {
    fn default() -> Self {
        Self::new(InterpolationKind::Bernstein, DEFAULT_FRAMERATE)
    }
}

impl Spline {
    pub fn new(kind: InterpolationKind, framerate: f64) -> Self {
        Self {
            keys: Vec::new(),
            interp: Interpolator::new(kind, framerate),
            looping: false,
            start_point: DVec3::ZERO,
            end_point: DVec3::ZERO,
            control_points: Vec::new(),
            cache: Vec::new(),
        }
    }

    /// Build a spline from validated curve data and rebuild all derived
    /// state once.
    pub fn from_data(data: &CurveData) -> Result<Self, CurveDataError> {
        data.validate()?;
        let mut spline = Self::new(data.kind, data.framerate);
        spline.looping = data.looping;
        spline.keys.extend_from_slice(&data.keys);
        spline.rebuild(true);
        Ok(spline)
    }

    pub fn to_data(&self, name: &str) -> CurveData {
        CurveData {
            name: name.to_string(),
            kind: self.interp.kind(),
            framerate: self.interp.framerate(),
            looping: self.looping,
            keys: self.keys.clone(),
        }
    }

    // ---- editing ----

    /// Append a key after the current last key. `update_curve = false`
    /// defers the rebuild, leaving derived state stale until the next
    /// non-deferred edit.
    pub fn append_key(
        &mut self,
        time: f64,
        value: DVec3,
        update_curve: bool,
    ) -> Result<(), SplineError> {
        if let Some(last) = self.keys.last() {
            if time == last.time {
                return Err(SplineError::DuplicateKeyTime { time });
            }
            if time < last.time {
                return Err(SplineError::KeyTimeNotIncreasing {
                    time,
                    last: last.time,
                });
            }
        }
        self.keys.push(Key::new(time, value));
        if update_curve {
            self.rebuild(true);
        }
        Ok(())
    }

    /// Append with an auto-assigned time: 0 for the first key, otherwise the
    /// current duration + 1.
    pub fn append_key_auto(&mut self, value: DVec3, update_curve: bool) {
        let time = if self.keys.is_empty() {
            0.0
        } else {
            self.duration() + 1.0
        };
        self.keys.push(Key::new(time, value));
        if update_curve {
            self.rebuild(true);
        }
    }

    /// Insert a key in time order, returning its index. A key at exactly the
    /// same time is rejected before any state changes.
    pub fn insert_key(
        &mut self,
        time: f64,
        value: DVec3,
        update_curve: bool,
    ) -> Result<usize, SplineError> {
        let index = match self.keys.iter().position(|k| time <= k.time) {
            Some(i) if self.keys[i].time == time => {
                return Err(SplineError::DuplicateKeyTime { time });
            }
            Some(i) => {
                self.keys.insert(i, Key::new(time, value));
                i
            }
            None => {
                self.keys.push(Key::new(time, value));
                self.keys.len() - 1
            }
        };
        if update_curve {
            self.rebuild(true);
        }
        Ok(index)
    }

    /// Replace the value of key `id` and rebuild.
    pub fn edit_key(&mut self, id: usize, value: DVec3) -> Result<(), SplineError> {
        let len = self.keys.len();
        let key = self
            .keys
            .get_mut(id)
            .ok_or(SplineError::KeyIndexOutOfRange { index: id, len })?;
        key.value = value;
        self.rebuild(true);
        Ok(())
    }

    /// Remove key `id` and rebuild.
    pub fn delete_key(&mut self, id: usize) -> Result<(), SplineError> {
        if id >= self.keys.len() {
            return Err(SplineError::KeyIndexOutOfRange {
                index: id,
                len: self.keys.len(),
            });
        }
        self.keys.remove(id);
        self.rebuild(true);
        Ok(())
    }

    /// Drop every key and all derived state.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.rebuild(true);
    }

    /// Edit a control point through the external-facing indexing, where
    /// index 0 is the phantom start point and the last index the phantom end
    /// point. Moving a phantom point re-derives the non-endpoint control
    /// points (skipping the tangent-from-neighbors recompute); editing an
    /// interior point keeps the derivation output and only rebuilds the
    /// cache.
    pub fn edit_control_point(&mut self, id: usize, value: DVec3) -> Result<(), SplineError> {
        let len = self.num_control_points();
        if id >= len {
            return Err(SplineError::ControlPointIndexOutOfRange { index: id, len });
        }
        if id == 0 {
            self.start_point = value;
            self.rebuild(false);
        } else if id == len - 1 {
            self.end_point = value;
            self.rebuild(false);
        } else {
            self.control_points[id - 1] = value;
            self.cache = build_cache(&self.interp, &self.keys, &self.control_points);
        }
        Ok(())
    }

    // ---- configuration ----

    /// Switch the interpolation family. The old interpolator value and all
    /// derived geometry are discarded and rebuilt from the keys.
    pub fn set_interpolation(&mut self, kind: InterpolationKind) {
        self.interp = self.interp.with_kind(kind);
        self.rebuild(true);
    }

    pub fn kind(&self) -> InterpolationKind {
        self.interp.kind()
    }

    /// Change the cache sampling rate and rebuild the cache. Control points
    /// do not depend on the framerate and are kept.
    pub fn set_framerate(&mut self, framerate: f64) {
        self.interp = self.interp.with_framerate(framerate);
        self.cache = build_cache(&self.interp, &self.keys, &self.control_points);
    }

    pub fn framerate(&self) -> f64 {
        self.interp.framerate()
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn interpolator(&self) -> Interpolator {
        self.interp
    }

    // ---- read accessors ----

    pub fn key(&self, id: usize) -> Option<Key> {
        self.keys.get(id).copied()
    }

    pub fn key_time(&self, id: usize) -> Option<f64> {
        self.keys.get(id).map(|k| k.time)
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn num_keys(&self) -> usize {
        self.keys.len()
    }

    /// Control point by external index: 0 is the phantom start point, the
    /// last index the phantom end point, everything between the derived
    /// interior points.
    pub fn control_point(&self, id: usize) -> Option<DVec3> {
        let len = self.num_control_points();
        if id >= len {
            None
        } else if id == 0 {
            Some(self.start_point)
        } else if id == len - 1 {
            Some(self.end_point)
        } else {
            Some(self.control_points[id - 1])
        }
    }

    /// Interior control points plus the two phantom endpoints.
    pub fn num_control_points(&self) -> usize {
        self.control_points.len() + 2
    }

    pub fn control_points(&self) -> &[DVec3] {
        &self.control_points
    }

    pub fn cached_curve(&self) -> &[DVec3] {
        &self.cache
    }

    pub fn curve_point(&self, i: usize) -> Option<DVec3> {
        self.cache.get(i).copied()
    }

    /// Number of cached samples (the original API counted the dense samples
    /// under this name).
    pub fn num_curve_segments(&self) -> usize {
        self.cache.len()
    }

    /// Time of the last key, or 0 for an empty curve.
    pub fn duration(&self) -> f64 {
        self.keys.last().map_or(0.0, |k| k.time)
    }

    pub fn normalized_time(&self, t: f64) -> f64 {
        t / self.duration()
    }

    // ---- evaluation ----

    /// Evaluate the curve at an arbitrary time by blending adjacent cached
    /// samples. Empty curves return zero; times before the first key clamp
    /// to the first sample; with looping enabled the raw sample index wraps
    /// modulo the cache length, otherwise it clamps to the last sample.
    pub fn value_at(&self, t: f64) -> DVec3 {
        if self.cache.is_empty() || self.keys.is_empty() {
            return DVec3::ZERO;
        }
        let first = self.keys[0].time;
        if t < first {
            return self.cache[0];
        }
        let t = t - first;

        let dt = self.interp.delta_time();
        let raw = (t / dt) as usize;
        let frac = (t - raw as f64 * dt) / dt;

        let len = self.cache.len();
        let (i, inext) = if self.looping {
            (raw % len, (raw + 1) % len)
        } else {
            (raw.min(len - 1), (raw + 1).min(len - 1))
        };
        self.cache[i] * (1.0 - frac) + self.cache[inext] * frac
    }

    // ---- rebuild pipeline ----

    /// Re-derive phantom endpoints (unless an endpoint edit asked to keep
    /// them), control points, and the dense cache, in that order.
    fn rebuild(&mut self, update_endpoints: bool) {
        if update_endpoints && self.keys.len() >= 2 {
            let n = self.keys.len();
            self.start_point = phantom_point(self.keys[0].value, self.keys[1].value);
            self.end_point = phantom_point(self.keys[n - 1].value, self.keys[n - 2].value);
        }
        self.control_points =
            self.interp
                .compute_control_points(&self.keys, self.start_point, self.end_point);
        self.cache = build_cache(&self.interp, &self.keys, &self.control_points);
    }
}

/// Extrapolate a phantom boundary key along the tangent away from the
/// neighbor. Coincident boundary keys would yield a NaN direction, so a
/// near-zero tangent collapses the offset instead.
fn phantom_point(anchor: DVec3, neighbor: DVec3) -> DVec3 {
    let tangent = anchor - neighbor;
    if tangent.length() <= f64::EPSILON {
        log::warn!("degenerate boundary tangent (coincident keys); phantom point clamped to key");
        return anchor;
    }
    anchor + tangent * ENDPOINT_OFFSET
}
