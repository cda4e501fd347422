//! Kinema spline core (engine-agnostic).
//!
//! Evaluates keyframed 3D curves that drive joint motion in a skeletal
//! animation pipeline. A [`Spline`] owns an ordered key store, derives the
//! auxiliary control geometry its interpolation kind needs, caches dense
//! fixed-rate samples, and answers per-frame value lookups with pre-range
//! clamping or looping wrap. Eight interpolation kinds share one evaluation
//! contract (see [`interp`]).

pub mod cache;
pub mod data;
pub mod error;
pub mod interp;
pub mod rig;
pub mod spline;

// Re-exports for consumers (engine adapters, authoring tools)
pub use cache::build_cache;
pub use data::{parse_curve_json, CurveData, Key};
pub use error::{CurveDataError, SplineError};
pub use interp::{InterpolationKind, Interpolator, DEFAULT_FRAMERATE};
pub use rig::{Actor, JointChannels, JointId, Skeleton, SkeletonSource};
pub use spline::Spline;
