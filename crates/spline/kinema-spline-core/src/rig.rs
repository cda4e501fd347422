//! Actor/skeleton seam: how evaluated curves reach a skeleton.
//!
//! The skeleton itself (hierarchy update, IK solvers) lives outside this
//! crate. This module fixes only the ownership model for the skeleton an
//! actor animates and the once-per-frame write path from sampled curves to
//! joint transforms.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec3;

use crate::spline::Spline;

/// Opaque joint handle resolved through [`Skeleton::joint_by_name`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct JointId(pub u32);

/// Write surface a skeleton exposes to the animation layer.
/// Global-transform propagation and the guide/foot IK adjustments run behind
/// this trait, outside the curve engine.
pub trait Skeleton {
    fn joint_by_name(&self, name: &str) -> Option<JointId>;
    fn root_translation(&self) -> DVec3;
    fn set_joint_translation(&mut self, joint: JointId, translation: DVec3);
    /// Euler angles in degrees, matching the Euler interpolation kinds.
    fn set_joint_rotation(&mut self, joint: JointId, euler_deg: DVec3);
}

/// Where an actor's skeleton comes from. An actor drops an owned skeleton
/// with itself but only releases its handle to an external one; the external
/// skeleton outlives the actor as long as any other handle does.
pub enum SkeletonSource<S> {
    Owned(S),
    External(Rc<RefCell<S>>),
}

impl<S> SkeletonSource<S> {
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        match self {
            SkeletonSource::Owned(s) => f(s),
            SkeletonSource::External(s) => f(&s.borrow()),
        }
    }

    pub fn with_mut<R>(&mut self, f: impl FnOnce(&mut S) -> R) -> R {
        match self {
            SkeletonSource::Owned(s) => f(s),
            SkeletonSource::External(s) => f(&mut s.borrow_mut()),
        }
    }
}

/// Translation and rotation curves driving one joint. The rotation spline is
/// expected to use an Euler kind so playback follows the shortest rotational
/// path.
pub struct JointChannels {
    pub joint: JointId,
    pub translation: Spline,
    pub rotation: Spline,
}

/// An animated character: a skeleton (owned or externally supplied) plus the
/// per-joint curve channels sampled each frame.
pub struct Actor<S: Skeleton> {
    skeleton: SkeletonSource<S>,
    channels: Vec<JointChannels>,
}

impl<S: Skeleton> Actor<S> {
    /// Create an actor with its own skeleton.
    pub fn new(skeleton: S) -> Self {
        Self {
            skeleton: SkeletonSource::Owned(skeleton),
            channels: Vec::new(),
        }
    }

    pub fn skeleton(&self) -> &SkeletonSource<S> {
        &self.skeleton
    }

    /// Point the actor at an externally supplied skeleton. The previous
    /// source is returned so an owned skeleton is never silently dropped.
    pub fn set_external_skeleton(&mut self, skeleton: Rc<RefCell<S>>) -> SkeletonSource<S> {
        std::mem::replace(&mut self.skeleton, SkeletonSource::External(skeleton))
    }

    /// Go back to an owned skeleton.
    pub fn set_owned_skeleton(&mut self, skeleton: S) -> SkeletonSource<S> {
        std::mem::replace(&mut self.skeleton, SkeletonSource::Owned(skeleton))
    }

    pub fn add_channels(&mut self, channels: JointChannels) {
        self.channels.push(channels);
    }

    pub fn channels(&self) -> &[JointChannels] {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut [JointChannels] {
        &mut self.channels
    }

    /// Sample every channel at `t` and write the pose through the skeleton.
    /// Curve evaluation never fails; empty channels write zero vectors, the
    /// documented degraded behavior of [`Spline::value_at`].
    pub fn apply_pose(&mut self, t: f64) {
        let Self { skeleton, channels } = self;
        for channel in channels.iter() {
            let translation = channel.translation.value_at(t);
            let rotation = channel.rotation.value_at(t);
            skeleton.with_mut(|s| {
                s.set_joint_translation(channel.joint, translation);
                s.set_joint_rotation(channel.joint, rotation);
            });
        }
    }
}
