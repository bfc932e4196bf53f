//! Idle Motion
//!
//! - [`sampler`]: bounded random offsets/rotations for one limb
//! - [`AvatarPose`]: snapshot of all four limb samples
//! - [`IdleMotion`]: mount-scoped interval that replaces the pose each tick
//! - [`binder`]: projects a pose onto named nodes of a model graph

pub mod binder;
pub mod idle;
pub mod pose;
pub mod sampler;

pub use binder::{BindReport, SceneGraph, bind, place_root};
pub use idle::IdleMotion;
pub use pose::{AvatarPose, Limb};
pub use sampler::{LimbSample, sample_limb, sample_offset, sample_rotation};
