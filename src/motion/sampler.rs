//! Idle-motion sampler.
//!
//! Produces bounded random offsets and rotations for one limb segment. The
//! random source is always injected, so callers decide between a thread RNG
//! and a seeded one.
//!
//! Offsets warp a uniform draw through `sin`/`cos`, which piles samples up
//! near the extremes of the range rather than spreading them flat. Only the
//! bounds are contractual; the shape is purely visual.

use std::f32::consts::PI;

use glam::Vec3;
use rand::RngExt;

/// Largest absolute offset on X and Y.
pub const OFFSET_XY_AMPLITUDE: f32 = 0.2;
/// Largest absolute offset on Z.
pub const OFFSET_Z_AMPLITUDE: f32 = 0.1;

/// Rotation range in degrees for the X and Y axes (`[min, max)`).
pub const ROTATION_XY_RANGE_DEG: (f32, f32) = (-5.0, 5.0);
/// Rotation range in degrees for the Z axis (`[min, max)`).
pub const ROTATION_Z_RANGE_DEG: (f32, f32) = (-2.0, 3.0);

/// Transient motion state of one limb segment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LimbSample {
    /// Local position offset.
    pub position: Vec3,
    /// Local Euler rotation (XYZ) in **degrees**.
    pub rotation: Vec3,
}

impl LimbSample {
    pub const ZERO: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
    };

    /// Rotation converted to radians, ready for a transform.
    #[must_use]
    pub fn rotation_radians(&self) -> Vec3 {
        Vec3::new(
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        )
    }
}

/// Offset for three unit draws in `[0, 1)`.
#[must_use]
pub fn offset_from_units(u: [f32; 3]) -> Vec3 {
    Vec3::new(
        (u[0] * PI).sin() * OFFSET_XY_AMPLITUDE,
        (u[1] * PI).sin() * OFFSET_XY_AMPLITUDE,
        (u[2] * PI).cos() * OFFSET_Z_AMPLITUDE,
    )
}

/// Rotation in degrees for three unit draws in `[0, 1)`.
#[must_use]
pub fn rotation_from_units(u: [f32; 3]) -> Vec3 {
    let scale = |u: f32, (min, max): (f32, f32)| u * (max - min) + min;
    Vec3::new(
        scale(u[0], ROTATION_XY_RANGE_DEG),
        scale(u[1], ROTATION_XY_RANGE_DEG),
        scale(u[2], ROTATION_Z_RANGE_DEG),
    )
}

fn unit_draws<R: RngExt + ?Sized>(rng: &mut R) -> [f32; 3] {
    [rng.random::<f32>(), rng.random::<f32>(), rng.random::<f32>()]
}

/// Draws a fresh bounded offset.
pub fn sample_offset<R: RngExt + ?Sized>(rng: &mut R) -> Vec3 {
    offset_from_units(unit_draws(rng))
}

/// Draws a fresh bounded rotation in degrees.
pub fn sample_rotation<R: RngExt + ?Sized>(rng: &mut R) -> Vec3 {
    rotation_from_units(unit_draws(rng))
}

/// Draws an offset, then an independent rotation.
pub fn sample_limb<R: RngExt + ?Sized>(rng: &mut R) -> LimbSample {
    let position = sample_offset(rng);
    let rotation = sample_rotation(rng);
    LimbSample { position, rotation }
}
