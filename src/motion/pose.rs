use rand::RngExt;

use crate::motion::sampler::{self, LimbSample};

/// One of the four animated limb segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limb {
    LeftHand,
    RightHand,
    LeftArm,
    RightArm,
}

impl Limb {
    /// All limbs, in pose storage order.
    pub const ALL: [Limb; 4] = [Limb::LeftHand, Limb::RightHand, Limb::LeftArm, Limb::RightArm];

    /// Name of the model node driven by this limb.
    #[must_use]
    pub const fn node_name(self) -> &'static str {
        match self {
            Limb::LeftHand => "LeftHand",
            Limb::RightHand => "RightHand",
            Limb::LeftArm => "LeftArm",
            Limb::RightArm => "RightArm",
        }
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// Snapshot of every limb sample at one point in time.
///
/// A pose is never edited in place by the motion driver: each tick builds a
/// new one with [`AvatarPose::sample`] and swaps it in whole.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AvatarPose {
    samples: [LimbSample; 4],
}

impl AvatarPose {
    /// The rest pose: every limb at zero offset and zero rotation.
    pub const REST: Self = Self {
        samples: [LimbSample::ZERO; 4],
    };

    /// Samples all four limbs independently, in [`Limb::ALL`] order.
    pub fn sample<R: RngExt + ?Sized>(rng: &mut R) -> Self {
        let mut samples = [LimbSample::ZERO; 4];
        for limb in Limb::ALL {
            samples[limb.index()] = sampler::sample_limb(rng);
        }
        Self { samples }
    }

    #[must_use]
    pub fn from_samples(samples: [LimbSample; 4]) -> Self {
        Self { samples }
    }

    #[must_use]
    pub fn get(&self, limb: Limb) -> &LimbSample {
        &self.samples[limb.index()]
    }

    /// Iterates `(limb, sample)` pairs in [`Limb::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Limb, &LimbSample)> {
        Limb::ALL.into_iter().zip(self.samples.iter())
    }

    #[must_use]
    pub fn is_rest(&self) -> bool {
        *self == Self::REST
    }
}
