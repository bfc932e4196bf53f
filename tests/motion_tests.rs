//! Idle Motion Tests
//!
//! Tests for:
//! - Sampler bounds for offsets and rotations
//! - Exact formulas for known unit draws
//! - Non-degenerate sampling
//! - Whole-pose replacement on every tick
//! - Mount / tick / unmount lifecycle under fake time

use std::time::Duration;

use glam::Vec3;
use myth_avatar::motion::sampler::{
    OFFSET_XY_AMPLITUDE, OFFSET_Z_AMPLITUDE, offset_from_units, rotation_from_units,
};
use myth_avatar::motion::{
    AvatarPose, IdleMotion, Limb, LimbSample, sample_limb, sample_offset, sample_rotation,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// ============================================================================
// Sampler: Bounds
// ============================================================================

#[test]
fn offset_samples_within_bounds() {
    let mut rng = seeded(7);
    for _ in 0..10_000 {
        let o = sample_offset(&mut rng);
        assert!(o.x.abs() <= 0.2, "x out of range: {}", o.x);
        assert!(o.y.abs() <= 0.2, "y out of range: {}", o.y);
        assert!(o.z.abs() <= 0.1, "z out of range: {}", o.z);
    }
}

#[test]
fn rotation_samples_within_bounds() {
    let mut rng = seeded(11);
    for _ in 0..10_000 {
        let r = sample_rotation(&mut rng);
        assert!((-5.0..=5.0).contains(&r.x), "x out of range: {}", r.x);
        assert!((-5.0..=5.0).contains(&r.y), "y out of range: {}", r.y);
        assert!((-2.0..=3.0).contains(&r.z), "z out of range: {}", r.z);
    }
}

#[test]
fn offset_xy_never_negative() {
    // sin over [0, pi) is non-negative
    let mut rng = seeded(3);
    for _ in 0..1_000 {
        let o = sample_offset(&mut rng);
        assert!(o.x >= 0.0 && o.y >= 0.0);
    }
}

// ============================================================================
// Sampler: Formulas
// ============================================================================

#[test]
fn offset_formula_at_known_draws() {
    assert!(vec3_approx(
        offset_from_units([0.0, 0.0, 0.0]),
        Vec3::new(0.0, 0.0, OFFSET_Z_AMPLITUDE)
    ));
    assert!(vec3_approx(
        offset_from_units([0.5, 0.5, 0.5]),
        Vec3::new(OFFSET_XY_AMPLITUDE, OFFSET_XY_AMPLITUDE, 0.0)
    ));
}

#[test]
fn rotation_formula_at_known_draws() {
    assert!(vec3_approx(
        rotation_from_units([0.0, 0.0, 0.0]),
        Vec3::new(-5.0, -5.0, -2.0)
    ));
    assert!(vec3_approx(
        rotation_from_units([0.5, 0.5, 0.5]),
        Vec3::new(0.0, 0.0, 0.5)
    ));
    assert!(vec3_approx(
        rotation_from_units([0.9, 0.1, 0.8]),
        Vec3::new(4.0, -4.0, 2.0)
    ));
}

#[test]
fn limb_sample_rotation_radians() {
    let sample = LimbSample {
        position: Vec3::ZERO,
        rotation: Vec3::new(180.0, -90.0, 0.0),
    };
    assert!(vec3_approx(
        sample.rotation_radians(),
        Vec3::new(std::f32::consts::PI, -std::f32::consts::FRAC_PI_2, 0.0)
    ));
}

// ============================================================================
// Sampler: Randomness
// ============================================================================

#[test]
fn successive_samples_differ() {
    let mut rng = seeded(42);
    let a = sample_limb(&mut rng);
    let b = sample_limb(&mut rng);
    assert_ne!(a, b);
}

#[test]
fn same_seed_same_samples() {
    let a = AvatarPose::sample(&mut seeded(5));
    let b = AvatarPose::sample(&mut seeded(5));
    assert_eq!(a, b);
}

#[test]
fn limbs_sampled_independently() {
    let pose = AvatarPose::sample(&mut seeded(9));
    let samples: Vec<_> = pose.iter().map(|(_, s)| *s).collect();
    for i in 0..samples.len() {
        for j in (i + 1)..samples.len() {
            assert_ne!(samples[i], samples[j], "limbs {i} and {j} share a sample");
        }
    }
}

// ============================================================================
// Pose
// ============================================================================

#[test]
fn rest_pose_is_all_zero() {
    let pose = AvatarPose::REST;
    assert!(pose.is_rest());
    for limb in Limb::ALL {
        assert_eq!(*pose.get(limb), LimbSample::ZERO);
    }
    assert_eq!(AvatarPose::default(), AvatarPose::REST);
}

#[test]
fn limb_node_names() {
    let names: Vec<_> = Limb::ALL.iter().map(|l| l.node_name()).collect();
    assert_eq!(names, ["LeftHand", "RightHand", "LeftArm", "RightArm"]);
}

#[test]
fn pose_iter_follows_limb_order() {
    let pose = AvatarPose::sample(&mut seeded(1));
    let limbs: Vec<_> = pose.iter().map(|(l, _)| l).collect();
    assert_eq!(limbs, Limb::ALL);
    for (limb, sample) in pose.iter() {
        assert_eq!(pose.get(limb), sample);
    }
}

// ============================================================================
// IdleMotion Lifecycle
// ============================================================================

#[test]
fn tick_replaces_every_limb() {
    let mut rng = seeded(21);
    let mut motion = IdleMotion::new(Duration::from_secs(1));
    motion.mount();

    assert!(motion.update(Duration::from_secs(1), &mut rng));
    let first = *motion.pose();
    assert!(!first.is_rest());

    assert!(motion.update(Duration::from_secs(1), &mut rng));
    let second = *motion.pose();
    for limb in Limb::ALL {
        assert_ne!(first.get(limb), second.get(limb), "{limb:?} kept a stale sample");
    }
}

#[test]
fn no_tick_before_period_elapses() {
    let mut rng = seeded(22);
    let mut motion = IdleMotion::new(Duration::from_secs(1));
    motion.mount();

    assert!(!motion.update(Duration::from_millis(999), &mut rng));
    assert!(motion.pose().is_rest());
    assert!(motion.update(Duration::from_millis(1), &mut rng));
    assert_eq!(motion.tick_count(), 1);
}

#[test]
fn pose_version_tracks_ticks() {
    let mut rng = seeded(23);
    let mut motion = IdleMotion::new(Duration::from_secs(1));
    motion.mount();
    assert_eq!(motion.pose_version(), 0);

    motion.update(Duration::from_millis(2500), &mut rng);
    assert_eq!(motion.pose_version(), 2);
    assert_eq!(motion.tick_count(), 2);
}

#[test]
fn mount_five_seconds_unmount_five_seconds() {
    let mut rng = seeded(24);
    let mut motion = IdleMotion::new(Duration::from_secs(1));
    motion.mount();
    assert!(motion.is_mounted());

    // 60 fps for five seconds
    let frame = Duration::from_secs(1) / 60;
    for _ in 0..300 {
        motion.update(frame, &mut rng);
    }
    // 300 frames of 1/60 s may fall a hair short of 5 s after rounding
    motion.update(Duration::from_millis(1), &mut rng);
    assert_eq!(motion.tick_count(), 5);

    motion.unmount();
    assert!(motion.is_torn_down());

    let pose_at_teardown = *motion.pose();
    let version_at_teardown = motion.pose_version();

    for _ in 0..300 {
        assert!(!motion.update(frame, &mut rng));
    }

    assert_eq!(*motion.pose(), pose_at_teardown);
    assert_eq!(motion.pose_version(), version_at_teardown);
    assert_eq!(motion.tick_count(), 5);
}

#[test]
fn double_mount_keeps_single_interval() {
    let mut rng = seeded(25);
    let mut motion = IdleMotion::new(Duration::from_secs(1));
    motion.mount();
    motion.update(Duration::from_millis(600), &mut rng);
    motion.mount();
    motion.update(Duration::from_millis(600), &mut rng);

    // The partial period survived the second mount call
    assert_eq!(motion.tick_count(), 1);
}

#[test]
fn configured_period_is_respected() {
    let mut rng = seeded(26);
    let mut motion = IdleMotion::new(Duration::from_millis(250));
    motion.mount();
    motion.update(Duration::from_secs(1), &mut rng);
    assert_eq!(motion.tick_count(), 4);
    assert_eq!(motion.period(), Duration::from_millis(250));
}

#[test]
fn stalled_frame_samples_one_pose_for_all_due_ticks() {
    let mut rng = seeded(31);
    let mut expected_rng = seeded(31);
    let mut motion = IdleMotion::new(Duration::from_millis(1));
    motion.mount();

    assert!(motion.update(Duration::from_secs(3600), &mut rng));

    assert_eq!(motion.tick_count(), 3_600_000);
    assert_eq!(motion.pose_version(), 3_600_000);
    assert_eq!(*motion.pose(), AvatarPose::sample(&mut expected_rng));
}
