use std::time::Duration;

use rand::RngExt;

use crate::motion::pose::AvatarPose;
use crate::utils::Interval;

/// Lifecycle phase of an [`IdleMotion`].
#[derive(Debug, Clone)]
enum Phase {
    /// Not mounted yet. The pose stays at rest.
    Idle,
    /// Mounted, with a live repeating interval.
    Ticking(Interval),
    /// Unmounted. Terminal.
    TornDown,
}

/// Drives the avatar pose over time.
///
/// Each elapsed interval period replaces the whole pose with a freshly
/// sampled one. The interval exists only between [`mount`](Self::mount) and
/// [`unmount`](Self::unmount); once torn down the motion never ticks again.
#[derive(Debug)]
pub struct IdleMotion {
    period: Duration,
    phase: Phase,
    pose: AvatarPose,
    /// Bumped on every pose replacement, for change detection.
    pose_version: u64,
    tick_count: u64,
}

impl IdleMotion {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            phase: Phase::Idle,
            pose: AvatarPose::REST,
            pose_version: 0,
            tick_count: 0,
        }
    }

    /// Starts the repeating interval. Mounting twice, or after teardown,
    /// does nothing.
    pub fn mount(&mut self) {
        match self.phase {
            Phase::Idle => {
                let interval = Interval::new(self.period);
                log::info!("Idle motion mounted (period {:?})", interval.period());
                self.phase = Phase::Ticking(interval);
            }
            Phase::Ticking(_) => log::debug!("Idle motion already mounted"),
            Phase::TornDown => log::warn!("Idle motion cannot be remounted after teardown"),
        }
    }

    /// Advances time by `dt` and counts every tick that became due.
    ///
    /// Ticks that fall due in the same frame would overwrite each other, so
    /// only one pose is sampled for them. Returns `true` if the pose was
    /// replaced.
    pub fn update<R: RngExt + ?Sized>(&mut self, dt: Duration, rng: &mut R) -> bool {
        let Phase::Ticking(interval) = &mut self.phase else {
            return false;
        };

        let due = u64::from(interval.advance(dt));
        if due == 0 {
            return false;
        }
        self.pose = AvatarPose::sample(rng);
        self.pose_version += due;
        self.tick_count += due;
        if due == 1 {
            log::debug!("Idle motion tick #{}", self.tick_count);
        } else {
            log::debug!("Idle motion caught up {due} ticks (now #{})", self.tick_count);
        }
        true
    }

    /// Cancels the interval. No tick fires afterwards.
    pub fn unmount(&mut self) {
        if let Phase::Ticking(interval) = &mut self.phase {
            interval.cancel();
            log::info!("Idle motion unmounted after {} ticks", self.tick_count);
        }
        self.phase = Phase::TornDown;
    }

    #[inline]
    #[must_use]
    pub fn pose(&self) -> &AvatarPose {
        &self.pose
    }

    #[inline]
    #[must_use]
    pub fn pose_version(&self) -> u64 {
        self.pose_version
    }

    #[inline]
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[inline]
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        matches!(self.phase, Phase::Ticking(_))
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        matches!(self.phase, Phase::TornDown)
    }
}

impl Drop for IdleMotion {
    fn drop(&mut self) {
        if self.is_mounted() {
            self.unmount();
        }
    }
}
