use std::time::{Duration, Instant};

/// Wall-clock frame clock. Each [`tick`](Self::tick) closes one frame.
pub struct Timer {
    started: Instant,
    last_tick: Instant,
    /// Length of the frame closed by the last tick.
    pub delta: Duration,
    /// Time from creation to the last tick.
    pub elapsed: Duration,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_tick: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_tick;
        self.elapsed = now - self.started;
        self.last_tick = now;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

/// Fixed-cadence repeating interval driven by frame deltas.
///
/// The interval never reads the wall clock itself: callers feed it elapsed
/// time through [`advance`](Self::advance), which makes it deterministic
/// under a fake clock. Once [`cancel`](Self::cancel)led it never fires again.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    accumulated: Duration,
    fired: u64,
    active: bool,
}

impl Interval {
    /// Creates an active interval. A zero period is clamped to one
    /// millisecond so `advance` always terminates.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            accumulated: Duration::ZERO,
            fired: 0,
            active: true,
        }
    }

    /// Adds `dt` and returns how many whole periods elapsed. Leftover time
    /// carries over to the next call.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.active {
            return 0;
        }
        self.accumulated += dt;

        let whole = self.accumulated.as_nanos() / self.period.as_nanos();
        let due = u32::try_from(whole).unwrap_or(u32::MAX);
        self.accumulated -= self.period * due;
        self.fired += u64::from(due);
        due
    }

    /// Stops the interval permanently and drops any pending partial period.
    pub fn cancel(&mut self) {
        self.active = false;
        self.accumulated = Duration::ZERO;
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Total number of periods that have elapsed while active.
    #[inline]
    #[must_use]
    pub fn fired(&self) -> u64 {
        self.fired
    }
}
