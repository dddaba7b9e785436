//! Wall-clock sources.

/// Monotonic microsecond clock with a blocking delay.
pub trait Clock {
    /// Current time in microseconds. Must never rewind.
    fn now_micros(&self) -> u64;

    /// Block the calling context for `micros` microseconds.
    fn sleep_micros(&mut self, micros: u64);
}

/// Virtual clock: time only moves when told to.
///
/// `sleep_micros` advances the clock instead of blocking, which makes
/// synchronous clicks run instantly in tests and offline hosts.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: u64,
    slept: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&mut self, micros: u64) {
        self.now += micros;
    }

    /// Jump to an absolute time. Allows rewinding, to simulate a faulty source.
    pub fn set(&mut self, micros: u64) {
        self.now = micros;
    }

    /// Total time spent inside `sleep_micros`.
    pub fn slept(&self) -> u64 {
        self.slept
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> u64 {
        self.now
    }

    fn sleep_micros(&mut self, micros: u64) {
        self.now += micros;
        self.slept += micros;
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now_micros(&self) -> u64 {
        (**self).now_micros()
    }

    fn sleep_micros(&mut self, micros: u64) {
        (**self).sleep_micros(micros)
    }
}
