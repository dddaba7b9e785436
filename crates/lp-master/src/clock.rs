use std::time::{Duration, Instant};

use lp_engine::Clock;

/// Wall clock backed by `Instant`; sleeps the calling thread.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_micros(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }

    fn sleep_micros(&mut self, micros: u64) {
        std::thread::sleep(Duration::from_micros(micros));
    }
}
