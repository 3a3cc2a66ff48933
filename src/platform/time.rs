//! Monotonic time source for the frame loop

use std::time::{Duration, Instant};

/// Clock the scheduler samples and sleeps on
pub trait FrameClock {
    /// Monotonic seconds since an arbitrary origin
    fn now(&self) -> f64;

    /// Block for roughly `duration`; may overshoot
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock backed implementation
#[derive(Debug, Clone)]
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

impl FrameClock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
