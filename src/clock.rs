use instant::Instant;
use std::time::Duration;

/// Monotonic session time. Everything in the core is stamped with the
/// [`Duration`] since this clock started.
#[derive(Clone, Copy, Debug)]
pub struct SessionClock {
    origin: Instant,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
