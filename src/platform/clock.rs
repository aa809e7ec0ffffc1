//! Monotonic frame clock with a fixed frame-rate throttle

use std::time::{Duration, Instant};

/// Sleeps away the remainder of each frame's budget
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Block until `1 / target_fps` has elapsed since the previous tick.
    /// Returns the time the frame actually took, sleep included.
    pub fn tick(&mut self, target_fps: u32) -> Duration {
        let budget = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        let spent = self.last.elapsed();
        if spent < budget {
            std::thread::sleep(budget - spent);
        }
        let now = Instant::now();
        let frame = now - self.last;
        self.last = now;
        frame
    }

    /// Restart the frame budget (after an external blocking sleep)
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_throttles_to_budget() {
        let mut clock = FrameClock::new();
        let frame = clock.tick(200);
        assert!(frame >= Duration::from_millis(5));
    }
}
