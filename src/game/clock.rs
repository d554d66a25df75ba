// Fixed-rate frame pacing

use std::time::{Duration, Instant};

/// Sleeps away whatever is left of each frame's time budget
pub struct FrameClock {
    frame_budget: Duration,
    frame_start: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        FrameClock {
            frame_budget: Self::budget_for(fps),
            frame_start: Instant::now(),
        }
    }

    fn budget_for(fps: u32) -> Duration {
        Duration::new(0, 1_000_000_000u32 / fps.max(1))
    }

    #[cfg(test)]
    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Call once per frame after presenting
    pub fn tick(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if let Some(remaining) = self.frame_budget.checked_sub(elapsed) {
            std::thread::sleep(remaining);
        }
        self.frame_start = Instant::now();
    }
}
