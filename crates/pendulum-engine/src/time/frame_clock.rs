use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock was started. Never reset, never clamped.
    pub elapsed: f32,
}

/// Monotonic clock sampled once per frame.
///
/// The elapsed counter is not clamped or smoothed: animation angles are pure
/// functions of it and must track wall-clock time, even across stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    /// Creates a clock started now.
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    /// Samples the clock.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        FrameTime {
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
