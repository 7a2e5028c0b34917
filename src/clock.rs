use std::time::{Duration, Instant};

/// Caps the loop at a target frame rate by sleeping off whatever is left of
/// each frame. Slow frames are not made up for.
pub struct FrameClock {
    frame: Duration,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            last_tick: Instant::now(),
        }
    }

    /// Blocks until a full frame has passed since the previous tick and
    /// returns how long the frame actually took.
    pub fn tick(&mut self) -> Duration {
        let remaining = remaining_in_frame(self.frame, self.last_tick.elapsed());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_tick);
        self.last_tick = now;
        frame_time
    }
}

/// Sleep needed to stretch `elapsed` to a whole frame
pub fn remaining_in_frame(frame: Duration, elapsed: Duration) -> Duration {
    frame.saturating_sub(elapsed)
}
