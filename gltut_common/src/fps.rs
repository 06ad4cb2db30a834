use std::time::{Duration, Instant};

/// Frames are averaged over windows at least this long before a new reading is produced.
pub const FPS_INTERVAL: Duration = Duration::from_millis(250);

/// Counts rendered frames and turns them into a frames-per-second reading a few times a second.
///
/// The clock is passed in by the caller, so the render loop feeds it `Instant::now()` and the tests
/// feed it whatever they like.
pub struct FpsCounter {
    previous: Instant,
    frame_count: u32,
    interval: Duration,
}

impl FpsCounter {
    pub fn new(start: Instant) -> Self {
        Self::with_interval(start, FPS_INTERVAL)
    }

    pub fn with_interval(start: Instant, interval: Duration) -> Self {
        Self {
            previous: start,
            frame_count: 0,
            interval,
        }
    }

    pub fn frame_count(&self) -> u32 { self.frame_count }

    /// Registers one frame at `now`. Returns a reading when more than the interval has passed since
    /// the last one; the frame being registered counts towards the *next* reading.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        let elapsed = now.saturating_duration_since(self.previous);
        let mut reading = None;

        if elapsed > self.interval {
            reading = Some(self.frame_count as f64 / elapsed.as_secs_f64());
            self.previous = now;
            self.frame_count = 0;
        }

        self.frame_count += 1;
        reading
    }
}

/// The window title used to display a reading.
pub fn fps_title(fps: f64) -> String {
    format!("opengl @ fps: {:.2}", fps)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn no_reading_before_the_interval_passes() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);

        for ms in 0..=250 {
            assert_eq!(counter.tick(start + Duration::from_millis(ms)), None);
        }

        assert_eq!(counter.frame_count(), 251);
    }

    #[test]
    fn reading_is_frames_over_elapsed_seconds() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);

        for i in 0..10 {
            counter.tick(start + Duration::from_millis(i * 10));
        }

        let fps = counter.tick(start + Duration::from_millis(500)).unwrap();
        assert!((fps - 20.0).abs() < 1e-9);

        // The frame that produced the reading starts the next window
        assert_eq!(counter.frame_count(), 1);
        assert_eq!(counter.tick(start + Duration::from_millis(600)), None);
    }

    #[test]
    fn title_has_two_decimals() {
        assert_eq!(fps_title(59.8765), "opengl @ fps: 59.88");
        assert_eq!(fps_title(0.0), "opengl @ fps: 0.00");
    }
}
