//! Frame pacing

use std::time::{Duration, Instant};

/// Sleeps out the remainder of each fixed frame.
///
/// The simulation never reads the elapsed time; pacing only keeps the
/// loop from outrunning real time.
#[derive(Debug, Clone)]
pub struct Pacer {
    frame: Duration,
    deadline: Instant,
}

impl Pacer {
    /// `tick_rate` in Hz; anything below 1 Hz is treated as 1 Hz
    pub fn new(tick_rate: f32) -> Self {
        let frame = Duration::from_secs_f64(1.0 / f64::from(tick_rate.max(1.0)));
        Self {
            frame,
            deadline: Instant::now() + frame,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Block until the current frame is over. Returns how long it slept.
    pub fn wait(&mut self) -> Duration {
        let now = Instant::now();
        let slept = if now < self.deadline {
            let remaining = self.deadline - now;
            std::thread::sleep(remaining);
            remaining
        } else {
            Duration::ZERO
        };

        // Running late: start the next frame from now instead of trying to catch up
        self.deadline = if now > self.deadline + self.frame {
            log::trace!("Frame overran by {:?}", now - self.deadline);
            now + self.frame
        } else {
            self.deadline + self.frame
        };
        slept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        let pacer = Pacer::new(50.0);
        assert!((pacer.frame_duration().as_secs_f64() - 0.02).abs() < 1e-9);
        assert_eq!(Pacer::new(0.0).frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_wait_holds_frame_rate() {
        let mut pacer = Pacer::new(200.0);
        let start = Instant::now();
        for _ in 0..4 {
            pacer.wait();
        }
        // Four 5ms frames
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn test_late_frame_does_not_sleep() {
        let mut pacer = Pacer::new(1000.0);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(pacer.wait(), Duration::ZERO);
    }
}
