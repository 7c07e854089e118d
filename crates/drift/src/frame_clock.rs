//! Fixed-rate frame pacing for the event loop.

use std::time::{Duration, Instant};

/// Decides when the next animation frame is due.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    next: Instant,
}

impl FrameClock {
    /// A clock ticking `fps` times per second, first frame due at `now`.
    pub fn new(fps: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            next: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Consume a due frame. Returns false if the next frame is not due yet.
    ///
    /// Frames missed while the loop was busy are dropped rather than replayed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }

    /// How long the event loop may wait before the next frame is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_due_immediately() {
        let start = Instant::now();
        let mut clock = FrameClock::new(60, start);
        assert_eq!(clock.timeout(start), Duration::ZERO);
        assert!(clock.tick(start));
        assert!(!clock.tick(start));
    }

    #[test]
    fn test_ticks_at_interval() {
        let start = Instant::now();
        let mut clock = FrameClock::new(10, start);
        assert_eq!(clock.interval(), Duration::from_millis(100));
        assert!(clock.tick(start));
        assert!(!clock.tick(start + Duration::from_millis(50)));
        assert_eq!(
            clock.timeout(start + Duration::from_millis(50)),
            Duration::from_millis(50)
        );
        assert!(clock.tick(start + Duration::from_millis(100)));
    }

    #[test]
    fn test_missed_frames_are_dropped() {
        let start = Instant::now();
        let mut clock = FrameClock::new(10, start);
        assert!(clock.tick(start));
        let late = start + Duration::from_secs(2);
        assert!(clock.tick(late));
        assert!(!clock.tick(late));
        assert_eq!(clock.timeout(late), Duration::from_millis(100));
    }

    #[test]
    fn test_zero_fps_does_not_divide_by_zero() {
        let clock = FrameClock::new(0, Instant::now());
        assert_eq!(clock.interval(), Duration::from_secs(1));
    }
}
