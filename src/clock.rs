use std::{cell::Cell, rc::Rc, time::{Duration, Instant}};

/// A monotonic time source. Windows measure their `duration` and pace their frames with one.
pub trait Clock {
    /// Time since an arbitrary, fixed epoch.
    fn now(&self) -> Duration;
    fn sleep(&self, duration: Duration);
}

pub struct SystemClock {
    epoch: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        return Self { epoch: Instant::now() };
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        return self.epoch.elapsed();
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A clock that only moves when told to. Sleeping advances it instantly.
///
/// Clones share the same time, so a test can keep one handle and give another to a window.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        return Self::default();
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        return self.now.get();
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

/// Caps a loop at a frame rate by sleeping away what's left of each frame period.
///
/// No catching up: a late frame just starts the next period late.
pub struct FrameLimiter {
    clock: Rc<dyn Clock>,
    last: Option<Duration>,
}

impl FrameLimiter {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        return Self { clock, last: None };
    }

    /// Call once per frame. `fps == 0` means uncapped.
    pub fn wait(&mut self, fps: u32) {
        if fps > 0 {
            if let Some(last) = self.last {
                let period = Duration::from_secs_f64(1.0 / fps as f64);
                let elapsed = self.clock.now().saturating_sub(last);
                if elapsed < period {
                    self.clock.sleep(period - elapsed);
                }
            }
        }
        self.last = Some(self.clock.now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limiter_pads_short_frames() {
        let clock = ManualClock::new();
        let mut limiter = FrameLimiter::new(Rc::new(clock.clone()));

        let period = Duration::from_secs_f64(1.0 / 10.0);

        limiter.wait(10);
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_millis(30));
        limiter.wait(10);
        assert_eq!(clock.now(), period);

        // a slow frame isn't padded
        clock.advance(Duration::from_millis(250));
        limiter.wait(10);
        assert_eq!(clock.now(), period + Duration::from_millis(250));
    }

    #[test]
    fn test_limiter_uncapped() {
        let clock = ManualClock::new();
        let mut limiter = FrameLimiter::new(Rc::new(clock.clone()));
        limiter.wait(0);
        limiter.wait(0);
        assert_eq!(clock.now(), Duration::ZERO);
    }
}
