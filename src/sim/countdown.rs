/// A pausable one-shot timer driven by explicit elapsed time.
///
/// Pausing freezes `remaining` exactly; nothing is lost or gained across a
/// pause/resume pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    remaining: f64,
    armed_for: f64,
    paused: bool,
}

impl Countdown {
    pub fn new(ms: f64) -> Self {
        Self {
            remaining: ms.max(0.0),
            armed_for: ms.max(0.0),
            paused: false,
        }
    }

    #[inline]
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Time consumed since the last (re)arm.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.armed_for - self.remaining
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Consume `dt` ms. Returns `true` when the timer reaches zero.
    pub fn elapse(&mut self, dt: f64) -> bool {
        if self.paused {
            return false;
        }
        self.remaining -= dt.max(0.0);
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            true
        } else {
            false
        }
    }

    pub fn rearm(&mut self, ms: f64) {
        self.remaining = ms.max(0.0);
        self.armed_for = self.remaining;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_time_runs_out() {
        let mut c = Countdown::new(100.0);
        assert!(!c.elapse(60.0));
        assert_eq!(c.remaining(), 40.0);
        assert!(c.elapse(40.0));
        assert_eq!(c.remaining(), 0.0);
    }

    #[test]
    fn pause_keeps_remaining_exact() {
        let mut c = Countdown::new(6000.0);
        c.elapse(2500.0);
        c.pause();
        assert!(!c.elapse(10_000.0));
        assert_eq!(c.remaining(), 3500.0);
        assert_eq!(c.elapsed(), 2500.0);
        c.resume();
        assert!(!c.elapse(3499.0));
        assert!(c.elapse(1.0));
    }

    #[test]
    fn rearm_resets_elapsed() {
        let mut c = Countdown::new(10.0);
        c.elapse(10.0);
        c.rearm(25.0);
        assert_eq!(c.remaining(), 25.0);
        assert_eq!(c.elapsed(), 0.0);
    }
}
