//! Session countdown.

/// What a timer tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Timer is not running
    Idle,
    Running,
    /// Reached zero on this tick
    Expired,
}

/// Countdown of the remaining stage time, clamped at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SessionTimer {
    remaining: f32,
    active: bool,
}

impl SessionTimer {
    pub fn start(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Count down by `delta` seconds.
    pub fn tick(&mut self, delta: f32) -> TimerTick {
        if !self.active {
            return TimerTick::Idle;
        }

        self.remaining = (self.remaining - delta.max(0.0)).max(0.0);
        if self.remaining <= 0.0 {
            self.active = false;
            return TimerTick::Expired;
        }
        TimerTick::Running
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_clamps_at_zero() {
        let mut timer = SessionTimer::default();
        timer.start(1.0);

        assert_eq!(timer.tick(0.4), TimerTick::Running);
        assert!((timer.remaining() - 0.6).abs() < 1e-6);
        assert_eq!(timer.tick(5.0), TimerTick::Expired);
        assert_eq!(timer.remaining(), 0.0);
    }

    #[test]
    fn expiry_is_reported_once() {
        let mut timer = SessionTimer::default();
        timer.start(0.5);

        assert_eq!(timer.tick(1.0), TimerTick::Expired);
        assert_eq!(timer.tick(1.0), TimerTick::Idle);
        assert_eq!(timer.tick(1.0), TimerTick::Idle);
        assert_eq!(timer.remaining(), 0.0);
    }

    #[test]
    fn remaining_never_increases_while_running() {
        let mut timer = SessionTimer::default();
        timer.start(3.0);

        let mut previous = timer.remaining();
        for delta in [0.1, 0.0, 0.7, -0.2, 0.5] {
            timer.tick(delta);
            assert!(timer.remaining() <= previous);
            previous = timer.remaining();
        }
    }

    #[test]
    fn stopped_timer_does_not_move() {
        let mut timer = SessionTimer::default();
        timer.start(2.0);
        timer.stop();

        assert_eq!(timer.tick(1.0), TimerTick::Idle);
        assert_eq!(timer.remaining(), 2.0);
    }
}
