//! Real-time sequences and control of the global time scale.
//!
//! Slow motion and the result-screen ramp both write the relative speed of
//! `Time<Virtual>`, so they are measured against `Time<Real>`. A new slow
//! motion window replaces the one in flight instead of stacking.

use bevy::prelude::*;

/// A timed step driven by the frame loop.
///
/// Ticked once per frame with a real-time delta; the owner reacts when it
/// reports `finished`. Replacing the value cancels the previous sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealTimeSequence {
    pub elapsed: f32,
    pub duration: f32,
}

impl RealTimeSequence {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Advance by `delta` seconds. Returns true on the tick that finishes it.
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.finished() {
            return false;
        }
        self.elapsed = (self.elapsed + delta).min(self.duration);
        self.finished()
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Progress from 0.0 to 1.0.
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

/// Brief slow-motion window triggered by landed hits.
#[derive(Resource, Debug, Default)]
pub struct SlowMotion {
    window: Option<RealTimeSequence>,
    scale: f32,
}

impl SlowMotion {
    /// Start a window, cancelling any window still running.
    pub fn start(&mut self, scale: f32, duration: f32) {
        self.scale = scale.clamp(0.0, 1.0);
        self.window = Some(RealTimeSequence::new(duration));
    }

    pub fn cancel(&mut self) {
        self.window = None;
    }

    pub fn is_active(&self) -> bool {
        self.window.is_some()
    }

    /// Speed the virtual clock should run at right now.
    pub fn current_speed(&self) -> f32 {
        if self.window.is_some() {
            self.scale
        } else {
            1.0
        }
    }

    /// Advance in real time. Returns true when the window just ended.
    pub fn tick(&mut self, real_delta: f32) -> bool {
        let Some(window) = self.window.as_mut() else {
            return false;
        };
        if window.tick(real_delta) {
            self.window = None;
            return true;
        }
        false
    }
}

/// Linear real-time ramp of the clock speed back to normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScaleRamp {
    pub from: f32,
    pub sequence: RealTimeSequence,
}

impl TimeScaleRamp {
    pub fn new(from: f32, duration: f32) -> Self {
        Self {
            from,
            sequence: RealTimeSequence::new(duration),
        }
    }

    /// Advance and return the speed to apply this frame.
    pub fn tick(&mut self, real_delta: f32) -> f32 {
        self.sequence.tick(real_delta);
        self.speed()
    }

    pub fn speed(&self) -> f32 {
        self.from + (1.0 - self.from) * self.sequence.fraction()
    }

    pub fn finished(&self) -> bool {
        self.sequence.finished()
    }
}

/// Tick the slow-motion window and push its speed to the virtual clock.
pub fn update_slow_motion(
    real_time: Res<Time<Real>>,
    mut slow_motion: ResMut<SlowMotion>,
    mut virtual_time: ResMut<Time<Virtual>>,
) {
    if !slow_motion.is_active() {
        return;
    }

    if slow_motion.tick(real_time.delta_secs()) {
        debug!("Slow motion finished");
    }
    virtual_time.set_relative_speed(slow_motion.current_speed());
}

/// Put the clock back to normal speed, dropping any slow motion in flight.
pub fn reset_time_scale(
    mut slow_motion: ResMut<SlowMotion>,
    mut virtual_time: ResMut<Time<Virtual>>,
) {
    slow_motion.cancel();
    virtual_time.set_relative_speed(1.0);
}
