//! Result-screen sequencing after a session ends.
//!
//! The clock is ramped back to normal speed in real time, then the result
//! screen waits a short real-time delay before appearing.

use bevy::prelude::*;

use super::coordinator::SessionOutcome;
use crate::core::{RealTimeSequence, TimeScaleRamp};

/// One step of the presentation sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresentationStep {
    Idle,
    /// Clock speed to apply this frame
    Ramping(f32),
    Waiting,
    /// The result screen should be shown now
    Present(SessionOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Phase {
    #[default]
    Idle,
    Ramping {
        ramp: TimeScaleRamp,
        delay: f32,
    },
    Waiting(RealTimeSequence),
    Presented,
}

/// Pending result screen for the session that just ended.
#[derive(Resource, Debug, Default)]
pub struct ResultPresentation {
    phase: Phase,
    outcome: Option<SessionOutcome>,
}

impl ResultPresentation {
    /// Start presenting `outcome`, ramping from the current clock speed.
    pub fn start(&mut self, outcome: SessionOutcome, from_speed: f32, ramp: f32, delay: f32) {
        self.outcome = Some(outcome);
        self.phase = Phase::Ramping {
            ramp: TimeScaleRamp::new(from_speed, ramp),
            delay,
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_presented(&self) -> bool {
        matches!(self.phase, Phase::Presented)
    }

    /// Advance by a real-time delta.
    pub fn tick(&mut self, real_delta: f32) -> PresentationStep {
        match &mut self.phase {
            Phase::Idle | Phase::Presented => PresentationStep::Idle,
            Phase::Ramping { ramp, delay } => {
                let speed = ramp.tick(real_delta);
                if ramp.finished() {
                    let delay = *delay;
                    self.phase = Phase::Waiting(RealTimeSequence::new(delay));
                }
                PresentationStep::Ramping(speed)
            }
            Phase::Waiting(delay) => {
                if !delay.tick(real_delta) {
                    return PresentationStep::Waiting;
                }
                self.phase = Phase::Presented;
                match self.outcome {
                    Some(outcome) => PresentationStep::Present(outcome),
                    None => PresentationStep::Idle,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> SessionOutcome {
        SessionOutcome {
            stage_index: 0,
            cleared: true,
            boss_defeated: true,
            final_score: 120,
            score_to_clear: 100,
            unlocked_next: true,
            next_available: true,
        }
    }

    #[test]
    fn ramps_then_waits_then_presents_once() {
        let mut presentation = ResultPresentation::default();
        presentation.start(outcome(), 0.1, 0.5, 1.0);

        let PresentationStep::Ramping(speed) = presentation.tick(0.25) else {
            panic!("expected ramp");
        };
        assert!((speed - 0.55).abs() < 1e-5);
        let PresentationStep::Ramping(speed) = presentation.tick(0.25) else {
            panic!("expected ramp");
        };
        assert!((speed - 1.0).abs() < 1e-5);
        assert_eq!(presentation.tick(0.5), PresentationStep::Waiting);
        assert_eq!(presentation.tick(0.5), PresentationStep::Present(outcome()));
        assert!(presentation.is_presented());
        assert_eq!(presentation.tick(1.0), PresentationStep::Idle);
    }

    #[test]
    fn idle_until_started() {
        let mut presentation = ResultPresentation::default();
        assert_eq!(presentation.tick(5.0), PresentationStep::Idle);
        assert!(!presentation.is_presented());
    }
}
