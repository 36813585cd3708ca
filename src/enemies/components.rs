//! Boss components - ragdoll state, limbs and the taunt loop.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

use crate::config::TauntConfig;

/// Marker for the stage boss.
#[derive(Component)]
pub struct Boss;

/// Animation-driven or physics-driven body.
///
/// Moves `Animated -> Ragdoll` once per session; a fresh session puts it
/// back to `Animated`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RagdollState {
    #[default]
    Animated,
    Ragdoll,
}

impl RagdollState {
    /// Returns true if the state changed.
    pub fn set(&mut self, enable: bool) -> bool {
        let next = if enable {
            RagdollState::Ragdoll
        } else {
            RagdollState::Animated
        };
        let changed = *self != next;
        *self = next;
        changed
    }

    pub fn is_ragdoll(self) -> bool {
        self == RagdollState::Ragdoll
    }
}

/// Limb bodies of a ragdoll, owned by the root entity.
#[derive(Component, Debug, Clone, Default)]
pub struct RagdollLimbs(pub Vec<Entity>);

/// One limb body, posed relative to its owner while animated.
#[derive(Component, Debug, Clone, Copy)]
pub struct RagdollLimb {
    pub owner: Entity,
    /// Pose in the owner's space
    pub rest: Transform,
}

/// Resource holding the taunt currently on screen.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct TauntLine {
    pub text: Option<String>,
}

/// What a taunt tick changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TauntStep {
    Quiet,
    Show(String),
    Hide,
}

#[derive(Debug, Clone)]
enum TauntPhase {
    Waiting(Timer),
    Showing(Timer),
}

/// Repeating idle taunt: silence, then a random phrase for a random time.
#[derive(Component, Debug, Clone)]
pub struct TauntLoop {
    phase: TauntPhase,
    stopped: bool,
}

impl TauntLoop {
    pub fn new(interval: f32) -> Self {
        Self {
            phase: TauntPhase::Waiting(Timer::from_seconds(interval.max(0.0), TimerMode::Once)),
            stopped: false,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Stop for good. Returns true if a phrase was on screen.
    pub fn stop(&mut self) -> bool {
        self.stopped = true;
        matches!(self.phase, TauntPhase::Showing(_))
    }

    pub fn tick(&mut self, delta: Duration, config: &TauntConfig, rng: &mut impl Rng) -> TauntStep {
        if self.stopped {
            return TauntStep::Quiet;
        }

        match &mut self.phase {
            TauntPhase::Waiting(timer) => {
                if !timer.tick(delta).finished() {
                    return TauntStep::Quiet;
                }
                let Some(phrase) = config.phrases.choose(rng) else {
                    timer.reset();
                    return TauntStep::Quiet;
                };
                let max = config.max_display_time.max(config.min_display_time);
                let seconds = rng.gen_range(config.min_display_time..=max).max(0.0);
                let phrase = phrase.clone();
                self.phase = TauntPhase::Showing(Timer::from_seconds(seconds, TimerMode::Once));
                TauntStep::Show(phrase)
            }
            TauntPhase::Showing(timer) => {
                if !timer.tick(delta).finished() {
                    return TauntStep::Quiet;
                }
                self.phase = TauntPhase::Waiting(Timer::from_seconds(
                    config.interval.max(0.0),
                    TimerMode::Once,
                ));
                TauntStep::Hide
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> TauntConfig {
        TauntConfig {
            phrases: vec!["Come on!".to_string()],
            interval: 1.0,
            min_display_time: 2.0,
            max_display_time: 2.0,
            turn_speed: 5.0,
        }
    }

    #[test]
    fn ragdoll_set_is_idempotent() {
        let mut state = RagdollState::default();
        assert!(state.set(true));
        assert!(!state.set(true));
        assert_eq!(state, RagdollState::Ragdoll);
        assert!(state.set(false));
        assert_eq!(state, RagdollState::Animated);
    }

    #[test]
    fn taunt_cycles_between_silence_and_phrase() {
        let config = config();
        let mut rng = StdRng::seed_from_u64(7);
        let mut taunt = TauntLoop::new(config.interval);

        assert_eq!(taunt.tick(Duration::from_secs_f32(0.5), &config, &mut rng), TauntStep::Quiet);
        assert_eq!(
            taunt.tick(Duration::from_secs_f32(0.5), &config, &mut rng),
            TauntStep::Show("Come on!".to_string())
        );
        assert_eq!(taunt.tick(Duration::from_secs_f32(1.0), &config, &mut rng), TauntStep::Quiet);
        assert_eq!(taunt.tick(Duration::from_secs_f32(1.0), &config, &mut rng), TauntStep::Hide);
    }

    #[test]
    fn stopped_taunt_stays_quiet() {
        let config = config();
        let mut rng = StdRng::seed_from_u64(7);
        let mut taunt = TauntLoop::new(config.interval);

        taunt.tick(Duration::from_secs(1), &config, &mut rng);
        assert!(taunt.stop());
        assert_eq!(taunt.tick(Duration::from_secs(10), &config, &mut rng), TauntStep::Quiet);
    }

    #[test]
    fn no_phrases_means_no_taunt() {
        let config = TauntConfig {
            phrases: Vec::new(),
            ..config()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let mut taunt = TauntLoop::new(config.interval);

        assert_eq!(taunt.tick(Duration::from_secs(5), &config, &mut rng), TauntStep::Quiet);
    }
}
