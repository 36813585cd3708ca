//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Discrete signals the animation driver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationTrigger {
    PunchTrigger,
    KickTrigger,
    Idle,
}

/// Parameters handed to the animation collaborator.
///
/// Used by both the player and the boss. Disabling the driver hands the
/// body over to physics.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct AnimationDriver {
    pub enabled: bool,
    /// Locomotion blend parameter
    pub speed: f32,
    pub last_trigger: Option<AnimationTrigger>,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 0.0,
            last_trigger: None,
        }
    }
}

impl AnimationDriver {
    pub fn set_trigger(&mut self, trigger: AnimationTrigger) {
        self.last_trigger = Some(trigger);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
}

/// Marker for the follow camera.
#[derive(Component)]
pub struct PlayerCamera {
    /// Offset from the player, in world space
    pub offset: Vec3,
    /// Interpolation speed multiplier (higher = faster)
    pub follow_speed: f32,
}

impl Default for PlayerCamera {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 7.0, 9.0),
            follow_speed: 6.0,
        }
    }
}
