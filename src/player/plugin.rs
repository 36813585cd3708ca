//! Player plugin - movement, camera, and the attack animation timeline.

use bevy::prelude::*;

use super::animation::{self, AnimationCue};
use super::movement;
use crate::core::GameState;

/// Player plugin - handles player movement, camera and attack cues.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // Set up movement systems
        movement::setup_movement_systems(app);

        app.add_event::<AnimationCue>().add_systems(
            Update,
            animation::advance_attack_animations.run_if(in_state(GameState::InStage)),
        );
    }
}
