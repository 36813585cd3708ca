//! Enemy plugin - registers boss systems.

use bevy::prelude::*;

use super::components::TauntLine;
use super::ragdoll;
use crate::core::GameState;

/// Enemy plugin - handles the boss ragdoll, facing and taunts.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TauntLine>()
            // Ragdoll requests before forces so a knock-out push lands
            .add_systems(
                Update,
                (ragdoll::set_ragdoll, ragdoll::apply_ragdoll_force)
                    .chain()
                    .run_if(in_state(GameState::InStage)),
            )
            // Idle behaviour
            .add_systems(
                Update,
                (
                    ragdoll::face_player,
                    ragdoll::pose_animated_limbs,
                    ragdoll::tick_taunts,
                    ragdoll::silence_taunts,
                )
                    .chain()
                    .run_if(in_state(GameState::InStage)),
            )
            .add_systems(OnExit(GameState::InStage), clear_taunt_line);
    }
}

fn clear_taunt_line(mut taunt_line: ResMut<TauntLine>) {
    taunt_line.text = None;
}
