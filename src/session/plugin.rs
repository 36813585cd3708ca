//! Session plugin.

use bevy::prelude::*;

use super::systems;

/// Session plugin - runs one stage attempt from start to result screen.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_session_systems(app);
    }
}
