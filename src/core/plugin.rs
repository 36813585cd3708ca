//! Core plugin that sets up game states, events, and time control.

use bevy::prelude::*;

use super::events::*;
use super::states::*;
use super::time::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, Title, StageSelect, ...)
/// - Global events (HitEvent, ScoreRequest, ...)
/// - The slow-motion clock
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .init_resource::<CurrentStage>()
            .init_resource::<SlowMotion>()

            // Register global events
            .add_event::<HitEvent>()
            .add_event::<ScoreRequest>()
            .add_event::<RagdollRequest>()
            .add_event::<RagdollForce>()
            .add_event::<HitSoundRequest>()
            .add_event::<MissSoundRequest>()

            // Data files are read at Startup, so leave Loading on the first frame
            .add_systems(OnEnter(GameState::Loading), transition_to_title)

            // Retry and next-stage pass through StageLoading for a fresh scene
            .add_systems(OnEnter(GameState::StageLoading), enter_stage)

            .configure_sets(
                OnEnter(GameState::InStage),
                (StageSetupSet::Scene, StageSetupSet::Session).chain(),
            )

            .add_systems(Update, update_slow_motion)

            // Never leave a stage with the clock slowed down
            .add_systems(OnExit(GameState::InStage), reset_time_scale);
    }
}

fn transition_to_title(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::Title);
}

fn enter_stage(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InStage);
}
