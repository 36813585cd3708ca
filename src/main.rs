//! Stage Brawler - Entry Point
//!
//! Controls:
//! - WASD: Move
//! - J: Punch
//! - K: Kick

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin as KiraAudioPlugin;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins; kira handles audio instead of bevy_audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Stage Brawler".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Audio
        .add_plugins(KiraAudioPlugin)

        // Our game plugin
        .add_plugins(stage_brawler::BrawlerPlugin)

        .run();
}
