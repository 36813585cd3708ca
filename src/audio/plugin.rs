//! Audio plugin - plays sounds requested by the combat systems.

use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

use super::library::SoundLibrary;
use crate::config::{load_game_config, GameConfig};
use crate::core::{GameState, HitSoundRequest, MissSoundRequest};

/// Game audio plugin. Expects `bevy_kira_audio::AudioPlugin` to be added.
pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundLibrary>()
            .add_systems(Startup, load_sound_library.after(load_game_config))
            .add_systems(
                Update,
                (play_hit_sounds, play_miss_sounds).run_if(in_state(GameState::InStage)),
            );
    }
}

fn load_sound_library(
    mut commands: Commands,
    config: Res<GameConfig>,
    asset_server: Res<AssetServer>,
) {
    let library = SoundLibrary::load(&config.sounds, &asset_server);
    info!("Loaded {} hit sounds", library.hit.len());
    commands.insert_resource(library);
}

fn play_hit_sounds(
    mut requests: EventReader<HitSoundRequest>,
    library: Res<SoundLibrary>,
    audio: Res<Audio>,
) {
    for request in requests.read() {
        match library.hit_clip(request.category.as_deref()) {
            Some(clip) => {
                audio.play(clip.clone());
            }
            None => warn!(
                "No hit sound for category {:?} and no default hit sound",
                request.category
            ),
        }
    }
}

fn play_miss_sounds(
    mut requests: EventReader<MissSoundRequest>,
    library: Res<SoundLibrary>,
    audio: Res<Audio>,
) {
    for _ in requests.read() {
        match library.swing.as_ref() {
            Some(clip) => {
                audio.play(clip.clone());
            }
            None => warn!("No swing sound configured"),
        }
    }
}
