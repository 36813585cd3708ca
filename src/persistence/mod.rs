//! Persistence module - the key-value preference store and stage unlocks.

mod progress;
mod store;

pub use progress::{StageProgress, CLEARED_STAGE_KEY};
pub use store::{MemoryPreferenceStore, PersistenceError, PreferenceStore, RonPreferenceStore};

use bevy::prelude::*;

/// Where preferences are written on disk.
pub const PREFERENCES_PATH: &str = "save/preferences.ron";

/// Persistence plugin - loads saved progress at startup.
pub struct PersistencePlugin;

impl Plugin for PersistencePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_stage_progress);
    }
}

fn load_stage_progress(mut commands: Commands) {
    let store = match RonPreferenceStore::open(PREFERENCES_PATH) {
        Ok(store) => store,
        Err(e) => {
            error!("{}. Starting with no saved progress.", e);
            RonPreferenceStore::empty(PREFERENCES_PATH)
        }
    };

    let progress = StageProgress::new(Box::new(store));
    info!("Highest unlocked stage index: {}", progress.highest_unlocked());
    commands.insert_resource(progress);
}
