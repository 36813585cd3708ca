//! Config module - tuning values and the stage catalog, loaded from RON.

mod data;
mod error;
mod stages;

pub use data::*;
pub use error::DataLoadError;
pub use stages::{load_stage_catalog, StageCatalog, StageDefinition};

use bevy::prelude::*;

/// Config plugin - reads data files at startup.
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (load_game_config, load_stage_catalog));
    }
}
