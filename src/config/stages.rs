//! Stage catalog - the ordered list of playable stages.

use bevy::prelude::*;
use serde::Deserialize;

use super::data::read_ron_file;
use super::error::DataLoadError;

pub const STAGE_CATALOG_PATH: &str = "assets/data/stages.ron";

/// One playable stage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StageDefinition {
    pub display_name: String,
    /// Scene identifier; derived from the index when omitted
    #[serde(default)]
    pub scene_name: Option<String>,
    pub score_to_clear: u32,
    /// Number of scored crates placed in the arena
    #[serde(default = "default_crate_count")]
    pub crate_count: u32,
}

fn default_crate_count() -> u32 {
    6
}

/// Static, ordered stage configuration. Read-only at runtime.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
pub struct StageCatalog {
    pub stages: Vec<StageDefinition>,
}

impl Default for StageCatalog {
    fn default() -> Self {
        let stage = |index: u32, score_to_clear: u32, crate_count: u32| StageDefinition {
            display_name: format!("Stage {}", index + 1),
            scene_name: None,
            score_to_clear,
            crate_count,
        };
        Self {
            stages: vec![stage(0, 100, 4), stage(1, 150, 6), stage(2, 200, 8)],
        }
    }
}

impl StageCatalog {
    pub fn from_ron_str(contents: &str, path: &str) -> Result<Self, DataLoadError> {
        let catalog: Self = ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        catalog.validated(path)
    }

    pub fn load(path: &str) -> Result<Self, DataLoadError> {
        read_ron_file::<Self>(path)?.validated(path)
    }

    fn validated(self, path: &str) -> Result<Self, DataLoadError> {
        if self.stages.is_empty() {
            return Err(DataLoadError::EmptyCatalog(path.to_string()));
        }
        Ok(self)
    }

    pub fn get(&self, index: usize) -> Option<&StageDefinition> {
        self.stages.get(index)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Score needed to clear a stage. Unknown stages can never be cleared.
    pub fn score_to_clear(&self, index: usize) -> u32 {
        self.get(index).map_or(u32::MAX, |stage| stage.score_to_clear)
    }

    /// Scene identifier, "01{index}.Stage{index + 1}" unless overridden.
    pub fn scene_name_for(&self, index: usize) -> String {
        self.get(index)
            .and_then(|stage| stage.scene_name.clone())
            .unwrap_or_else(|| format!("01{}.Stage{}", index, index + 1))
    }
}

/// Load the stage catalog at startup, falling back to the built-in stages.
pub fn load_stage_catalog(mut commands: Commands) {
    let catalog = match StageCatalog::load(STAGE_CATALOG_PATH) {
        Ok(catalog) => {
            info!("Loaded {} stage(s) from {}", catalog.len(), STAGE_CATALOG_PATH);
            catalog
        }
        Err(e) => {
            warn!("{}. Using built-in stages.", e);
            StageCatalog::default()
        }
    };
    commands.insert_resource(catalog);
}
