//! Stage unlock progress.

use bevy::prelude::*;

use super::store::{PersistenceError, PreferenceStore};

/// Preference key holding the highest unlocked stage index.
pub const CLEARED_STAGE_KEY: &str = "ClearedStage";

/// Highest unlocked stage, backed by a durable store.
///
/// The index only ever grows: clearing stage `n` unlocks `n + 1`, and the
/// store is written and saved the moment the value increases.
#[derive(Resource)]
pub struct StageProgress {
    store: Box<dyn PreferenceStore>,
    highest_unlocked: usize,
}

impl StageProgress {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        let highest_unlocked = store.get_int(CLEARED_STAGE_KEY, 0).max(0) as usize;
        Self {
            store,
            highest_unlocked,
        }
    }

    pub fn highest_unlocked(&self) -> usize {
        self.highest_unlocked
    }

    pub fn is_unlocked(&self, stage_index: usize) -> bool {
        stage_index <= self.highest_unlocked
    }

    /// Record a clear of `stage_index`. Returns true if it unlocked a new stage.
    ///
    /// The in-memory index only moves once the store has saved, so a failed
    /// save is retried by the next clear.
    pub fn record_clear(&mut self, stage_index: usize) -> Result<bool, PersistenceError> {
        let unlocked = stage_index + 1;
        if unlocked <= self.highest_unlocked {
            return Ok(false);
        }

        self.store
            .set_int(CLEARED_STAGE_KEY, i32::try_from(unlocked).unwrap_or(i32::MAX));
        self.store.save()?;
        self.highest_unlocked = unlocked;
        Ok(true)
    }
}
