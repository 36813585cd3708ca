//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Combat and the
//! session timer only run in `InStage`, menus only in `Title` and
//! `StageSelect`.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while data files are read
/// - `Title` shows the start screen
/// - `StageSelect` lists the stage catalog with locks
/// - `StageLoading` is a one-frame hop used by retry and next-stage so the
///   stage scene is rebuilt from scratch
/// - `InStage` is one session of a single stage, result screen included
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading config and stage data
    #[default]
    Loading,
    /// Title screen
    Title,
    /// Stage selection screen
    StageSelect,
    /// Transitional state between two stage scenes
    StageLoading,
    /// Active stage (gameplay and result screen)
    InStage,
}

/// Which catalog entry the next `InStage` scene is built for.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrentStage {
    pub index: usize,
}

/// Ordering of the `OnEnter(GameState::InStage)` work.
///
/// The scene and its UI are spawned first so the session can resolve its
/// scene references afterwards.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum StageSetupSet {
    Scene,
    Session,
}
