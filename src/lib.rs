//! Stage Brawler - a short-session arena brawler in Bevy.
//!
//! The player punches and kicks props around an arena for points, then
//! knocks out the stage boss before the clock runs down.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, slow motion and the time scale
//! - **Config**: Tuning values and the stage catalog, loaded from RON
//! - **Persistence**: Key-value preference store and stage unlocks
//! - **Player**: Movement, camera, attack animation timeline
//! - **Combat**: Hazard volumes, hit resolution, hit consequences
//! - **Enemies**: Boss ragdoll transition, facing and taunts
//! - **Session**: Score ledger, stage timer, clear/fail and result timing
//! - **Audio**: Hit and swing sounds
//! - **UI**: Title, stage select, HUD and result panel
//! - **World**: Stage arena construction and cleanup

pub mod audio;
pub mod combat;
pub mod config;
pub mod core;
pub mod enemies;
pub mod persistence;
pub mod player;
pub mod session;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct BrawlerPlugin;

impl Plugin for BrawlerPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Data files and saved progress
            .add_plugins(config::ConfigPlugin)
            .add_plugins(persistence::PersistencePlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Session flow
            .add_plugins(session::SessionPlugin)

            // Audio
            .add_plugins(audio::GameAudioPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
