//! Enemies module - the stage boss, its ragdoll and its taunts.

mod components;
mod plugin;
mod ragdoll;
mod spawning;

pub use components::*;
pub use plugin::EnemyPlugin;
pub use ragdoll::{boss_push_force, nearest_limb};
pub use spawning::spawn_boss;
