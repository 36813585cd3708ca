//! World module - the stage arena, its props and the scene lifecycle.

mod layout;
mod materials;
mod plugin;
mod spawning;

pub use layout::{prop_ring, PropKind, PropPlacement};
pub use plugin::{build_stage_scene, WorldPlugin};
pub use spawning::StageEntity;
