//! Combat module - attack lifecycle, hit resolution and hit consequences.

mod components;
mod plugin;
mod resolver;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
pub use resolver::{is_part_of, knockback_force, resolve_overlap, OverlapContext, OverlapResolution};
pub use systems::CombatSet;
