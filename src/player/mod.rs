//! Player module - player entity, attack timeline, movement and camera.

mod animation;
mod components;
mod movement;
mod plugin;

pub use animation::{AnimationCue, AttackAnimation, TimelineCue};
pub use components::*;
pub use movement::{rotate_towards, spawn_camera, spawn_player};
pub use plugin::PlayerPlugin;
