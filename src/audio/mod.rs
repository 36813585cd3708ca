//! Audio module - hit and miss sounds played through kira.

mod library;
mod plugin;

pub use library::{resolve_hit_clip, SoundLibrary};
pub use plugin::GameAudioPlugin;
