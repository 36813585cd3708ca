//! Core game module - states, events, and time control.
//!
//! This module provides the foundation that all other game systems build upon.

mod events;
mod plugin;
mod states;
mod time;

pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
pub use time::*;
