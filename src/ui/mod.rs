//! UI module - menus, the stage HUD and the result panel.

mod hud;
mod plugin;
mod result;

pub use hud::{format_score, format_timer, StageUi};
pub use plugin::UiPlugin;
pub use result::{result_message, ResultButton};
