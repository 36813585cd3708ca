//! Session module - score ledger, stage timer, and the coordinator that
//! turns a run of hits into a cleared or failed stage.

mod coordinator;
mod ledger;
mod plugin;
mod presentation;
mod references;
mod systems;
mod timer;

pub use coordinator::{GameSession, IgnoreReason, ScoreOutcome, SessionEnded, SessionOutcome};
pub use ledger::ScoreLedger;
pub use plugin::SessionPlugin;
pub use presentation::{PresentationStep, ResultPresentation};
pub use references::{ResolvedReferences, SceneReferences, SessionError};
pub use timer::{SessionTimer, TimerTick};

use bevy::prelude::*;

/// Sent when the result screen should replace the game UI.
#[derive(Event, Debug, Clone, Copy)]
pub struct PresentResult {
    pub outcome: SessionOutcome,
}
