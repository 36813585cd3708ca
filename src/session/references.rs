//! Scene-local registry of the entities a session needs.
//!
//! The stage builder and the UI fill this in when the stage scene is built;
//! the coordinator resolves it once when the session starts instead of
//! searching the scene graph.

use bevy::prelude::*;
use thiserror::Error;

/// Errors raised while starting a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Scene reference '{0}' is not assigned")]
    MissingReference(&'static str),
}

/// Entity slots filled while the stage scene is built.
#[derive(Resource, Debug, Default, Clone)]
pub struct SceneReferences {
    pub game_ui: Option<Entity>,
    pub score_text: Option<Entity>,
    pub timer_text: Option<Entity>,
    pub result_ui: Option<Entity>,
    pub result_score_text: Option<Entity>,
    pub result_message_text: Option<Entity>,
    pub next_stage_button: Option<Entity>,
    pub enemy: Option<Entity>,
}

/// A complete set of scene references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedReferences {
    pub game_ui: Entity,
    pub score_text: Entity,
    pub timer_text: Entity,
    pub result_ui: Entity,
    pub result_score_text: Entity,
    pub result_message_text: Entity,
    pub next_stage_button: Entity,
    pub enemy: Entity,
}

fn required(slot: Option<Entity>, name: &'static str) -> Result<Entity, SessionError> {
    slot.ok_or(SessionError::MissingReference(name))
}

impl SceneReferences {
    pub fn resolve(&self) -> Result<ResolvedReferences, SessionError> {
        Ok(ResolvedReferences {
            game_ui: required(self.game_ui, "game_ui")?,
            score_text: required(self.score_text, "score_text")?,
            timer_text: required(self.timer_text, "timer_text")?,
            result_ui: required(self.result_ui, "result_ui")?,
            result_score_text: required(self.result_score_text, "result_score_text")?,
            result_message_text: required(self.result_message_text, "result_message_text")?,
            next_stage_button: required(self.next_stage_button, "next_stage_button")?,
            enemy: required(self.enemy, "enemy")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> SceneReferences {
        let e = |i| Some(Entity::from_raw(i));
        SceneReferences {
            game_ui: e(1),
            score_text: e(2),
            timer_text: e(3),
            result_ui: e(4),
            result_score_text: e(5),
            result_message_text: e(6),
            next_stage_button: e(7),
            enemy: e(8),
        }
    }

    #[test]
    fn complete_registry_resolves() {
        let resolved = complete().resolve().expect("all slots filled");
        assert_eq!(resolved.enemy, Entity::from_raw(8));
    }

    #[test]
    fn missing_slot_is_named() {
        let refs = SceneReferences {
            timer_text: None,
            ..complete()
        };
        assert_eq!(
            refs.resolve(),
            Err(SessionError::MissingReference("timer_text"))
        );
    }
}
