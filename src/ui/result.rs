//! Result panel - final score, clear message and the follow-up buttons.

use bevy::prelude::*;

use super::hud::{format_score, StageUi};
use super::plugin::{button_feedback, spawn_menu_button};
use crate::core::{CurrentStage, GameState, StageSetupSet};
use crate::session::{GameSession, PresentResult, SceneReferences, SessionOutcome};

/// Buttons on the result panel.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultButton {
    Retry,
    NextStage,
    StageSelect,
    Title,
}

/// Headline for a finished stage.
pub fn result_message(outcome: &SessionOutcome) -> &'static str {
    if outcome.cleared && outcome.unlocked_next {
        "Stage Clear! New stage unlocked"
    } else if outcome.cleared {
        "Stage Clear!"
    } else if outcome.boss_defeated {
        "Not enough points..."
    } else {
        "Time Up..."
    }
}

/// Setup result panel systems.
pub fn setup_result_systems(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::InStage),
        spawn_result_panel.in_set(StageSetupSet::Scene),
    )
    .add_systems(
        Update,
        (show_result, result_button_input).run_if(in_state(GameState::InStage)),
    );
}

/// Spawn the hidden result panel and register it with the scene references.
fn spawn_result_panel(mut commands: Commands, mut references: ResMut<SceneReferences>) {
    let mut score_text = Entity::PLACEHOLDER;
    let mut message_text = Entity::PLACEHOLDER;
    let mut next_button = Entity::PLACEHOLDER;

    let panel = commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
            Visibility::Hidden,
            StageUi,
        ))
        .with_children(|parent| {
            message_text = parent
                .spawn((
                    Text::new(""),
                    TextFont {
                        font_size: 64.0,
                        ..default()
                    },
                    TextColor(Color::srgb(1.0, 0.85, 0.3)),
                    Node {
                        margin: UiRect::bottom(Val::Px(20.0)),
                        ..default()
                    },
                ))
                .id();

            score_text = parent
                .spawn((
                    Text::new(format_score(0)),
                    TextFont {
                        font_size: 36.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.9)),
                    Node {
                        margin: UiRect::bottom(Val::Px(40.0)),
                        ..default()
                    },
                ))
                .id();

            next_button = spawn_menu_button(parent, "Next Stage", ResultButton::NextStage);
            spawn_menu_button(parent, "Retry", ResultButton::Retry);
            spawn_menu_button(parent, "Stage Select", ResultButton::StageSelect);
            spawn_menu_button(parent, "Title", ResultButton::Title);
        })
        .id();

    references.result_ui = Some(panel);
    references.result_score_text = Some(score_text);
    references.result_message_text = Some(message_text);
    references.next_stage_button = Some(next_button);
}

/// Swap the game UI for the result panel.
fn show_result(
    mut events: EventReader<PresentResult>,
    session: Res<GameSession>,
    mut visibilities: Query<&mut Visibility>,
    mut nodes: Query<&mut Node>,
    mut texts: Query<&mut Text>,
) {
    let Some(event) = events.read().last() else {
        return;
    };
    let Some(references) = session.references() else {
        return;
    };
    let outcome = &event.outcome;

    if let Ok(mut visibility) = visibilities.get_mut(references.game_ui) {
        *visibility = Visibility::Hidden;
    }
    if let Ok(mut visibility) = visibilities.get_mut(references.result_ui) {
        *visibility = Visibility::Inherited;
    }
    if let Ok(mut text) = texts.get_mut(references.result_score_text) {
        text.0 = format_score(outcome.final_score);
    }
    if let Ok(mut text) = texts.get_mut(references.result_message_text) {
        text.0 = result_message(outcome).to_string();
    }
    // Collapse the button instead of hiding it so the layout closes up
    if let Ok(mut node) = nodes.get_mut(references.next_stage_button) {
        node.display = if outcome.next_available {
            Display::Flex
        } else {
            Display::None
        };
    }
    info!("Result shown: {}", result_message(outcome));
}

/// Handle result panel button interactions.
fn result_button_input(
    mut interaction_query: Query<
        (&Interaction, &ResultButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    session: Res<GameSession>,
    mut current: ResMut<CurrentStage>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        button_feedback(interaction, &mut bg_color);
        if *interaction != Interaction::Pressed {
            continue;
        }

        match button {
            ResultButton::Retry => {
                next_state.set(GameState::StageLoading);
            }
            ResultButton::NextStage => {
                if session.outcome().is_some_and(|o| o.next_available) {
                    current.index += 1;
                    next_state.set(GameState::StageLoading);
                }
            }
            ResultButton::StageSelect => {
                next_state.set(GameState::StageSelect);
            }
            ResultButton::Title => {
                next_state.set(GameState::Title);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(cleared: bool, boss_defeated: bool) -> SessionOutcome {
        SessionOutcome {
            stage_index: 0,
            cleared,
            boss_defeated,
            final_score: 40,
            score_to_clear: 100,
            unlocked_next: false,
            next_available: false,
        }
    }

    #[test]
    fn message_depends_on_how_the_stage_ended() {
        assert_eq!(result_message(&outcome(true, true)), "Stage Clear!");
        assert_eq!(result_message(&outcome(false, true)), "Not enough points...");
        assert_eq!(result_message(&outcome(false, false)), "Time Up...");
    }

    #[test]
    fn first_clear_announces_the_unlock() {
        let first_clear = SessionOutcome {
            unlocked_next: true,
            next_available: true,
            ..outcome(true, true)
        };
        assert_eq!(result_message(&first_clear), "Stage Clear! New stage unlocked");
    }
}
