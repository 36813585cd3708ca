//! UI plugin - title screen, stage select and the in-stage interface.

use bevy::prelude::*;

use super::{hud, result};
use crate::config::{StageCatalog, StageDefinition};
use crate::core::{CurrentStage, GameState};
use crate::persistence::StageProgress;

const BUTTON_NORMAL: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);
const BUTTON_LOCKED: Color = Color::srgb(0.08, 0.08, 0.1);

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Stage HUD and result panel
        hud::setup_hud_systems(app);
        result::setup_result_systems(app);

        app
            // Title screen
            .add_systems(OnEnter(GameState::Title), setup_title)
            .add_systems(Update, title_input.run_if(in_state(GameState::Title)))
            .add_systems(OnExit(GameState::Title), cleanup_menu)

            // Stage select
            .add_systems(OnEnter(GameState::StageSelect), setup_stage_select)
            .add_systems(Update, stage_select_input.run_if(in_state(GameState::StageSelect)))
            .add_systems(OnExit(GameState::StageSelect), cleanup_menu);
    }
}

/// Marker for menu UI entities.
#[derive(Component)]
struct MenuUi;

/// Marker for the menu camera (menus have no stage camera).
#[derive(Component)]
struct MenuCamera;

/// Marker for menu buttons.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum MenuButton {
    Start,
    Quit,
    Stage(usize),
    Back,
}

/// Label of a stage-select entry.
fn stage_button_label(stage: &StageDefinition, unlocked: bool) -> String {
    if unlocked {
        stage.display_name.clone()
    } else {
        format!("{} (Locked)", stage.display_name)
    }
}

/// Recolor a button for its interaction state.
pub(super) fn button_feedback(interaction: &Interaction, bg_color: &mut BackgroundColor) {
    *bg_color = match interaction {
        Interaction::Pressed => BUTTON_PRESSED,
        Interaction::Hovered => BUTTON_HOVERED,
        Interaction::None => BUTTON_NORMAL,
    }
    .into();
}

fn button_node() -> Node {
    Node {
        width: Val::Px(240.0),
        height: Val::Px(50.0),
        margin: UiRect::all(Val::Px(10.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

fn button_label(text: &str, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(color),
    )
}

/// Helper to spawn a menu button.
pub(super) fn spawn_menu_button(
    parent: &mut ChildBuilder,
    text: &str,
    button: impl Component,
) -> Entity {
    parent
        .spawn((Button, button_node(), BackgroundColor(BUTTON_NORMAL), button))
        .with_children(|button| {
            button.spawn(button_label(text, Color::srgb(0.8, 0.8, 0.85)));
        })
        .id()
}

/// A stage entry that cannot be pressed.
fn spawn_locked_entry(parent: &mut ChildBuilder, text: &str) {
    parent
        .spawn((button_node(), BackgroundColor(BUTTON_LOCKED)))
        .with_children(|entry| {
            entry.spawn(button_label(text, Color::srgb(0.4, 0.4, 0.45)));
        });
}

fn menu_root(background: Color) -> impl Bundle {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(background),
        MenuUi,
    )
}

fn menu_heading(text: &str, size: f32) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.75, 0.3)),
        Node {
            margin: UiRect::bottom(Val::Px(50.0)),
            ..default()
        },
    )
}

/// Set up the title screen.
fn setup_title(mut commands: Commands) {
    commands.spawn((Camera2d, MenuCamera));

    commands
        .spawn(menu_root(Color::srgb(0.05, 0.05, 0.08)))
        .with_children(|parent| {
            parent.spawn(menu_heading("STAGE BRAWLER", 80.0));
            spawn_menu_button(parent, "Start", MenuButton::Start);
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        });
}

/// Handle title screen button interactions.
fn title_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        button_feedback(interaction, &mut bg_color);
        if *interaction != Interaction::Pressed {
            continue;
        }

        match button {
            MenuButton::Start => {
                next_state.set(GameState::StageSelect);
            }
            MenuButton::Quit => {
                exit.send(AppExit::Success);
            }
            _ => {}
        }
    }
}

/// Set up the stage select screen, one entry per catalog stage.
fn setup_stage_select(
    mut commands: Commands,
    catalog: Res<StageCatalog>,
    progress: Res<StageProgress>,
) {
    commands.spawn((Camera2d, MenuCamera));

    commands
        .spawn(menu_root(Color::srgb(0.05, 0.05, 0.08)))
        .with_children(|parent| {
            parent.spawn(menu_heading("Select Stage", 56.0));

            for (index, stage) in catalog.stages.iter().enumerate() {
                let unlocked = progress.is_unlocked(index);
                let label = stage_button_label(stage, unlocked);
                if unlocked {
                    spawn_menu_button(parent, &label, MenuButton::Stage(index));
                } else {
                    spawn_locked_entry(parent, &label);
                }
            }

            spawn_menu_button(parent, "Back", MenuButton::Back);
        });
}

/// Handle stage select button interactions.
fn stage_select_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    progress: Res<StageProgress>,
    mut current: ResMut<CurrentStage>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        button_feedback(interaction, &mut bg_color);
        if *interaction != Interaction::Pressed {
            continue;
        }

        match *button {
            MenuButton::Stage(index) if progress.is_unlocked(index) => {
                info!("Stage {} selected", index + 1);
                current.index = index;
                next_state.set(GameState::StageLoading);
            }
            MenuButton::Back => {
                next_state.set(GameState::Title);
            }
            _ => {}
        }
    }
}

/// Clean up menu entities.
fn cleanup_menu(
    mut commands: Commands,
    ui_query: Query<Entity, With<MenuUi>>,
    camera_query: Query<Entity, With<MenuCamera>>,
) {
    for entity in ui_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    for entity in camera_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_stages_are_labelled() {
        let stage = StageDefinition {
            display_name: "Stage 2".to_string(),
            scene_name: None,
            score_to_clear: 150,
            crate_count: 6,
        };

        assert_eq!(stage_button_label(&stage, true), "Stage 2");
        assert_eq!(stage_button_label(&stage, false), "Stage 2 (Locked)");
    }
}
