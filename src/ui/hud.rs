//! In-stage HUD - score, timer, boss taunts and the hit flash.

use bevy::prelude::*;

use crate::combat::ConcentrationFlash;
use crate::core::{GameState, StageSetupSet};
use crate::enemies::TauntLine;
use crate::session::{GameSession, SceneReferences};

/// Marker for every UI entity that belongs to the stage scene.
#[derive(Component)]
pub struct StageUi;

/// Marker for the boss taunt text.
#[derive(Component)]
struct TauntText;

/// Marker for the concentration-line overlay.
#[derive(Component)]
struct FlashOverlay;

/// Score label shown in the HUD and on the result panel.
pub fn format_score(total: u32) -> String {
    format!("Score: {}", total)
}

/// Remaining time with one decimal place.
pub fn format_timer(remaining: f32) -> String {
    format!("{:.1}", remaining.max(0.0))
}

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::InStage),
        spawn_hud.in_set(StageSetupSet::Scene),
    )
    .add_systems(OnExit(GameState::InStage), cleanup_stage_ui)
    .add_systems(
        Update,
        (update_score_text, update_timer_text, update_taunt_text, update_flash_overlay)
            .run_if(in_state(GameState::InStage)),
    );
}

const HUD_TEXT_COLOR: Color = Color::srgb(0.95, 0.95, 0.9);
const TAUNT_TEXT_COLOR: Color = Color::srgb(1.0, 0.8, 0.3);

fn hud_text(text: String, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

/// Spawn the HUD and register it with the scene references.
fn spawn_hud(mut commands: Commands, mut references: ResMut<SceneReferences>) {
    let mut score_text = Entity::PLACEHOLDER;
    let mut timer_text = Entity::PLACEHOLDER;

    // HUD root container (top bar)
    let game_ui = commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            StageUi,
        ))
        .with_children(|parent| {
            parent
                .spawn(Node {
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::SpaceBetween,
                    ..default()
                })
                .with_children(|bar| {
                    score_text = bar.spawn(hud_text(format_score(0), 32.0, HUD_TEXT_COLOR)).id();
                    timer_text = bar.spawn(hud_text(format_timer(0.0), 32.0, HUD_TEXT_COLOR)).id();
                });

            // Taunt line under the top bar
            parent.spawn((
                hud_text(String::new(), 26.0, TAUNT_TEXT_COLOR),
                Node {
                    margin: UiRect::top(Val::Px(20.0)),
                    align_self: AlignSelf::Center,
                    ..default()
                },
                TauntText,
            ));
        })
        .id();

    // Concentration-line flash (full screen, above the HUD)
    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.35)),
        Visibility::Hidden,
        FlashOverlay,
        StageUi,
    ));

    references.game_ui = Some(game_ui);
    references.score_text = Some(score_text);
    references.timer_text = Some(timer_text);
}

fn update_score_text(session: Res<GameSession>, mut texts: Query<&mut Text>) {
    let Some(references) = session.references() else {
        return;
    };
    if let Ok(mut text) = texts.get_mut(references.score_text) {
        let label = format_score(session.total());
        if text.0 != label {
            text.0 = label;
        }
    }
}

fn update_timer_text(session: Res<GameSession>, mut texts: Query<&mut Text>) {
    let Some(references) = session.references() else {
        return;
    };
    if let Ok(mut text) = texts.get_mut(references.timer_text) {
        let label = format_timer(session.remaining_time());
        if text.0 != label {
            text.0 = label;
        }
    }
}

fn update_taunt_text(taunt_line: Res<TauntLine>, mut query: Query<&mut Text, With<TauntText>>) {
    if !taunt_line.is_changed() {
        return;
    }
    for mut text in query.iter_mut() {
        text.0 = taunt_line.text.clone().unwrap_or_default();
    }
}

fn update_flash_overlay(
    flash: Res<ConcentrationFlash>,
    mut query: Query<&mut Visibility, With<FlashOverlay>>,
) {
    let visibility = if flash.is_visible() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut overlay in query.iter_mut() {
        overlay.set_if_neq(visibility);
    }
}

/// Clean up stage UI entities.
fn cleanup_stage_ui(mut commands: Commands, query: Query<Entity, With<StageUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
