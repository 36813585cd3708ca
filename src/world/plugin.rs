//! World plugin - builds and tears down the stage scene.

use bevy::prelude::*;

use super::layout::{prop_ring, ARENA_HALF_SIZE, BOSS_START, PLAYER_START, PROP_RING_RADIUS};
use super::materials::ArenaMaterials;
use super::spawning::*;
use crate::combat::HitEffect;
use crate::config::{GameConfig, StageCatalog};
use crate::core::{CurrentStage, GameState, StageSetupSet};
use crate::enemies::{spawn_boss, RagdollLimb};
use crate::player::{spawn_camera, spawn_player};
use crate::session::SceneReferences;

/// Props per stage when the catalog entry is missing.
const FALLBACK_PROP_COUNT: u32 = 6;

/// World plugin - handles stage scene setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GameState::InStage),
            build_stage_scene.in_set(StageSetupSet::Scene),
        )
        .add_systems(OnExit(GameState::InStage), cleanup_stage_scene);
    }
}

/// Build the stage scene for the current catalog entry.
pub fn build_stage_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<GameConfig>,
    catalog: Res<StageCatalog>,
    current: Res<CurrentStage>,
    mut references: ResMut<SceneReferences>,
) {
    let prop_count = match catalog.get(current.index) {
        Some(stage) => {
            info!(
                "Building stage: {} ({})",
                stage.display_name,
                catalog.scene_name_for(current.index)
            );
            stage.crate_count
        }
        None => {
            error!("Stage index {} is not in the catalog", current.index);
            FALLBACK_PROP_COUNT
        }
    };

    let arena = ArenaMaterials::new(&mut materials);
    spawn_floor(&mut commands, &mut meshes, &arena, ARENA_HALF_SIZE);
    spawn_perimeter(&mut commands, &mut meshes, &arena, ARENA_HALF_SIZE);

    // Cover block on the east side; attacks through it are blocked
    spawn_wall(
        &mut commands,
        &mut meshes,
        &arena,
        Vec3::new(6.5, 1.0, 0.0),
        Vec3::new(0.4, 2.0, 3.0),
    );

    for placement in prop_ring(prop_count, PROP_RING_RADIUS) {
        spawn_prop(&mut commands, &mut meshes, &arena, placement);
    }

    let player = spawn_player(&mut commands, &mut meshes, &mut materials, PLAYER_START);
    commands.entity(player).insert(StageEntity);

    let boss = spawn_boss(
        &mut commands,
        &mut meshes,
        &mut materials,
        BOSS_START,
        config.taunts.interval,
    );
    commands.entity(boss).insert(StageEntity);
    references.enemy = Some(boss);

    let camera = spawn_camera(&mut commands, PLAYER_START);
    commands.entity(camera).insert(StageEntity);

    spawn_lighting(&mut commands);
}

/// Clean up stage entities when leaving InStage.
fn cleanup_stage_scene(
    mut commands: Commands,
    stage_query: Query<Entity, Or<(With<StageEntity>, With<RagdollLimb>, With<HitEffect>)>>,
) {
    for entity in stage_query.iter() {
        if let Some(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerCamera;

    #[test]
    fn cleanup_removes_stage_camera_and_children() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_systems(Update, cleanup_stage_scene);

        let world = app.world_mut();
        let camera = world.spawn((PlayerCamera::default(), StageEntity)).id();
        let floor = world.spawn(StageEntity).id();
        let child = world.spawn_empty().set_parent(floor).id();
        let menu = world.spawn(Name::new("Title Menu")).id();

        app.update();

        let world = app.world();
        assert!(!world.entities().contains(camera));
        assert!(!world.entities().contains(floor));
        assert!(!world.entities().contains(child));
        assert!(world.entities().contains(menu));
    }
}
