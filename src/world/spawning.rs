//! Entity spawning functions for stage construction.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::layout::{PropKind, PropPlacement};
use super::materials::ArenaMaterials;
use crate::combat::{Destructible, TargetTag, Wall};

/// Marker for every entity that belongs to the stage scene.
#[derive(Component)]
pub struct StageEntity;

/// Spawn the arena floor, `half_size` units from the centre to each edge.
pub fn spawn_floor(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &ArenaMaterials,
    half_size: f32,
) {
    commands.spawn((
        Name::new("Floor"),
        Mesh3d(meshes.add(Cuboid::new(half_size * 2.0, 0.2, half_size * 2.0))),
        MeshMaterial3d(materials.floor.clone()),
        Transform::from_xyz(0.0, -0.1, 0.0),
        Collider::cuboid(half_size, 0.1, half_size),
        StageEntity,
    ));
}

/// Spawn an attack-blocking wall block centred at `center`.
pub fn spawn_wall(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &ArenaMaterials,
    center: Vec3,
    size: Vec3,
) {
    commands.spawn((
        Name::new("Wall"),
        Wall,
        Mesh3d(meshes.add(Cuboid::from_size(size))),
        MeshMaterial3d(materials.wall.clone()),
        Transform::from_translation(center),
        Collider::cuboid(size.x / 2.0, size.y / 2.0, size.z / 2.0),
        StageEntity,
    ));
}

/// Spawn the four walls around a square arena.
pub fn spawn_perimeter(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &ArenaMaterials,
    half_size: f32,
) {
    let height = 2.0;
    let thickness = 0.5;
    let length = half_size * 2.0 + thickness * 2.0;
    let offset = half_size + thickness / 2.0;

    for (center, size) in [
        (Vec3::new(0.0, height / 2.0, -offset), Vec3::new(length, height, thickness)),
        (Vec3::new(0.0, height / 2.0, offset), Vec3::new(length, height, thickness)),
        (Vec3::new(-offset, height / 2.0, 0.0), Vec3::new(thickness, height, length)),
        (Vec3::new(offset, height / 2.0, 0.0), Vec3::new(thickness, height, length)),
    ] {
        spawn_wall(commands, meshes, materials, center, size);
    }
}

/// Spawn a scored prop. Props stay kinematic until something hits them.
pub fn spawn_prop(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &ArenaMaterials,
    placement: PropPlacement,
) -> Entity {
    let (mesh, material, collider, half_height) = match placement.kind {
        PropKind::Crate => (
            meshes.add(Cuboid::new(0.8, 0.8, 0.8)),
            materials.wood.clone(),
            Collider::cuboid(0.4, 0.4, 0.4),
            0.4,
        ),
        PropKind::BonusCrate => (
            meshes.add(Cuboid::new(0.6, 0.6, 0.6)),
            materials.gold.clone(),
            Collider::cuboid(0.3, 0.3, 0.3),
            0.3,
        ),
        PropKind::Barrel => (
            meshes.add(Cylinder::new(0.35, 1.0)),
            materials.metal.clone(),
            Collider::cylinder(0.5, 0.35),
            0.5,
        ),
    };

    commands
        .spawn((
            Name::new(placement.kind.tag()),
            TargetTag::new(placement.kind.tag()),
            Destructible {
                score_value: placement.kind.declared_score(),
                sound_category: Some(placement.kind.sound_category().to_string()),
            },
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(placement.position + Vec3::Y * half_height),
            RigidBody::KinematicPositionBased,
            collider,
            StageEntity,
        ))
        .id()
}

/// Spawn the key light and ambient fill.
pub fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        StageEntity,
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });
}
