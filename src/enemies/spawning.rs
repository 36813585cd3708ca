//! Boss spawning - a kinematic torso with jointed limb bodies.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::{Destructible, TargetTag};
use crate::player::{AnimationDriver, AnimationTrigger};

/// Height of the torso centre above the boss's feet.
const TORSO_HEIGHT: f32 = 1.25;

/// Shape and placement of one limb, relative to the torso centre.
struct LimbSpec {
    name: &'static str,
    collider: Collider,
    mesh: Mesh,
    /// Limb centre in torso space
    offset: Vec3,
    /// Joint position in torso space
    anchor: Vec3,
}

fn limb_specs() -> Vec<LimbSpec> {
    let arm = |name, side: f32| LimbSpec {
        name,
        collider: Collider::capsule_y(0.25, 0.1),
        mesh: Capsule3d::new(0.1, 0.5).into(),
        offset: Vec3::new(0.5 * side, 0.05, 0.0),
        anchor: Vec3::new(0.4 * side, 0.4, 0.0),
    };
    let leg = |name, side: f32| LimbSpec {
        name,
        collider: Collider::capsule_y(0.3, 0.12),
        mesh: Capsule3d::new(0.12, 0.6).into(),
        offset: Vec3::new(0.18 * side, -0.85, 0.0),
        anchor: Vec3::new(0.18 * side, -0.45, 0.0),
    };

    vec![
        LimbSpec {
            name: "Head",
            collider: Collider::ball(0.22),
            mesh: Sphere::new(0.22).into(),
            offset: Vec3::new(0.0, 0.7, 0.0),
            anchor: Vec3::new(0.0, 0.45, 0.0),
        },
        arm("Left Arm", -1.0),
        arm("Right Arm", 1.0),
        leg("Left Leg", -1.0),
        leg("Right Leg", 1.0),
    ]
}

/// Spawn the boss standing at `position` (feet on the ground).
pub fn spawn_boss(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    taunt_interval: f32,
) -> Entity {
    let material = materials.add(Color::srgb(0.75, 0.25, 0.2));
    let root_transform = Transform::from_translation(position + Vec3::Y * TORSO_HEIGHT);
    let mut driver = AnimationDriver::default();
    driver.set_trigger(AnimationTrigger::Idle);

    let root = commands
        .spawn((
            Boss,
            Name::new("Boss"),
            TargetTag::new(TargetTag::ENEMY),
            Destructible {
                score_value: None,
                sound_category: Some("Body".to_string()),
            },
            RagdollState::default(),
            driver,
            TauntLoop::new(taunt_interval),
            Mesh3d(meshes.add(Cuboid::new(0.7, 0.9, 0.4))),
            MeshMaterial3d(material.clone()),
            root_transform,
            // The torso collider stays on in both modes
            RigidBody::KinematicPositionBased,
            Collider::cuboid(0.35, 0.45, 0.2),
        ))
        .id();

    let limbs = limb_specs()
        .into_iter()
        .map(|spec| {
            let rest = Transform::from_translation(spec.offset);
            let joint = SphericalJointBuilder::new()
                .local_anchor1(spec.anchor)
                .local_anchor2(spec.anchor - spec.offset);

            commands
                .spawn((
                    RagdollLimb { owner: root, rest },
                    Name::new(spec.name),
                    Mesh3d(meshes.add(spec.mesh)),
                    MeshMaterial3d(material.clone()),
                    root_transform.mul_transform(rest),
                    RigidBody::KinematicPositionBased,
                    spec.collider,
                    ColliderDisabled,
                    ReadMassProperties::default(),
                    ImpulseJoint::new(root, joint),
                ))
                .id()
        })
        .collect();

    commands.entity(root).insert(RagdollLimbs(limbs));
    root
}
