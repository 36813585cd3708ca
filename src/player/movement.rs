//! Player movement, follow camera and spawning.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::{AttackState, HazardVolume, HazardVolumes};
use crate::config::GameConfig;
use crate::core::{AttackKind, GameState};

/// Vertical speed applied while airborne, units per second.
const FALL_SPEED: f32 = 9.81;

/// Below this input magnitude the player stands still.
const MOVE_DEADZONE: f32 = 0.1;

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.add_systems(
        Update,
        (player_movement, follow_camera)
            .chain()
            .run_if(in_state(GameState::InStage)),
    );
}

/// Rotate `current` toward `target` by at most `max_radians`.
pub fn rotate_towards(current: Quat, target: Quat, max_radians: f32) -> Quat {
    let angle = current.angle_between(target);
    if angle <= max_radians || angle <= f32::EPSILON {
        return target;
    }
    current.slerp(target, max_radians / angle)
}

/// Handle WASD movement.
///
/// Movement is locked while an attack animation plays; the "Speed"
/// parameter is forced to zero in that case.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut player_query: Query<
        (
            &mut Transform,
            &AttackState,
            &mut AnimationDriver,
            &mut KinematicCharacterController,
            Option<&KinematicCharacterControllerOutput>,
        ),
        With<Player>,
    >,
) {
    let Ok((mut transform, attack, mut driver, mut controller, output)) =
        player_query.get_single_mut()
    else {
        return;
    };

    let grounded = output.map_or(true, |o| o.grounded);
    let gravity = if grounded {
        Vec3::ZERO
    } else {
        Vec3::NEG_Y * FALL_SPEED * time.delta_secs()
    };

    if attack.is_attacking {
        driver.set_speed(0.0);
        controller.translation = Some(gravity);
        return;
    }

    let mut input = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        input.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        input.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        input.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        input.x += 1.0;
    }
    let input = input.clamp_length_max(1.0);

    // Screen-up is world -Z with the fixed follow camera
    let direction = Vec3::new(input.x, 0.0, -input.y);
    let speed = direction.length();
    driver.set_speed(speed);

    if speed < MOVE_DEADZONE {
        controller.translation = Some(gravity);
        return;
    }

    let direction = direction.normalize();
    controller.translation =
        Some(direction * config.combat.move_speed * time.delta_secs() + gravity);

    let target = Transform::default().looking_to(direction, Vec3::Y).rotation;
    let max_step = config.combat.rotate_speed.to_radians() * time.delta_secs();
    transform.rotation = rotate_towards(transform.rotation, target, max_step);
}

/// Smoothly follow the player with a fixed-offset camera.
fn follow_camera(
    time: Res<Time<Real>>,
    player_query: Query<&Transform, (With<Player>, Without<PlayerCamera>)>,
    mut camera_query: Query<(&mut Transform, &PlayerCamera), Without<Player>>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let Ok((mut camera_transform, camera)) = camera_query.get_single_mut() else {
        return;
    };

    let target = player_transform.translation + camera.offset;
    let t = (camera.follow_speed * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(target, t);
    camera_transform.look_at(player_transform.translation, Vec3::Y);
}

/// Spawn the player with its punch and kick hazard sensors.
pub fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
) -> Entity {
    let player = commands
        .spawn((
            Player,
            AttackState::default(),
            AnimationDriver::default(),
            Mesh3d(meshes.add(Capsule3d::new(0.3, 1.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.2, 0.45, 0.85))),
            Transform::from_translation(position),
            Visibility::default(),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.3),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                snap_to_ground: Some(CharacterLength::Absolute(0.5)),
                ..default()
            },
        ))
        .id();

    let mut punch = Entity::PLACEHOLDER;
    let mut kick = Entity::PLACEHOLDER;
    commands.entity(player).with_children(|parent| {
        punch = parent
            .spawn(hazard_sensor(
                AttackKind::Punch,
                player,
                Vec3::new(0.0, 0.4, -0.7),
                0.35,
            ))
            .id();
        kick = parent
            .spawn(hazard_sensor(
                AttackKind::Kick,
                player,
                Vec3::new(0.0, -0.4, -0.8),
                0.45,
            ))
            .id();
    });
    commands.entity(player).insert(HazardVolumes { punch, kick });

    player
}

fn hazard_sensor(kind: AttackKind, owner: Entity, offset: Vec3, radius: f32) -> impl Bundle {
    (
        HazardVolume::new(kind, owner),
        Name::new(format!("{} Collider", kind.label())),
        Transform::from_translation(offset),
        Collider::ball(radius),
        Sensor,
        ColliderDisabled,
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
    )
}

/// Spawn the follow camera.
pub fn spawn_camera(commands: &mut Commands, focus: Vec3) -> Entity {
    let camera = PlayerCamera::default();
    let position = focus + camera.offset;
    commands
        .spawn((
            Camera3d::default(),
            Transform::from_translation(position).looking_at(focus, Vec3::Y),
            camera,
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_towards_is_capped_per_step() {
        let current = Quat::IDENTITY;
        let target = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);

        let step = rotate_towards(current, target, 0.1);
        assert!((current.angle_between(step) - 0.1).abs() < 1e-4);

        let done = rotate_towards(current, target, 10.0);
        assert!(done.abs_diff_eq(target, 1e-6));
    }
}
