//! Ragdoll transition and boss behaviour systems.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use super::components::*;
use crate::config::GameConfig;
use crate::core::{RagdollForce, RagdollRequest};
use crate::session::SessionEnded;
use crate::player::{rotate_towards, AnimationDriver, AnimationTrigger, Player};

/// Limb closest to `point`, by straight-line distance.
pub fn nearest_limb(point: Vec3, limbs: impl IntoIterator<Item = (Entity, Vec3)>) -> Option<Entity> {
    limbs
        .into_iter()
        .min_by(|(_, a), (_, b)| {
            a.distance_squared(point)
                .total_cmp(&b.distance_squared(point))
        })
        .map(|(entity, _)| entity)
}

/// Knock-out push for the boss: its up vector plus a random sideways nudge.
pub fn boss_push_force(up: Vec3, lateral: f32, magnitude: f32, rng: &mut impl Rng) -> Vec3 {
    let lateral = lateral.abs();
    let offset = if lateral > 0.0 {
        Vec3::new(
            rng.gen_range(-lateral..=lateral),
            0.0,
            rng.gen_range(-lateral..=lateral),
        )
    } else {
        Vec3::ZERO
    };
    let direction = (up.normalize_or_zero() + offset).normalize_or_zero();
    direction * magnitude
}

/// Switch bosses between animated and ragdoll bodies.
pub fn set_ragdoll(
    mut commands: Commands,
    mut requests: EventReader<RagdollRequest>,
    mut bosses: Query<(
        &mut RagdollState,
        &mut AnimationDriver,
        &RagdollLimbs,
        Option<&mut TauntLoop>,
    )>,
    mut limb_bodies: Query<&mut RigidBody, With<RagdollLimb>>,
    mut taunt_line: ResMut<TauntLine>,
) {
    for request in requests.read() {
        let Ok((mut state, mut driver, limbs, taunt)) = bosses.get_mut(request.enemy) else {
            warn!("Ragdoll request for {:?} which has no ragdoll", request.enemy);
            continue;
        };

        if state.set(request.enable) {
            info!("{:?} is now {:?}", request.enemy, *state);
        }
        driver.enabled = !request.enable;
        if !request.enable {
            driver.set_trigger(AnimationTrigger::Idle);
        }

        for &limb in &limbs.0 {
            if let Ok(mut body) = limb_bodies.get_mut(limb) {
                *body = if request.enable {
                    RigidBody::Dynamic
                } else {
                    RigidBody::KinematicPositionBased
                };
            }
            // Limb colliders would fight the animated pose
            if request.enable {
                commands.entity(limb).remove::<ColliderDisabled>();
            } else {
                commands.entity(limb).insert(ColliderDisabled);
            }
        }

        if request.enable {
            if let Some(mut taunt) = taunt {
                taunt.stop();
                taunt_line.text = None;
            }
        }
    }
}

/// Silence every boss taunt once the session is over.
pub fn silence_taunts(
    mut ended: EventReader<SessionEnded>,
    mut taunts: Query<&mut TauntLoop>,
    mut taunt_line: ResMut<TauntLine>,
) {
    if ended.read().last().is_none() {
        return;
    }
    for mut taunt in taunts.iter_mut() {
        taunt.stop();
    }
    taunt_line.text = None;
}

/// Push the limb nearest to the hit point. Ignored unless ragdolled.
pub fn apply_ragdoll_force(
    mut commands: Commands,
    mut forces: EventReader<RagdollForce>,
    bosses: Query<(&RagdollState, &RagdollLimbs)>,
    limbs: Query<(&GlobalTransform, Option<&ReadMassProperties>), With<RagdollLimb>>,
) {
    for event in forces.read() {
        let Ok((state, limb_list)) = bosses.get(event.enemy) else {
            continue;
        };
        if !state.is_ragdoll() {
            debug!("Ragdoll force on {:?} ignored while animated", event.enemy);
            continue;
        }

        let positions = limb_list
            .0
            .iter()
            .filter_map(|&limb| limbs.get(limb).ok().map(|(t, _)| (limb, t.translation())));
        let Some(limb) = nearest_limb(event.point, positions) else {
            continue;
        };
        let Ok((transform, mass)) = limbs.get(limb) else {
            continue;
        };

        let center_of_mass = transform.transform_point(mass.map_or(Vec3::ZERO, |m| m.get().local_center_of_mass));
        commands.entity(limb).insert(ExternalImpulse::at_point(
            event.force,
            event.point,
            center_of_mass,
        ));
    }
}

/// Hold animated limbs in their rest pose around the root.
pub fn pose_animated_limbs(
    bosses: Query<(&RagdollState, &Transform), (With<Boss>, Without<RagdollLimb>)>,
    mut limbs: Query<(&RagdollLimb, &mut Transform), Without<Boss>>,
) {
    for (limb, mut transform) in limbs.iter_mut() {
        let Ok((state, root)) = bosses.get(limb.owner) else {
            continue;
        };
        if state.is_ragdoll() {
            continue;
        }
        *transform = root.mul_transform(limb.rest);
    }
}

/// Turn animated bosses to face the player.
pub fn face_player(
    time: Res<Time>,
    config: Res<GameConfig>,
    player: Query<&Transform, (With<Player>, Without<Boss>)>,
    mut bosses: Query<(&mut Transform, &AnimationDriver, &RagdollState), (With<Boss>, Without<Player>)>,
) {
    let Ok(player) = player.get_single() else {
        return;
    };

    for (mut transform, driver, state) in bosses.iter_mut() {
        if !driver.enabled || state.is_ragdoll() {
            continue;
        }

        let mut direction = player.translation - transform.translation;
        direction.y = 0.0;
        if direction.length_squared() < 1e-4 {
            continue;
        }

        let target = Transform::default()
            .looking_to(direction.normalize(), Vec3::Y)
            .rotation;
        transform.rotation = rotate_towards(
            transform.rotation,
            target,
            config.taunts.turn_speed * time.delta_secs(),
        );
    }
}

/// Advance taunt loops and publish the phrase on screen.
pub fn tick_taunts(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut taunts: Query<&mut TauntLoop, With<Boss>>,
    mut taunt_line: ResMut<TauntLine>,
) {
    let mut rng = rand::thread_rng();
    for mut taunt in taunts.iter_mut() {
        match taunt.tick(time.delta(), &config.taunts, &mut rng) {
            TauntStep::Show(phrase) => {
                debug!("Boss taunts: {}", phrase);
                taunt_line.text = Some(phrase);
            }
            TauntStep::Hide => taunt_line.text = None,
            TauntStep::Quiet => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionOutcome;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn boss_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<RagdollRequest>()
            .add_event::<SessionEnded>()
            .init_resource::<TauntLine>()
            .add_systems(Update, (set_ragdoll, silence_taunts));
        app
    }

    /// Animated boss with two limbs, as the stage spawns it.
    fn spawn_test_boss(world: &mut World) -> (Entity, Vec<Entity>) {
        let limbs: Vec<Entity> = (0..2)
            .map(|_| {
                world
                    .spawn((
                        RagdollLimb {
                            owner: Entity::PLACEHOLDER,
                            rest: Transform::IDENTITY,
                        },
                        RigidBody::KinematicPositionBased,
                        Collider::ball(0.2),
                        ColliderDisabled,
                    ))
                    .id()
            })
            .collect();
        let boss = world
            .spawn((
                Boss,
                RagdollState::default(),
                AnimationDriver::default(),
                TauntLoop::new(1.0),
                RigidBody::KinematicPositionBased,
                Collider::cuboid(0.35, 0.45, 0.2),
                RagdollLimbs(limbs.clone()),
            ))
            .id();
        (boss, limbs)
    }

    fn request(app: &mut App, enemy: Entity, enable: bool) {
        app.world_mut().send_event(RagdollRequest { enemy, enable });
        app.update();
    }

    #[test]
    fn ragdoll_hands_limbs_to_physics_and_stops_taunt() {
        let mut app = boss_app();
        let (boss, limbs) = spawn_test_boss(app.world_mut());
        app.world_mut().resource_mut::<TauntLine>().text = Some("Come on!".to_string());

        request(&mut app, boss, true);

        let world = app.world();
        for &limb in &limbs {
            assert_eq!(world.get::<RigidBody>(limb), Some(&RigidBody::Dynamic));
            assert!(!world.entity(limb).contains::<ColliderDisabled>());
        }
        assert!(!world.entity(boss).contains::<ColliderDisabled>());
        assert_eq!(world.get::<RagdollState>(boss), Some(&RagdollState::Ragdoll));
        assert!(!world.get::<AnimationDriver>(boss).unwrap().enabled);
        assert!(world.get::<TauntLoop>(boss).unwrap().is_stopped());
        assert_eq!(world.resource::<TauntLine>().text, None);
    }

    #[test]
    fn animated_mode_restores_kinematic_limbs_and_idle() {
        let mut app = boss_app();
        let (boss, limbs) = spawn_test_boss(app.world_mut());

        request(&mut app, boss, true);
        request(&mut app, boss, false);

        let world = app.world();
        for &limb in &limbs {
            assert_eq!(world.get::<RigidBody>(limb), Some(&RigidBody::KinematicPositionBased));
            assert!(world.entity(limb).contains::<ColliderDisabled>());
        }
        assert!(!world.entity(boss).contains::<ColliderDisabled>());
        assert_eq!(world.get::<RagdollState>(boss), Some(&RagdollState::Animated));

        let driver = world.get::<AnimationDriver>(boss).unwrap();
        assert!(driver.enabled);
        assert_eq!(driver.last_trigger, Some(AnimationTrigger::Idle));
    }

    #[test]
    fn session_end_silences_taunts() {
        let mut app = boss_app();
        let (boss, _) = spawn_test_boss(app.world_mut());
        app.world_mut().resource_mut::<TauntLine>().text = Some("Too slow!".to_string());

        app.world_mut().send_event(SessionEnded {
            outcome: SessionOutcome {
                stage_index: 0,
                cleared: false,
                boss_defeated: false,
                final_score: 0,
                score_to_clear: 100,
                unlocked_next: false,
                next_available: false,
            },
        });
        app.update();

        assert!(app.world().get::<TauntLoop>(boss).unwrap().is_stopped());
        assert_eq!(app.world().resource::<TauntLine>().text, None);
        assert_eq!(app.world().get::<RagdollState>(boss), Some(&RagdollState::Animated));
    }

    #[test]
    fn nearest_limb_picks_closest() {
        let head = Entity::from_raw(1);
        let foot = Entity::from_raw(2);
        let limbs = [(head, Vec3::new(0.0, 2.0, 0.0)), (foot, Vec3::new(0.0, 0.1, 0.0))];

        assert_eq!(nearest_limb(Vec3::new(0.0, 1.8, 0.3), limbs), Some(head));
        assert_eq!(nearest_limb(Vec3::ZERO, limbs), Some(foot));
        assert_eq!(nearest_limb(Vec3::ZERO, []), None);
    }

    #[test]
    fn push_force_keeps_magnitude_and_stays_mostly_up() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let force = boss_push_force(Vec3::Y, 0.3, 300.0, &mut rng);
            assert!((force.length() - 300.0).abs() < 1e-2);
            assert!(force.normalize().dot(Vec3::Y) > 0.9);
        }
    }

    #[test]
    fn push_force_without_lateral_is_straight_up() {
        let mut rng = StdRng::seed_from_u64(1);
        let force = boss_push_force(Vec3::Y * 2.0, 0.0, 50.0, &mut rng);
        assert!(force.abs_diff_eq(Vec3::new(0.0, 50.0, 0.0), 1e-4));
    }
}
