//! Combat systems - attack input, hazard windows, hit detection and consequences.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::resolver::{is_part_of, resolve_overlap, OverlapContext, OverlapResolution};
use crate::config::GameConfig;
use crate::core::{GameState, HitSoundRequest, MissSoundRequest, ScoreRequest, SlowMotion};
use crate::player::{AnimationCue, AnimationDriver, AnimationTrigger, AttackAnimation, Player, TimelineCue};
use crate::session::GameSession;

/// Tag reported for targets that carry no `TargetTag`.
const UNTAGGED: &str = "Untagged";

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Input,
    Cues,
    Detection,
    Consequences,
    Feedback,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // Resources
        .init_resource::<ConcentrationFlash>()
        .add_systems(Startup, create_hit_effect_assets)

        // System ordering
        .configure_sets(
            Update,
            (
                CombatSet::Input,
                CombatSet::Cues,
                CombatSet::Detection,
                CombatSet::Consequences,
                CombatSet::Feedback,
            )
                .chain()
                .run_if(in_state(GameState::InStage)),
        )
        .add_systems(Update, combat_input.in_set(CombatSet::Input))
        .add_systems(Update, apply_animation_cues.in_set(CombatSet::Cues))
        .add_systems(Update, detect_hazard_overlaps.in_set(CombatSet::Detection))
        .add_systems(Update, dispatch_hit_consequences.in_set(CombatSet::Consequences))
        .add_systems(
            Update,
            (update_hit_effects, update_concentration_flash).in_set(CombatSet::Feedback),
        );
}

fn create_hit_effect_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(HitEffectAssets {
        mesh: meshes.add(Sphere::new(1.0)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 0.85, 0.3, 0.8),
            emissive: LinearRgba::rgb(4.0, 3.0, 0.8),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        }),
    });
}

/// Handle attack input from the player (J = punch, K = kick).
fn combat_input(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    session: Res<GameSession>,
    mut query: Query<(Entity, &mut AttackState, &mut AnimationDriver), With<Player>>,
) {
    // No gameplay in a session that failed to initialize
    if !session.is_initialized() {
        return;
    }

    let kind = if keyboard.just_pressed(KeyCode::KeyJ) {
        AttackKind::Punch
    } else if keyboard.just_pressed(KeyCode::KeyK) {
        AttackKind::Kick
    } else {
        return;
    };

    let Ok((entity, mut state, mut driver)) = query.get_single_mut() else {
        return;
    };

    if !state.trigger(kind) {
        debug!("{} ignored, attack already in progress", kind.label());
        return;
    }

    driver.set_trigger(match kind {
        AttackKind::Punch => AnimationTrigger::PunchTrigger,
        AttackKind::Kick => AnimationTrigger::KickTrigger,
    });
    commands
        .entity(entity)
        .insert(AttackAnimation::new(kind, config.combat.clip(kind)));
    debug!("{} started", kind.label());
}

fn set_collider_enabled(commands: &mut Commands, entity: Entity, enabled: bool) {
    if enabled {
        commands.entity(entity).remove::<ColliderDisabled>();
    } else {
        commands.entity(entity).insert(ColliderDisabled);
    }
}

/// Open and close hazard windows from animation cues, and end attacks.
fn apply_animation_cues(
    mut commands: Commands,
    mut cues: EventReader<AnimationCue>,
    mut attackers: Query<(&mut AttackState, &HazardVolumes)>,
    mut volumes: Query<&mut HazardVolume>,
    mut miss_sounds: EventWriter<MissSoundRequest>,
) {
    for event in cues.read() {
        let Ok((mut state, hazards)) = attackers.get_mut(event.entity) else {
            continue;
        };

        match event.cue {
            TimelineCue::EnableCollider(kind) => {
                for entity in hazards.iter() {
                    if let Ok(mut volume) = volumes.get_mut(entity) {
                        volume.on_enable_cue(kind);
                        set_collider_enabled(&mut commands, entity, volume.enabled);
                    }
                }
            }
            TimelineCue::DisableCollider(kind) => {
                for entity in hazards.iter() {
                    if let Ok(mut volume) = volumes.get_mut(entity) {
                        if volume.kind == kind {
                            volume.disable();
                            set_collider_enabled(&mut commands, entity, false);
                        }
                    }
                }
            }
            TimelineCue::ResetAttackState => {
                let end = state.end();
                if end.missed {
                    miss_sounds.send(MissSoundRequest);
                }

                // Close both windows whatever the clip did
                for entity in hazards.iter() {
                    if let Ok(mut volume) = volumes.get_mut(entity) {
                        volume.disable();
                    }
                    set_collider_enabled(&mut commands, entity, false);
                }
            }
        }
    }
}

/// Whether a wall collider lies on the segment from `origin` toward `target`.
fn wall_between(
    context: &RapierContext,
    is_wall: impl Fn(Entity) -> bool,
    origin: Vec3,
    target: Vec3,
    max_distance: f32,
) -> bool {
    let direction = (target - origin).normalize_or_zero();
    if direction == Vec3::ZERO {
        return false;
    }

    context
        .cast_ray(
            origin,
            direction,
            max_distance,
            true,
            QueryFilter::default().predicate(&is_wall),
        )
        .is_some()
}

/// Turn hazard sensor overlaps into hit events.
#[allow(clippy::too_many_arguments)]
fn detect_hazard_overlaps(
    mut collisions: EventReader<CollisionEvent>,
    config: Res<GameConfig>,
    session: Res<GameSession>,
    rapier_context: Query<&RapierContext>,
    mut volumes: Query<&mut HazardVolume>,
    mut attackers: Query<&mut AttackState>,
    transforms: Query<&GlobalTransform>,
    bodies: Query<(), With<RigidBody>>,
    parents: Query<&Parent>,
    walls: Query<(), With<Wall>>,
    mut hits: EventWriter<HitEvent>,
) {
    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = *event else {
            continue;
        };

        let (hazard, target) = if volumes.contains(a) {
            (a, b)
        } else if volumes.contains(b) {
            (b, a)
        } else {
            continue;
        };

        let Ok(mut volume) = volumes.get_mut(hazard) else {
            continue;
        };
        if !volume.enabled {
            continue;
        }

        let attacker = volume.owner;
        let (Ok(attacker_transform), Ok(target_transform)) =
            (transforms.get(attacker), transforms.get(target))
        else {
            continue;
        };
        let attacker_position = attacker_transform.translation();
        let target_position = target_transform.translation();

        let occluded = rapier_context.get_single().is_ok_and(|context| {
            wall_between(
                context,
                |entity| walls.contains(entity),
                attacker_position + Vec3::Y * config.combat.torso_height,
                target_position,
                attacker_position.distance(target_position),
            )
        });

        let ctx = OverlapContext {
            session_ended: session.ended(),
            attacker,
            attacker_position,
            target,
            target_position,
            is_self: is_part_of(target, attacker, |e| parents.get(e).ok().map(Parent::get)),
            already_struck: volume.struck.contains(&target),
            has_body: bodies.contains(target),
            occluded,
            kind: volume.kind,
        };

        match resolve_overlap(
            &ctx,
            config.combat.upward_force_multiplier,
            config.combat.force(volume.kind),
        ) {
            OverlapResolution::Hit(hit) => {
                volume.strike(target);
                if let Ok(mut state) = attackers.get_mut(attacker) {
                    state.register_hit();
                }
                info!("{} hit {:?} with force {:.0}", hit.kind.label(), target, hit.force.length());
                hits.send(hit);
            }
            OverlapResolution::Occluded => {
                info!("{} on {:?} blocked by a wall", volume.kind.label(), target);
            }
            other => {
                debug!("Overlap with {:?} ignored: {:?}", target, other);
            }
        }
    }
}

/// Apply force, effects, slow motion and scoring for each landed hit.
#[allow(clippy::too_many_arguments)]
fn dispatch_hit_consequences(
    mut commands: Commands,
    mut hits: EventReader<HitEvent>,
    config: Res<GameConfig>,
    effect_assets: Option<Res<HitEffectAssets>>,
    mut bodies: Query<(&mut RigidBody, Option<&Destructible>, Option<&TargetTag>)>,
    mut slow_motion: ResMut<SlowMotion>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut flash: ResMut<ConcentrationFlash>,
    mut hit_sounds: EventWriter<HitSoundRequest>,
    mut scores: EventWriter<ScoreRequest>,
) {
    for hit in hits.read() {
        let Ok((mut body, destructible, tag)) = bodies.get_mut(hit.target) else {
            continue;
        };

        // Kinematic props only start reacting to physics once struck
        if matches!(
            *body,
            RigidBody::KinematicPositionBased | RigidBody::KinematicVelocityBased
        ) {
            *body = RigidBody::Dynamic;
        }
        commands.entity(hit.target).insert(ExternalImpulse {
            impulse: hit.force,
            torque_impulse: Vec3::ZERO,
        });

        if let Some(assets) = effect_assets.as_ref() {
            let effect = &config.hit_effect;
            commands.spawn((
                HitEffect {
                    lifetime: Timer::from_seconds(effect.lifetime(), TimerMode::Once),
                },
                Mesh3d(assets.mesh.clone()),
                MeshMaterial3d(assets.material.clone()),
                Transform::from_translation(hit.point).with_scale(Vec3::splat(effect.radius)),
            ));
        } else {
            warn!("Hit effect assets missing, skipping hit effect");
        }

        hit_sounds.send(HitSoundRequest {
            category: destructible.and_then(|d| d.sound_category.clone()),
        });

        slow_motion.start(config.slow_motion.time_scale, config.slow_motion.duration);
        virtual_time.set_relative_speed(slow_motion.current_speed());
        flash.trigger(config.combat.concentration_effect_duration);

        scores.send(ScoreRequest {
            target: hit.target,
            tag: tag.map_or_else(|| UNTAGGED.to_string(), |t| t.0.clone()),
            declared_score: destructible.and_then(|d| d.score_value),
            point: hit.point,
        });
    }
}

/// Grow and despawn hit effects.
fn update_hit_effects(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut query: Query<(Entity, &mut HitEffect, &mut Transform)>,
) {
    for (entity, mut effect, mut transform) in query.iter_mut() {
        effect.lifetime.tick(time.delta());
        if effect.lifetime.finished() {
            commands.entity(entity).despawn_recursive();
            continue;
        }
        let grow = 1.0 + effect.lifetime.fraction();
        transform.scale = Vec3::splat(config.hit_effect.radius * grow);
    }
}

fn update_concentration_flash(time: Res<Time>, mut flash: ResMut<ConcentrationFlash>) {
    flash.update(time.delta());
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_rapier3d::rapier::prelude::ColliderBuilder;

    /// Context holding one wall slab across the z axis at `z`.
    fn context_with_wall(wall: Entity, z: f32) -> RapierContext {
        let mut context = RapierContext::default();
        let collider = ColliderBuilder::cuboid(5.0, 2.0, 0.25)
            .translation([0.0, 1.0, z].into())
            .user_data(wall.to_bits() as u128)
            .build();
        context.colliders.insert(collider);
        context.query_pipeline.update(&context.colliders);
        context
    }

    #[test]
    fn wall_on_the_segment_blocks() {
        let wall = Entity::from_raw(7);
        let context = context_with_wall(wall, -3.0);
        let origin = Vec3::new(0.0, 1.0, 0.0);
        let target = Vec3::new(0.0, 1.0, -6.0);

        assert!(wall_between(&context, |e| e == wall, origin, target, 6.0));
    }

    #[test]
    fn wall_beyond_the_target_does_not_block() {
        let wall = Entity::from_raw(7);
        let context = context_with_wall(wall, -3.0);
        let origin = Vec3::new(0.0, 1.0, 0.0);
        let target = Vec3::new(0.0, 1.0, -2.0);

        assert!(!wall_between(&context, |e| e == wall, origin, target, 2.0));
    }

    #[test]
    fn only_wall_colliders_block() {
        let prop = Entity::from_raw(9);
        let context = context_with_wall(prop, -3.0);
        let origin = Vec3::new(0.0, 1.0, 0.0);
        let target = Vec3::new(0.0, 1.0, -6.0);

        assert!(!wall_between(&context, |_| false, origin, target, 6.0));
    }

    #[test]
    fn coincident_points_never_block() {
        let wall = Entity::from_raw(7);
        let context = context_with_wall(wall, 0.0);

        assert!(!wall_between(&context, |e| e == wall, Vec3::Y, Vec3::Y, 0.0));
    }
}
