//! Attack resolution - decides whether an overlap becomes a hit.
//!
//! Engine queries (hierarchy walk, wall ray, body lookup) are answered by
//! the calling system; this module only makes the decision.

use bevy::prelude::*;

use super::components::{AttackKind, HitEvent};

/// Everything known about one hazard/target overlap.
#[derive(Debug, Clone)]
pub struct OverlapContext {
    pub session_ended: bool,
    pub attacker: Entity,
    pub attacker_position: Vec3,
    pub target: Entity,
    pub target_position: Vec3,
    /// Target is the attacker or part of its hierarchy
    pub is_self: bool,
    /// Target was already struck during this activation window
    pub already_struck: bool,
    pub has_body: bool,
    /// A wall lies between the attacker's torso and the target
    pub occluded: bool,
    pub kind: AttackKind,
}

/// Outcome of an overlap.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlapResolution {
    SessionEnded,
    SelfHit,
    AlreadyStruck,
    NoBody,
    Occluded,
    Hit(HitEvent),
}

/// Knock-back impulse: horizontal push tilted upward, scaled to `force`.
pub fn knockback_force(attacker: Vec3, target: Vec3, upward_multiplier: f32, force: f32) -> Vec3 {
    let direction = (target - attacker).normalize_or_zero();
    (direction + Vec3::Y * upward_multiplier).normalize_or_zero() * force
}

pub fn resolve_overlap(ctx: &OverlapContext, upward_multiplier: f32, force: f32) -> OverlapResolution {
    if ctx.session_ended {
        return OverlapResolution::SessionEnded;
    }
    if ctx.is_self {
        return OverlapResolution::SelfHit;
    }
    if ctx.already_struck {
        return OverlapResolution::AlreadyStruck;
    }
    if !ctx.has_body {
        return OverlapResolution::NoBody;
    }
    if ctx.occluded {
        return OverlapResolution::Occluded;
    }

    OverlapResolution::Hit(HitEvent {
        target: ctx.target,
        attacker: ctx.attacker,
        force: knockback_force(
            ctx.attacker_position,
            ctx.target_position,
            upward_multiplier,
            force,
        ),
        point: ctx.target_position,
        kind: ctx.kind,
    })
}

/// Whether `entity` is `root` or one of its descendants.
pub fn is_part_of(entity: Entity, root: Entity, parent_of: impl Fn(Entity) -> Option<Entity>) -> bool {
    let mut current = Some(entity);
    while let Some(e) = current {
        if e == root {
            return true;
        }
        current = parent_of(e);
    }
    false
}
