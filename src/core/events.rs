//! Global events used for cross-system communication.
//!
//! The attack resolver emits `HitEvent`s, the hit dispatcher turns them into
//! score, sound and ragdoll requests, and the session coordinator answers
//! with `SessionEnded`. No system calls another directly.

use bevy::prelude::*;

/// The two attacks the player can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackKind {
    Punch,
    Kick,
}

impl AttackKind {
    pub fn label(self) -> &'static str {
        match self {
            AttackKind::Punch => "Punch",
            AttackKind::Kick => "Kick",
        }
    }
}

/// Sent when an active hazard volume lands on a target with a physics body.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HitEvent {
    /// Entity that was hit
    pub target: Entity,
    /// Entity that performed the attack
    pub attacker: Entity,
    /// Impulse to apply to the target body
    pub force: Vec3,
    /// World position of the hit (target position)
    pub point: Vec3,
    pub kind: AttackKind,
}

/// Asks the session coordinator to score a target.
#[derive(Event, Debug, Clone)]
pub struct ScoreRequest {
    pub target: Entity,
    pub tag: String,
    /// Per-object score override, checked before the tag table
    pub declared_score: Option<u32>,
    pub point: Vec3,
}

/// Switches an enemy between animated and ragdoll representation.
#[derive(Event, Debug, Clone, Copy)]
pub struct RagdollRequest {
    pub enemy: Entity,
    pub enable: bool,
}

/// Impulse aimed at the limb of a ragdolled enemy nearest to `point`.
#[derive(Event, Debug, Clone, Copy)]
pub struct RagdollForce {
    pub enemy: Entity,
    pub force: Vec3,
    pub point: Vec3,
}

/// Requests the hit sound for a sound category.
#[derive(Event, Debug, Clone)]
pub struct HitSoundRequest {
    pub category: Option<String>,
}

/// Requests the swing sound played when an attack ends without a hit.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct MissSoundRequest;
