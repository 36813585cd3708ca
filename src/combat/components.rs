//! Combat-related components.

use bevy::prelude::*;
use std::collections::HashSet;

// Re-export from core to avoid duplication
pub use crate::core::{AttackKind, HitEvent};

/// Attack lifecycle of the player.
#[derive(Component, Debug, Default, Clone, PartialEq, Eq)]
pub struct AttackState {
    /// An attack animation is playing
    pub is_attacking: bool,
    /// The current attack landed on at least one target
    pub has_hit_target: bool,
    pub active_weapon: Option<AttackKind>,
}

/// Result of ending an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackEnd {
    pub kind: Option<AttackKind>,
    /// Nothing was hit, so the swing sound should play
    pub missed: bool,
}

impl AttackState {
    /// Start an attack. Returns false (and changes nothing) while attacking.
    pub fn trigger(&mut self, kind: AttackKind) -> bool {
        if self.is_attacking {
            return false;
        }
        self.is_attacking = true;
        self.has_hit_target = false;
        self.active_weapon = Some(kind);
        true
    }

    pub fn register_hit(&mut self) {
        self.has_hit_target = true;
    }

    /// Finish the current attack and reset to idle.
    pub fn end(&mut self) -> AttackEnd {
        let result = AttackEnd {
            kind: self.active_weapon,
            missed: !self.has_hit_target,
        };
        *self = Self::default();
        result
    }
}

/// Time-windowed collision region of one attack.
///
/// Lives on a sensor collider parented to the attacker. While disabled the
/// collider carries `ColliderDisabled`.
#[derive(Component, Debug, Clone)]
pub struct HazardVolume {
    pub kind: AttackKind,
    pub owner: Entity,
    pub enabled: bool,
    /// Targets already hit during the current activation window
    pub struck: HashSet<Entity>,
}

impl HazardVolume {
    pub fn new(kind: AttackKind, owner: Entity) -> Self {
        Self {
            kind,
            owner,
            enabled: false,
            struck: HashSet::new(),
        }
    }

    /// Apply an enable cue for `kind`.
    ///
    /// Only one volume is live at a time: the matching volume opens a fresh
    /// window and every other volume closes.
    pub fn on_enable_cue(&mut self, kind: AttackKind) {
        if self.kind == kind {
            self.enabled = true;
            self.struck.clear();
        } else {
            self.enabled = false;
        }
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Record a strike. Returns false if the target was already hit this window.
    pub fn strike(&mut self, target: Entity) -> bool {
        self.struck.insert(target)
    }
}

/// Entities of the attacker's punch and kick sensors.
#[derive(Component, Debug, Clone, Copy)]
pub struct HazardVolumes {
    pub punch: Entity,
    pub kick: Entity,
}

impl HazardVolumes {
    pub fn iter(&self) -> impl Iterator<Item = Entity> {
        [self.punch, self.kick].into_iter()
    }
}

/// Gameplay tag of a hittable object ("Crate", "Enemy", ...).
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct TargetTag(pub String);

impl TargetTag {
    pub const ENEMY: &'static str = "Enemy";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Whether `tag` marks the boss.
    pub fn is_enemy(tag: &str) -> bool {
        tag == Self::ENEMY
    }
}

/// Per-object scoring and sound information.
#[derive(Component, Debug, Clone, Default)]
pub struct Destructible {
    /// Overrides the tag score table when set
    pub score_value: Option<u32>,
    /// Hit sound category (matches the sound config keys)
    pub sound_category: Option<String>,
}

/// Marker for colliders that block attacks.
#[derive(Component, Debug, Default)]
pub struct Wall;

/// Transient visual spawned where a hit lands.
#[derive(Component)]
pub struct HitEffect {
    pub lifetime: Timer,
}

/// Shared mesh and material for hit effects.
#[derive(Resource)]
pub struct HitEffectAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Short full-screen "concentration lines" flash after a hit.
#[derive(Resource, Default)]
pub struct ConcentrationFlash {
    pub timer: Option<Timer>,
}

impl ConcentrationFlash {
    pub fn trigger(&mut self, duration: f32) {
        self.timer = Some(Timer::from_seconds(duration, TimerMode::Once));
    }

    pub fn is_visible(&self) -> bool {
        self.timer.is_some()
    }

    pub fn update(&mut self, delta: std::time::Duration) {
        if let Some(timer) = self.timer.as_mut() {
            if timer.tick(delta).finished() {
                self.timer = None;
            }
        }
    }
}
