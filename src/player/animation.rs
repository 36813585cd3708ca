//! Attack animation timeline.
//!
//! Clip playback itself is the renderer's business; this module only keeps
//! the authored cue times of each attack clip and fires them as events,
//! on the virtual clock so slow motion stretches them too.

use bevy::prelude::*;

use super::components::AnimationDriver;
use crate::config::AttackClip;
use crate::core::AttackKind;

/// Cue authored on an attack clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineCue {
    EnableCollider(AttackKind),
    DisableCollider(AttackKind),
    ResetAttackState,
}

/// Sent when an attack animation reaches one of its cues.
#[derive(Event, Debug, Clone, Copy)]
pub struct AnimationCue {
    pub entity: Entity,
    pub cue: TimelineCue,
}

/// Playing attack animation on an entity. Removed once the clip ends.
#[derive(Component, Debug, Clone)]
pub struct AttackAnimation {
    pub kind: AttackKind,
    pub clip: AttackClip,
    pub elapsed: f32,
    enable_fired: bool,
    disable_fired: bool,
}

impl AttackAnimation {
    pub fn new(kind: AttackKind, clip: AttackClip) -> Self {
        Self {
            kind,
            clip,
            elapsed: 0.0,
            enable_fired: false,
            disable_fired: false,
        }
    }

    /// Advance the clip and return the cues crossed, in authored order.
    pub fn advance(&mut self, delta: f32) -> Vec<TimelineCue> {
        let mut cues = Vec::new();
        if self.is_finished() {
            return cues;
        }
        self.elapsed += delta;

        if !self.enable_fired && self.elapsed >= self.clip.enable_at {
            self.enable_fired = true;
            cues.push(TimelineCue::EnableCollider(self.kind));
        }
        if self.enable_fired && !self.disable_fired && self.elapsed >= self.clip.disable_at {
            self.disable_fired = true;
            cues.push(TimelineCue::DisableCollider(self.kind));
        }
        if self.elapsed >= self.clip.length {
            cues.push(TimelineCue::ResetAttackState);
        }
        cues
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.clip.length
    }
}

/// Tick attack animations and emit their cues.
pub fn advance_attack_animations(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut AttackAnimation, Option<&AnimationDriver>)>,
    mut cues: EventWriter<AnimationCue>,
) {
    for (entity, mut animation, driver) in query.iter_mut() {
        // A disabled driver freezes the timeline
        if driver.is_some_and(|d| !d.enabled) {
            continue;
        }

        for cue in animation.advance(time.delta_secs()) {
            cues.send(AnimationCue { entity, cue });
        }

        if animation.is_finished() {
            commands.entity(entity).remove::<AttackAnimation>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> AttackClip {
        AttackClip {
            enable_at: 0.1,
            disable_at: 0.3,
            length: 0.5,
        }
    }

    #[test]
    fn cues_fire_in_order_once() {
        let mut anim = AttackAnimation::new(AttackKind::Punch, clip());

        assert!(anim.advance(0.05).is_empty());
        assert_eq!(
            anim.advance(0.1),
            vec![TimelineCue::EnableCollider(AttackKind::Punch)]
        );
        assert!(anim.advance(0.1).is_empty());
        assert_eq!(
            anim.advance(0.1),
            vec![TimelineCue::DisableCollider(AttackKind::Punch)]
        );
        assert_eq!(anim.advance(0.2), vec![TimelineCue::ResetAttackState]);
        assert!(anim.is_finished());
        assert!(anim.advance(0.2).is_empty());
    }

    #[test]
    fn long_frame_crosses_every_cue() {
        let mut anim = AttackAnimation::new(AttackKind::Kick, clip());
        assert_eq!(
            anim.advance(1.0),
            vec![
                TimelineCue::EnableCollider(AttackKind::Kick),
                TimelineCue::DisableCollider(AttackKind::Kick),
                TimelineCue::ResetAttackState,
            ]
        );
    }
}
