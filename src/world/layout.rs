//! Arena layout - where the props of a stage go.

use bevy::prelude::*;

/// Half the side length of the square arena floor.
pub const ARENA_HALF_SIZE: f32 = 10.0;

/// Distance of the prop ring from the arena centre.
pub const PROP_RING_RADIUS: f32 = 5.0;

pub const PLAYER_START: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const BOSS_START: Vec3 = Vec3::new(0.0, 0.0, -7.5);

/// Kind of scored prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    Crate,
    Barrel,
    /// Crate with its own score value
    BonusCrate,
}

impl PropKind {
    /// Gameplay tag used for the score table.
    pub fn tag(self) -> &'static str {
        match self {
            PropKind::Crate | PropKind::BonusCrate => "Crate",
            PropKind::Barrel => "Barrel",
        }
    }

    pub fn sound_category(self) -> &'static str {
        match self {
            PropKind::Crate | PropKind::BonusCrate => "Wood",
            PropKind::Barrel => "Metal",
        }
    }

    /// Per-object score override.
    pub fn declared_score(self) -> Option<u32> {
        match self {
            PropKind::BonusCrate => Some(50),
            _ => None,
        }
    }
}

/// One placed prop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropPlacement {
    pub kind: PropKind,
    /// Position of the prop's base on the floor
    pub position: Vec3,
}

/// Props evenly spaced on a ring around the arena centre.
///
/// Every third prop is a barrel and every fifth a bonus crate.
pub fn prop_ring(count: u32, radius: f32) -> Vec<PropPlacement> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let kind = if (i + 1) % 5 == 0 {
                PropKind::BonusCrate
            } else if (i + 1) % 3 == 0 {
                PropKind::Barrel
            } else {
                PropKind::Crate
            };
            PropPlacement {
                kind,
                position: Vec3::new(angle.sin() * radius, 0.0, angle.cos() * radius),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_places_every_prop_on_the_circle() {
        let props = prop_ring(6, 5.0);
        assert_eq!(props.len(), 6);
        for prop in &props {
            assert!((prop.position.length() - 5.0).abs() < 1e-4);
            assert_eq!(prop.position.y, 0.0);
        }
    }

    #[test]
    fn ring_mixes_prop_kinds() {
        let kinds: Vec<_> = prop_ring(6, 5.0).into_iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PropKind::Crate,
                PropKind::Crate,
                PropKind::Barrel,
                PropKind::Crate,
                PropKind::BonusCrate,
                PropKind::Barrel,
            ]
        );
    }

    #[test]
    fn empty_ring() {
        assert!(prop_ring(0, 5.0).is_empty());
    }

    #[test]
    fn only_bonus_crates_declare_a_score() {
        assert_eq!(PropKind::BonusCrate.declared_score(), Some(50));
        assert_eq!(PropKind::Crate.declared_score(), None);
        assert_eq!(PropKind::Barrel.tag(), "Barrel");
    }
}
