//! Materials shared by the arena geometry and props.

use bevy::prelude::*;

/// Material handles for one stage scene.
pub struct ArenaMaterials {
    pub floor: Handle<StandardMaterial>,
    pub wall: Handle<StandardMaterial>,
    pub wood: Handle<StandardMaterial>,
    pub metal: Handle<StandardMaterial>,
    /// Bonus crates that declare their own score
    pub gold: Handle<StandardMaterial>,
}

impl ArenaMaterials {
    pub fn new(materials: &mut Assets<StandardMaterial>) -> Self {
        Self {
            // Floor - dusty concrete
            floor: materials.add(StandardMaterial {
                base_color: Color::srgb(0.36, 0.35, 0.33),
                perceptual_roughness: 0.95,
                ..default()
            }),
            // Walls - darker block
            wall: materials.add(StandardMaterial {
                base_color: Color::srgb(0.25, 0.24, 0.27),
                perceptual_roughness: 0.8,
                ..default()
            }),
            // Crates - warm brown
            wood: materials.add(StandardMaterial {
                base_color: Color::srgb(0.55, 0.38, 0.2),
                perceptual_roughness: 0.7,
                ..default()
            }),
            // Barrels - painted steel
            metal: materials.add(StandardMaterial {
                base_color: Color::srgb(0.3, 0.4, 0.5),
                perceptual_roughness: 0.3,
                metallic: 0.8,
                ..default()
            }),
            gold: materials.add(StandardMaterial {
                base_color: Color::srgb(0.9, 0.72, 0.2),
                perceptual_roughness: 0.25,
                metallic: 1.0,
                ..default()
            }),
        }
    }
}
