//! Game configuration loaded from external RON file.
//!
//! Allows tweaking combat, timing, scoring and audio without recompilation.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;
use crate::core::AttackKind;

pub const GAME_CONFIG_PATH: &str = "assets/data/game_config.ron";

/// Read and parse a RON data file.
pub fn read_ron_file<T: DeserializeOwned>(path: &str) -> Result<T, DataLoadError> {
    if !Path::new(path).exists() {
        return Err(DataLoadError::FileNotFound(path.to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.to_string(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })
}

/// Timeline of one attack animation, in seconds from the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AttackClip {
    /// When the hazard volume switches on
    pub enable_at: f32,
    /// When the hazard volume switches off
    pub disable_at: f32,
    /// Total clip length; the attack state resets here
    pub length: f32,
}

/// Attack forces and animation timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub punch_force: f32,
    pub kick_force: f32,
    /// Added to the normalized attack direction before renormalizing
    pub upward_force_multiplier: f32,
    pub punch_clip: AttackClip,
    pub kick_clip: AttackClip,
    /// Height of the wall-check ray origin above the attacker's origin
    pub torso_height: f32,
    pub move_speed: f32,
    /// Degrees per second
    pub rotate_speed: f32,
    /// How long the concentration-line overlay stays up after a hit
    pub concentration_effect_duration: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            punch_force: 1000.0,
            kick_force: 800.0,
            upward_force_multiplier: 0.5,
            punch_clip: AttackClip {
                enable_at: 0.15,
                disable_at: 0.3,
                length: 0.6,
            },
            kick_clip: AttackClip {
                enable_at: 0.2,
                disable_at: 0.4,
                length: 0.8,
            },
            torso_height: 0.4,
            move_speed: 5.0,
            rotate_speed: 500.0,
            concentration_effect_duration: 0.1,
        }
    }
}

impl CombatConfig {
    pub fn force(&self, kind: AttackKind) -> f32 {
        match kind {
            AttackKind::Punch => self.punch_force,
            AttackKind::Kick => self.kick_force,
        }
    }

    pub fn clip(&self, kind: AttackKind) -> AttackClip {
        match kind {
            AttackKind::Punch => self.punch_clip,
            AttackKind::Kick => self.kick_clip,
        }
    }
}

/// Slow motion applied on every landed hit.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SlowMotionConfig {
    /// Real-time seconds
    pub duration: f32,
    pub time_scale: f32,
}

impl Default for SlowMotionConfig {
    fn default() -> Self {
        Self {
            duration: 0.2,
            time_scale: 0.1,
        }
    }
}

/// Session timing and the boss knock-out push.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds on the clock at stage start
    pub time_limit: f32,
    /// Real-time seconds to bring the clock back to normal after the end
    pub result_ramp_duration: f32,
    /// Real-time seconds between the ramp and the result screen
    pub result_delay: f32,
    pub boss_push_force: f32,
    /// Maximum random sideways component mixed into the boss push
    pub boss_push_lateral: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit: 30.0,
            result_ramp_duration: 0.5,
            result_delay: 1.5,
            boss_push_force: 300.0,
            boss_push_lateral: 0.3,
        }
    }
}

/// Tag to score lookup used when a target declares no score of its own.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable(pub HashMap<String, u32>);

impl Default for ScoreTable {
    fn default() -> Self {
        Self(HashMap::from([
            ("Crate".to_string(), 10),
            ("Barrel".to_string(), 20),
            ("Enemy".to_string(), 100),
        ]))
    }
}

impl ScoreTable {
    pub fn get(&self, tag: &str) -> Option<u32> {
        self.0.get(tag).copied()
    }
}

/// Asset paths for hit and miss sounds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    /// Sound category → audio asset path
    pub hit_sounds: HashMap<String, String>,
    pub default_hit_sound: Option<String>,
    pub swing_sound: Option<String>,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            hit_sounds: HashMap::from([
                ("Wood".to_string(), "sounds/hit_wood.ogg".to_string()),
                ("Metal".to_string(), "sounds/hit_metal.ogg".to_string()),
                ("Body".to_string(), "sounds/hit_body.ogg".to_string()),
            ]),
            default_hit_sound: Some("sounds/hit_default.ogg".to_string()),
            swing_sound: Some("sounds/swing.ogg".to_string()),
        }
    }
}

/// Lifetime of the transient hit effect.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HitEffectConfig {
    pub particle_duration: Option<f32>,
    pub start_lifetime: Option<f32>,
    /// Used when the particle timing is not known
    pub fallback_lifetime: f32,
    pub radius: f32,
}

impl Default for HitEffectConfig {
    fn default() -> Self {
        Self {
            particle_duration: Some(0.3),
            start_lifetime: Some(0.2),
            fallback_lifetime: 2.0,
            radius: 0.25,
        }
    }
}

impl HitEffectConfig {
    /// Seconds the effect should live before despawning.
    pub fn lifetime(&self) -> f32 {
        match self.particle_duration {
            Some(duration) => duration + self.start_lifetime.unwrap_or(0.0),
            None => self.fallback_lifetime,
        }
    }
}

/// The boss's idle taunts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TauntConfig {
    pub phrases: Vec<String>,
    /// Seconds of silence before each phrase
    pub interval: f32,
    pub min_display_time: f32,
    pub max_display_time: f32,
    /// Radians per second while turning to face the player
    pub turn_speed: f32,
}

impl Default for TauntConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Is that all you've got?".to_string(),
                "My grandma hits harder!".to_string(),
                "Come on, try me!".to_string(),
            ],
            interval: 7.0,
            min_display_time: 2.0,
            max_display_time: 5.0,
            turn_speed: 5.0,
        }
    }
}

/// All tuning values, loaded from assets/data/game_config.ron.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub combat: CombatConfig,
    pub slow_motion: SlowMotionConfig,
    pub session: SessionConfig,
    pub scoring: ScoreTable,
    pub sounds: SoundConfig,
    pub hit_effect: HitEffectConfig,
    pub taunts: TauntConfig,
}

impl GameConfig {
    /// Load the config from RON, falling back to defaults.
    pub fn load() -> Self {
        match read_ron_file(GAME_CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded game config from {}", GAME_CONFIG_PATH);
                config
            }
            Err(DataLoadError::FileNotFound(path)) => {
                warn!("Could not find {}. Using defaults.", path);
                Self::default()
            }
            Err(e) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }
}

/// System to load the game config at startup.
pub fn load_game_config(mut commands: Commands) {
    commands.insert_resource(GameConfig::load());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults_for_missing_sections() {
        let config: GameConfig = ron::from_str(
            r#"(
                combat: (punch_force: 1500.0),
                scoring: { "Crate": 50 },
            )"#,
        )
        .expect("config should parse");

        assert_eq!(config.combat.punch_force, 1500.0);
        assert_eq!(config.combat.kick_force, 800.0);
        assert_eq!(config.scoring.get("Crate"), Some(50));
        assert_eq!(config.scoring.get("Enemy"), None);
        assert_eq!(config.slow_motion.time_scale, 0.1);
    }

    #[test]
    fn effect_lifetime_uses_particle_timing_or_fallback() {
        let mut effect = HitEffectConfig::default();
        assert!((effect.lifetime() - 0.5).abs() < 1e-6);

        effect.particle_duration = None;
        assert_eq!(effect.lifetime(), 2.0);
    }

    #[test]
    fn missing_file_is_reported() {
        let result: Result<GameConfig, _> = read_ron_file("assets/data/does_not_exist.ron");
        assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
    }
}
