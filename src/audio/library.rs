//! Sound handles and hit-sound lookup.

use bevy::prelude::*;
use bevy_kira_audio::AudioSource;
use std::collections::HashMap;

use crate::config::SoundConfig;

/// Clip for a hit: the category's own clip, else the default clip.
///
/// Returns `None` when neither exists; the hit then plays silently.
pub fn resolve_hit_clip<'a, T>(
    category: Option<&str>,
    mapped: &'a HashMap<String, T>,
    default: Option<&'a T>,
) -> Option<&'a T> {
    if let Some(clip) = category.and_then(|c| mapped.get(c)) {
        return Some(clip);
    }
    if let Some(category) = category {
        debug!("No hit sound for category '{}', using default", category);
    }
    default
}

/// Loaded hit and swing sounds.
#[derive(Resource, Default)]
pub struct SoundLibrary {
    pub hit: HashMap<String, Handle<AudioSource>>,
    pub default_hit: Option<Handle<AudioSource>>,
    pub swing: Option<Handle<AudioSource>>,
}

impl SoundLibrary {
    pub fn load(config: &SoundConfig, asset_server: &AssetServer) -> Self {
        Self {
            hit: config
                .hit_sounds
                .iter()
                .map(|(category, path)| (category.clone(), asset_server.load(path.clone())))
                .collect(),
            default_hit: config.default_hit_sound.clone().map(|p| asset_server.load(p)),
            swing: config.swing_sound.clone().map(|p| asset_server.load(p)),
        }
    }

    pub fn hit_clip(&self, category: Option<&str>) -> Option<&Handle<AudioSource>> {
        resolve_hit_clip(category, &self.hit, self.default_hit.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped() -> HashMap<String, &'static str> {
        HashMap::from([("Wood".to_string(), "wood.ogg")])
    }

    #[test]
    fn mapped_category_wins() {
        let map = mapped();
        assert_eq!(
            resolve_hit_clip(Some("Wood"), &map, Some(&"default.ogg")),
            Some(&"wood.ogg")
        );
    }

    #[test]
    fn unknown_category_falls_back_to_default() {
        let map = mapped();
        assert_eq!(
            resolve_hit_clip(Some("Glass"), &map, Some(&"default.ogg")),
            Some(&"default.ogg")
        );
        assert_eq!(resolve_hit_clip(None, &map, Some(&"default.ogg")), Some(&"default.ogg"));
    }

    #[test]
    fn nothing_to_play_without_default() {
        let map = mapped();
        assert_eq!(resolve_hit_clip(Some("Glass"), &map, None), None);
    }
}
