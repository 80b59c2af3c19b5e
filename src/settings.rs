//! Game settings and preferences
//!
//! Persisted separately from world saves, through the same key-value store.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::persistence::{KeyValueStore, PersistError};
use crate::sim::GenParams;

/// World size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WorldPreset {
    /// Small finite world, full redraw
    Classic,
    /// Large world with a bedrock floor, culled redraw
    #[default]
    Deep,
}

impl WorldPreset {
    /// Generation parameters for this preset
    pub fn params(&self) -> GenParams {
        match self {
            WorldPreset::Classic => GenParams::classic(),
            WorldPreset::Deep => GenParams::deep(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// World size for newly generated worlds
    pub world: WorldPreset,
    /// Fixed world seed (None = seed from the clock)
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all sound
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: WorldPreset::Deep,
            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults on any failure
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(SETTINGS_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), PersistError> {
        let json = serde_json::to_string(self)?;
        store.set(SETTINGS_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Flip the mute preference and persist it. Returns the new state.
    ///
    /// The in-memory value changes even if the store rejects the write.
    pub fn toggle_muted(&mut self, store: &mut impl KeyValueStore) -> Result<bool, PersistError> {
        self.muted = !self.muted;
        self.save(store)?;
        Ok(self.muted)
    }
}
