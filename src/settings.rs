//! Game settings and preferences
//!
//! Persisted separately from the score history in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::audio::Channel;
use crate::input::KeyBindings;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Controls ===
    pub keys: KeyBindings,

    // === Frame pacing ===
    /// Longest frame the driver will simulate in one tick (seconds)
    pub max_frame_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx_volume: 0.6,
            music_volume: 0.4,
            muted: false,
            keys: KeyBindings::default(),
            max_frame_dt: 0.1,
        }
    }
}

impl Settings {
    /// Volume for a channel
    pub fn volume(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Effects => self.sfx_volume,
            Channel::Music => self.music_volume,
        }
    }

    /// Set a channel volume, clamped to 0.0 - 1.0
    pub fn set_volume(&mut self, channel: Channel, level: f32) {
        let level = level.clamp(0.0, 1.0);
        match channel {
            Channel::Effects => self.sfx_volume = level,
            Channel::Music => self.music_volume = level,
        }
    }

    /// Clamp a raw frame delta to what the simulation will accept
    pub fn clamp_frame_dt(&self, dt: f32) -> f32 {
        dt.clamp(0.0, self.max_frame_dt)
    }

    /// Parse stored settings. Unreadable JSON is logged and yields `None`.
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                None
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "corgi_run_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.volume(Channel::Effects), 0.6);
        assert_eq!(settings.volume(Channel::Music), 0.4);
        assert_eq!(settings.max_frame_dt, 0.1);
    }

    #[test]
    fn test_volume_clamped() {
        let mut settings = Settings::default();
        settings.set_volume(Channel::Music, 1.7);
        settings.set_volume(Channel::Effects, -0.2);
        assert_eq!(settings.music_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_clamp_frame_dt() {
        let settings = Settings::default();
        assert_eq!(settings.clamp_frame_dt(0.016), 0.016);
        assert_eq!(settings.clamp_frame_dt(3.0), 0.1);
        assert_eq!(settings.clamp_frame_dt(-1.0), 0.0);
    }

    #[test]
    fn test_corrupt_json_rejected() {
        assert_eq!(Settings::from_json("{not json"), None);
        assert_eq!(Settings::from_json(r#"{"sfx_volume":"loud"}"#), None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"music_volume":0.9}"#).unwrap();
        assert_eq!(settings.music_volume, 0.9);
        assert_eq!(settings.sfx_volume, 0.6);
        assert_eq!(settings.keys, KeyBindings::default());
    }
}
