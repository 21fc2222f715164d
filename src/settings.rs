//! Game settings and preferences
//!
//! Stored as JSON next to the binary (or wherever `ADVENTURE_DASH_SETTINGS`
//! points). Gameplay tuning stays in `crate::consts`; only the host-facing
//! knobs live here.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, SCENE_HEIGHT, SCENE_WIDTH};
use crate::sim::Scene;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "ADVENTURE_DASH_SETTINGS";
/// Settings file used when the variable is unset
pub const DEFAULT_SETTINGS_PATH: &str = "adventure_dash.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial scene size in scene units
    pub scene_width: f32,
    pub scene_height: f32,
    /// Fixed RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// Most ticks the frame clock may run per rendered frame
    pub max_substeps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene_width: SCENE_WIDTH,
            scene_height: SCENE_HEIGHT,
            seed: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl Settings {
    /// Path from the environment, or the default file name
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH))
    }

    /// Load settings, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// A missing file yields defaults quietly; an unreadable or malformed one logs a warning
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the configured path
    pub fn save(&self) -> io::Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Scene for a new game, with the minimum size enforced
    pub fn scene(&self) -> Scene {
        Scene::clamped(self.scene_width, self.scene_height)
    }

    pub fn master_volume(&self) -> f32 {
        clamp_volume(self.master_volume)
    }

    pub fn sfx_volume(&self) -> f32 {
        clamp_volume(self.sfx_volume)
    }

    /// Combined volume, zero when muted
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume() * self.sfx_volume()
        }
    }

    /// Substep cap, never below one
    pub fn max_substeps(&self) -> u32 {
        self.max_substeps.max(1)
    }
}

/// Clamp a volume into `[0, 1]`; non-finite values mute
pub(crate) fn clamp_volume(v: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}
