//! Audio hooks
//!
//! The simulation only emits [`GameEvent`]s. This module turns them into named
//! sound cues and hands them to whatever backend the host attached. With no
//! backend every call is a no-op.

use crate::settings::{Settings, clamp_volume};
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground (single or double jump)
    Jump,
    /// Coin picked up
    CoinCollected,
    /// Monster appeared; loops until stopped
    EnemySpawned,
    /// Level exit reached
    DoorUsed,
}

impl SoundEffect {
    /// Sound cue for a simulation event, if it has one
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jump => Some(SoundEffect::Jump),
            GameEvent::CoinCollected => Some(SoundEffect::CoinCollected),
            GameEvent::EnemySpawned => Some(SoundEffect::EnemySpawned),
            GameEvent::DoorUsed => Some(SoundEffect::DoorUsed),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::CoinCollected => "coin_collected",
            SoundEffect::EnemySpawned => "enemy_spawned",
            SoundEffect::DoorUsed => "door_used",
        }
    }

    /// Mix level before master/sfx scaling
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Jump => 0.3,
            SoundEffect::CoinCollected => 0.3,
            SoundEffect::EnemySpawned => 0.4,
            SoundEffect::DoorUsed => 0.5,
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Start a cue at the given volume (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Stop a cue if it is still sounding
    fn stop(&mut self, effect: SoundEffect);
}

/// Backend that writes each cue to the log
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("play {} at {:.2}", effect.name(), volume);
    }

    fn stop(&mut self, effect: SoundEffect) {
        log::debug!("stop {}", effect.name());
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend: Some(backend),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager with no backend attached
    pub fn silent() -> Self {
        log::info!("No audio backend - audio disabled");
        Self {
            backend: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Apply volume preferences from settings
    pub fn from_settings(backend: Option<Box<dyn AudioBackend>>, settings: &Settings) -> Self {
        let mut manager = match backend {
            Some(backend) => Self::new(backend),
            None => Self::silent(),
        };
        manager.set_master_volume(settings.master_volume());
        manager.set_sfx_volume(settings.sfx_volume());
        manager.set_muted(settings.muted);
        manager
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = clamp_volume(vol);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = clamp_volume(vol);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.base_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play(effect, vol);
    }

    pub fn stop(&mut self, effect: SoundEffect) {
        if let Some(backend) = self.backend.as_mut() {
            backend.stop(effect);
        }
    }

    /// Fire the cues for one tick's worth of events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if *event == GameEvent::EnemyAmbientStop {
                self.stop(SoundEffect::EnemySpawned);
            } else if let Some(effect) = SoundEffect::from_event(event) {
                self.play(effect);
            }
        }
    }
}
