//! Adventure Dash - a single-screen platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, levels, game state)
//! - `platform`: Host glue (frame clock, held-key input mapping)
//! - `audio`: Named sound hooks with an optional backend
//! - `settings`: Player preferences and scene configuration

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;

pub use audio::{AudioBackend, AudioManager, SoundEffect};
pub use settings::Settings;

/// Game configuration constants
///
/// Distances are scene units (pixels at 1:1 scale), velocities are units per tick,
/// timers are ticks.
pub mod consts {
    /// Simulation rate (one tick per rendered frame)
    pub const TICK_RATE_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default scene dimensions
    pub const SCENE_WIDTH: f32 = 800.0;
    pub const SCENE_HEIGHT: f32 = 600.0;
    /// Smallest scene accepted by a resize. Hand-authored layouts use absolute x
    /// up to the default width and need `H - 350` of headroom.
    pub const MIN_SCENE_WIDTH: f32 = SCENE_WIDTH;
    pub const MIN_SCENE_HEIGHT: f32 = 480.0;

    /// Ground strip thickness at the bottom of the scene
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Floating platform thickness
    pub const PLATFORM_HEIGHT: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const JUMP_POWER: f32 = 12.0;
    /// Second jump is weaker than the first
    pub const DOUBLE_JUMP_FACTOR: f32 = 0.8;
    pub const GRAVITY: f32 = 0.5;
    pub const TERMINAL_FALL_SPEED: f32 = 15.0;
    /// Post-hit grace period (half a second)
    pub const INVINCIBLE_TICKS: u32 = 30;
    /// Spawn point, x from the left edge and y above the scene bottom
    pub const SPAWN_X: f32 = 50.0;
    pub const SPAWN_HEIGHT: f32 = 100.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 35.0;
    /// Patrol turnaround margin from platform edges
    pub const ENEMY_EDGE_MARGIN: f32 = 5.0;
    /// Enemies this far beyond either scene edge are culled
    pub const ENEMY_CULL_DISTANCE: f32 = 100.0;
    pub const ENEMY_CONTACT_DAMAGE: i32 = 10;
    pub const KNOCKBACK_DISTANCE: f32 = 30.0;

    /// Pickups and objective
    pub const COIN_SIZE: f32 = 20.0;
    pub const DOOR_WIDTH: f32 = 30.0;
    pub const DOOR_HEIGHT: f32 = 60.0;

    /// Progression
    pub const MAX_LEVELS: u32 = 5;
    pub const LEVEL_HEAL: i32 = 25;
    pub const LEVEL_BONUS_COINS: u32 = 5;
    pub const COIN_SPAWN_TICKS: u32 = 400;
}

/// Clamp a value into `[min, max]`, collapsing to `min` when the range is empty
#[inline]
pub fn clamp_span(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}
