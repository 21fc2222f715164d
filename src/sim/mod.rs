//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, fixed per-tick constants
//! - Seeded RNG only, owned by the game state
//! - Stable iteration order (platform list order, spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod enemy;
pub mod level;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Rect, intersects};
pub use enemy::Enemy;
pub use level::{LevelKind, LevelLayout, coin_on_platform, generate_level};
pub use player::Player;
pub use state::{
    Coin, CoinView, Door, EnemyView, GameEvent, GamePhase, GameState, Platform, PlatformView,
    PlayerView, RenderSnapshot, Scene,
};
pub use tick::{TickInput, tick};
