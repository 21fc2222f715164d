//! Game state and core simulation types
//!
//! The `GameState` owns every live entity for the current level plus the
//! run-wide progress (level index, timers, phase). Nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::enemy::Enemy;
use super::level::generate_level;
use super::player::Player;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title menu (entry state)
    MainMenu,
    /// How-to-play screen
    Instructions,
    /// Active gameplay, the only phase where the simulation advances
    Playing,
    /// Health ran out
    GameOver,
    /// Door reached on the final level
    Victory,
}

/// Things that happened during a tick
///
/// The host drains these after each tick and forwards them to audio or UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    CoinCollected,
    EnemySpawned,
    DoorUsed,
    /// Silence the looping monster cue
    EnemyAmbientStop,
    PlayerHit { health: i32 },
    LevelStarted { level: u32 },
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Scene dimensions in scene units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            width: SCENE_WIDTH,
            height: SCENE_HEIGHT,
        }
    }
}

impl Scene {
    /// Build a scene, enforcing the minimum size (non-finite input falls back to defaults)
    pub fn clamped(width: f32, height: f32) -> Self {
        let width = if width.is_finite() { width } else { SCENE_WIDTH };
        let height = if height.is_finite() { height } else { SCENE_HEIGHT };
        Self {
            width: width.round().max(MIN_SCENE_WIDTH),
            height: height.round().max(MIN_SCENE_HEIGHT),
        }
    }

    /// Top of the ground strip
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }

    /// Where the player appears at the start of each level
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(SPAWN_X, self.height - SPAWN_HEIGHT)
    }
}

/// A static rectangular surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub is_ground: bool,
}

impl Platform {
    pub fn floating(x: f32, y: f32, width: f32) -> Self {
        Self {
            x,
            y,
            width,
            height: PLATFORM_HEIGHT,
            is_ground: false,
        }
    }

    /// Full-width ground strip at the bottom of the scene
    pub fn ground(scene: &Scene) -> Self {
        Self {
            x: 0.0,
            y: scene.ground_y(),
            width: scene.width,
            height: GROUND_HEIGHT,
            is_ground: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub size: f32,
    /// Set on pickup; the coin is dropped from the level on the following tick
    pub collected: bool,
}

impl Coin {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: COIN_SIZE,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// The level exit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Door {
    /// Door standing centered on top of `platform`
    pub fn on_platform(platform: &Platform) -> Self {
        Self {
            pos: Vec2::new(
                platform.x + (platform.width / 2.0).floor() - DOOR_WIDTH / 2.0,
                platform.y - DOOR_HEIGHT,
            ),
            width: DOOR_WIDTH,
            height: DOOR_HEIGHT,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// Read-only view of the player for drawing
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub facing_right: bool,
    /// False on invincibility flicker ticks
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformView {
    pub rect: Rect,
    pub is_ground: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub direction: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoinView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub collected: bool,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub level: u32,
    pub max_levels: u32,
    pub health: i32,
    pub coins: u32,
    pub scene: Scene,
    pub player: PlayerView,
    pub platforms: Vec<PlatformView>,
    pub enemies: Vec<EnemyView>,
    pub coin_items: Vec<CoinView>,
    pub door: Rect,
    pub can_resume: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from (0 when injected directly)
    pub seed: u64,
    /// Drives level generation and spawners
    pub(crate) rng: Pcg32,
    pub scene: Scene,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub max_levels: u32,
    pub player: Player,
    /// Index 0 is always the ground strip
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub door: Door,
    /// Ticks since the last enemy spawn
    pub enemy_timer: u32,
    /// Ticks since the last coin spawn
    pub coin_timer: u32,
    /// Simulation ticks spent in `Playing`
    pub time_ticks: u64,
    /// A run was left via the menu and can be resumed
    pub can_resume: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and the default scene
    pub fn new(seed: u64) -> Self {
        Self::with_scene(seed, Scene::default())
    }

    pub fn with_scene(seed: u64, scene: Scene) -> Self {
        let mut state = Self::with_rng(Pcg32::seed_from_u64(seed), scene);
        state.seed = seed;
        state
    }

    /// Create a game state driven by an already-constructed generator
    pub fn with_rng(rng: Pcg32, scene: Scene) -> Self {
        let scene = Scene::clamped(scene.width, scene.height);
        let ground = Platform::ground(&scene);
        let mut state = Self {
            seed: 0,
            rng,
            scene,
            phase: GamePhase::MainMenu,
            level: 1,
            max_levels: MAX_LEVELS,
            player: Player::new(&scene),
            door: Door::on_platform(&ground),
            platforms: vec![ground],
            enemies: Vec::new(),
            coins: Vec::new(),
            enemy_timer: 0,
            coin_timer: 0,
            time_ticks: 0,
            can_resume: false,
            events: Vec::new(),
        };
        state.regenerate_level();
        state
    }

    /// Restore a brand-new run at level 1 (phase is left to the caller)
    pub fn reset_full(&mut self) {
        log::info!("Full reset");
        self.player = Player::new(&self.scene);
        self.enemies.clear();
        self.coins.clear();
        self.level = 1;
        self.enemy_timer = 0;
        self.coin_timer = 0;
        self.time_ticks = 0;
        self.can_resume = false;
        self.regenerate_level();
    }

    /// Replace the level layout wholesale for the current level index
    pub fn regenerate_level(&mut self) {
        let layout = generate_level(self.level, self.max_levels, &self.scene, &mut self.rng);
        log::info!(
            "Level {}/{}: {} platforms, {} coins",
            self.level,
            self.max_levels,
            layout.platforms.len(),
            layout.coins.len()
        );
        self.platforms = layout.platforms;
        self.coins = layout.coins;
        self.door = layout.door;
        self.enemies.clear();
        self.emit(GameEvent::EnemyAmbientStop);
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        log::info!("Phase {:?} -> {:?}", self.phase, phase);
        let from = self.phase;
        self.phase = phase;
        self.emit(GameEvent::PhaseChanged { from, to: phase });
    }

    /// Start a fresh run from the menu or after game over
    pub fn start_new_game(&mut self) {
        self.reset_full();
        self.set_phase(GamePhase::Playing);
        self.emit(GameEvent::LevelStarted { level: self.level });
    }

    /// Return to a run that was left via the menu
    ///
    /// Returns false if there is nothing to resume.
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::MainMenu || !self.can_resume {
            return false;
        }
        self.can_resume = false;
        self.set_phase(GamePhase::Playing);
        true
    }

    pub fn open_instructions(&mut self) {
        if self.phase == GamePhase::MainMenu {
            self.set_phase(GamePhase::Instructions);
        }
    }

    /// Back action: leave any phase for the main menu
    ///
    /// Leaving `Playing` keeps the run resumable; leaving a finished run does not.
    pub fn back_to_menu(&mut self) {
        match self.phase {
            GamePhase::Playing => self.can_resume = true,
            GamePhase::GameOver | GamePhase::Victory => self.can_resume = false,
            GamePhase::MainMenu | GamePhase::Instructions => {}
        }
        self.emit(GameEvent::EnemyAmbientStop);
        self.set_phase(GamePhase::MainMenu);
    }

    /// Adopt new scene dimensions and rebuild the current level for them
    pub fn resize(&mut self, width: f32, height: f32) {
        let scene = Scene::clamped(width, height);
        if scene.width != width || scene.height != height {
            log::warn!(
                "Resize {}x{} clamped to {}x{}",
                width,
                height,
                scene.width,
                scene.height
            );
        }
        log::info!("Scene resized to {}x{}", scene.width, scene.height);
        self.scene = scene;
        self.regenerate_level();
        self.player.clamp_to_scene(&self.scene);
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events produced since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_final_level(&self) -> bool {
        self.level >= self.max_levels
    }

    /// Build the per-frame render feed
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            phase: self.phase,
            level: self.level,
            max_levels: self.max_levels,
            health: self.player.health,
            coins: self.player.coins,
            scene: self.scene,
            player: PlayerView {
                x: self.player.pos.x,
                y: self.player.pos.y,
                size: self.player.size,
                facing_right: self.player.facing_right,
                visible: !self.player.is_flash_hidden(),
            },
            platforms: self
                .platforms
                .iter()
                .map(|p| PlatformView {
                    rect: p.rect(),
                    is_ground: p.is_ground,
                })
                .collect(),
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    x: e.pos.x,
                    y: e.pos.y,
                    size: e.size,
                    direction: e.direction,
                })
                .collect(),
            coin_items: self
                .coins
                .iter()
                .map(|c| CoinView {
                    x: c.pos.x,
                    y: c.pos.y,
                    size: c.size,
                    collected: c.collected,
                })
                .collect(),
            door: self.door.rect(),
            can_resume: self.can_resume,
        }
    }
}
