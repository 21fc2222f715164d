//! Fixed-step simulation tick
//!
//! Core game loop that advances the simulation one frame at a time. Menu
//! intents are handled every tick; physics, spawners and pickups only run
//! while `Playing`.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::collision::intersects;
use super::enemy::Enemy;
use super::level::coin_on_platform;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held horizontal direction: -1 left, 0 none, +1 right
    pub move_axis: f32,
    /// Jump pressed this tick
    pub jump: bool,
    /// Pause / back to menu
    pub pause: bool,
    /// Restart after game over
    pub restart: bool,
    /// Confirm (start or resume from the menu, dismiss victory)
    pub confirm: bool,
}

/// Ticks between enemy spawns for a level
pub fn enemy_spawn_interval(level: u32) -> u32 {
    200u32.saturating_sub(level * 20).max(50)
}

/// Maximum simultaneous enemies for a level
pub fn max_enemies(level: u32) -> usize {
    3 + (level / 2) as usize
}

/// Enemy walking speed for a level
pub fn enemy_speed(level: u32) -> f32 {
    1.5 + level as f32 * 0.3
}

/// Maximum coins on screen before periodic spawning pauses
pub fn max_coins(level: u32) -> usize {
    8 + level as usize
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    handle_intents(state, input);

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    if input.jump && state.player.jump() {
        state.emit(GameEvent::Jump);
    }

    // 1. Player motion
    state
        .player
        .update(&state.platforms, input.move_axis, &state.scene);

    // 2. Enemy spawner
    state.enemy_timer += 1;
    if state.enemy_timer >= enemy_spawn_interval(state.level)
        && state.enemies.len() < max_enemies(state.level)
    {
        spawn_enemy(state);
        state.enemy_timer = 0;
    }

    // 3. Coin spawner
    state.coin_timer += 1;
    if state.coin_timer >= COIN_SPAWN_TICKS && state.coins.len() < max_coins(state.level) {
        spawn_coin(state);
        state.coin_timer = 0;
    }

    // 4. Enemy patrols, culling any that left the scene
    for enemy in &mut state.enemies {
        enemy.update(&state.platforms, &state.scene);
    }
    let scene = state.scene;
    state.enemies.retain(|e| !e.is_out_of_bounds(&scene));

    // 5. Enemy contact damage
    let player_rect = state.player.rect();
    let hits: Vec<f32> = state
        .enemies
        .iter()
        .filter(|e| intersects(&player_rect, &e.rect()))
        .map(|e| e.pos.x)
        .collect();
    for enemy_x in hits {
        if !state.player.take_damage(ENEMY_CONTACT_DAMAGE) {
            continue;
        }
        state.player.knockback_from(enemy_x, &state.scene);
        log::debug!("Player hit, health {}", state.player.health);
        state.emit(GameEvent::PlayerHit {
            health: state.player.health,
        });
        if state.player.is_dead() {
            state.set_phase(GamePhase::GameOver);
            state.can_resume = false;
            state.emit(GameEvent::EnemyAmbientStop);
            return;
        }
    }

    // 6. Coin pickup; coins flagged on an earlier tick are dropped first
    state.coins.retain(|c| !c.collected);
    let player_rect = state.player.rect();
    let mut collected = 0;
    for coin in &mut state.coins {
        if intersects(&player_rect, &coin.rect()) {
            coin.collected = true;
            collected += 1;
        }
    }
    for _ in 0..collected {
        state.player.coins += 1;
        state.emit(GameEvent::CoinCollected);
    }

    // 7. Door
    if intersects(&state.player.rect(), &state.door.rect()) {
        complete_level(state);
    }
}

/// Map menu/back intents onto phase transitions
fn handle_intents(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Playing => {
            if input.pause {
                state.back_to_menu();
            }
        }
        GamePhase::MainMenu => {
            if input.confirm && !state.resume() {
                state.start_new_game();
            }
        }
        GamePhase::Instructions | GamePhase::Victory => {
            if input.pause || input.confirm {
                state.back_to_menu();
            }
        }
        GamePhase::GameOver => {
            if input.restart {
                state.start_new_game();
            } else if input.pause {
                state.back_to_menu();
            }
        }
    }
}

/// Drop a new enemy onto a random floating platform
fn spawn_enemy(state: &mut GameState) {
    let Some(platform) = state.platforms[1..].choose(&mut state.rng) else {
        return;
    };
    let span = (platform.width as i32 - 55).max(20);
    let x = platform.x + state.rng.random_range(20..=span) as f32;
    let y = platform.y - ENEMY_SIZE;
    let enemy = Enemy::new(x, y, enemy_speed(state.level));
    log::debug!("Enemy spawned at ({}, {})", x, y);
    state.enemies.push(enemy);
    state.emit(GameEvent::EnemySpawned);
}

/// Add a coin above a random floating platform
fn spawn_coin(state: &mut GameState) {
    let Some(platform) = state.platforms[1..].choose(&mut state.rng) else {
        return;
    };
    let coin = coin_on_platform(platform, &mut state.rng);
    log::debug!("Coin spawned at ({}, {})", coin.pos.x, coin.pos.y);
    state.coins.push(coin);
}

/// Player reached the door: win on the final level, otherwise advance
fn complete_level(state: &mut GameState) {
    state.emit(GameEvent::DoorUsed);
    state.emit(GameEvent::EnemyAmbientStop);

    if state.is_final_level() {
        state.can_resume = false;
        state.set_phase(GamePhase::Victory);
        return;
    }

    state.level += 1;
    state.player.respawn(&state.scene);
    state.player.heal(LEVEL_HEAL);
    state.player.coins += LEVEL_BONUS_COINS;
    state.enemy_timer = 0;
    state.coin_timer = 0;
    state.regenerate_level();
    state.emit(GameEvent::LevelStarted { level: state.level });
}
