//! Player kinematics
//!
//! Gravity, horizontal movement, single + double jump, and platform collision
//! resolution. One call to [`Player::update`] advances one tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, intersects};
use super::state::{Platform, Scene};
use crate::clamp_span;
use crate::consts::*;

/// The player character
///
/// Persists across levels; health and coins carry over until a full reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (positive = falling)
    pub vel_y: f32,
    pub size: f32,
    /// Horizontal units moved per tick while a direction is held
    pub speed: f32,
    pub jump_power: f32,
    /// Always within `[0, PLAYER_MAX_HEALTH]`
    pub health: i32,
    pub coins: u32,
    pub facing_right: bool,
    pub on_ground: bool,
    pub can_double_jump: bool,
    pub double_jumped: bool,
    /// Remaining grace ticks after a hit
    pub invincible_ticks: u32,
}

impl Player {
    /// Fresh player at the scene's spawn point
    pub fn new(scene: &Scene) -> Self {
        Self {
            pos: scene.spawn_point(),
            vel_y: 0.0,
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            jump_power: JUMP_POWER,
            health: PLAYER_MAX_HEALTH,
            coins: 0,
            facing_right: true,
            on_ground: false,
            can_double_jump: true,
            double_jumped: false,
            invincible_ticks: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    /// Jump from the ground, or double jump once while airborne
    ///
    /// Returns true if an impulse was applied (the caller fires the jump cue).
    pub fn jump(&mut self) -> bool {
        if self.on_ground {
            self.vel_y = -self.jump_power;
            self.on_ground = false;
            true
        } else if !self.double_jumped && self.can_double_jump {
            self.vel_y = -self.jump_power * DOUBLE_JUMP_FACTOR;
            self.double_jumped = true;
            true
        } else {
            false
        }
    }

    /// Advance one tick against the level's platforms
    ///
    /// `move_axis` is the held horizontal direction: negative = left,
    /// positive = right, zero = none. Non-finite values are ignored.
    pub fn update(&mut self, platforms: &[Platform], move_axis: f32, scene: &Scene) {
        if self.invincible_ticks > 0 {
            self.invincible_ticks -= 1;
        }

        self.vel_y = (self.vel_y + GRAVITY).min(TERMINAL_FALL_SPEED);

        let axis = if move_axis.is_finite() {
            move_axis.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        if axis != 0.0 {
            self.pos.x += axis * self.speed;
            self.facing_right = axis > 0.0;
        }
        self.clamp_x(scene);

        self.pos.y += self.vel_y;
        self.on_ground = false;

        // Each platform resolves independently: landing, then head bump, then side push
        for platform in platforms {
            let body = self.rect();
            let surface = platform.rect();
            if !intersects(&body, &surface) {
                continue;
            }

            if self.vel_y > 0.0 && body.bottom() > surface.top() && body.top() < surface.top() {
                self.land_at(surface.top());
            } else if self.vel_y < 0.0
                && body.top() < surface.bottom()
                && body.bottom() > surface.bottom()
            {
                self.pos.y = surface.bottom();
                self.vel_y = 0.0;
            } else if self.vel_y == 0.0 {
                if body.right() > surface.left() && body.left() < surface.left() {
                    self.pos.x = surface.left() - self.size;
                } else if body.left() < surface.right() && body.right() > surface.right() {
                    self.pos.x = surface.right();
                }
            }
        }

        // Hard floor at the ground line, whatever the platforms did
        if self.rect().bottom() > scene.ground_y() {
            self.land_at(scene.ground_y());
        }

        self.clamp_x(scene);
    }

    fn land_at(&mut self, surface_y: f32) {
        self.pos.y = surface_y - self.size;
        self.vel_y = 0.0;
        self.on_ground = true;
        self.double_jumped = false;
    }

    /// Apply damage unless invincible
    ///
    /// Returns true if the hit landed (the caller applies knockback and checks death).
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.invincible_ticks > 0 {
            return false;
        }
        self.health = (self.health - amount).clamp(0, PLAYER_MAX_HEALTH);
        self.invincible_ticks = INVINCIBLE_TICKS;
        true
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).clamp(0, PLAYER_MAX_HEALTH);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Shove the player horizontally away from a hazard at `source_x`
    pub fn knockback_from(&mut self, source_x: f32, scene: &Scene) {
        if self.pos.x < source_x {
            self.pos.x -= KNOCKBACK_DISTANCE;
        } else {
            self.pos.x += KNOCKBACK_DISTANCE;
        }
        self.clamp_x(scene);
    }

    /// Move back to the spawn point at rest (used between levels)
    pub fn respawn(&mut self, scene: &Scene) {
        self.pos = scene.spawn_point();
        self.vel_y = 0.0;
        self.on_ground = false;
        self.double_jumped = false;
    }

    /// Pull the player back inside the scene after a resize
    pub fn clamp_to_scene(&mut self, scene: &Scene) {
        self.clamp_x(scene);
        self.pos.y = self.pos.y.min(scene.ground_y() - self.size);
    }

    fn clamp_x(&mut self, scene: &Scene) {
        self.pos.x = clamp_span(self.pos.x, 0.0, scene.width - self.size);
    }

    /// Flicker while invincible: hidden for 5 of every 10 ticks
    pub fn is_flash_hidden(&self) -> bool {
        self.invincible_ticks > 0 && self.invincible_ticks % 10 < 5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::default()
    }

    /// Player standing on `platform` with zero velocity
    fn resting_on(platform: &Platform) -> Player {
        let mut player = Player::new(&scene());
        player.pos = Vec2::new(platform.x + 10.0, platform.y - PLAYER_SIZE);
        player.vel_y = 0.0;
        player
    }

    #[test]
    fn test_gravity_accelerates_and_caps() {
        let scene = scene();
        let mut player = Player::new(&scene);
        player.pos.y = 0.0;

        player.update(&[], 0.0, &scene);
        assert_eq!(player.vel_y, GRAVITY);
        assert_eq!(player.pos.y, GRAVITY);

        player.vel_y = TERMINAL_FALL_SPEED;
        player.update(&[], 0.0, &scene);
        assert_eq!(player.vel_y, TERMINAL_FALL_SPEED);
    }

    #[test]
    fn test_resting_player_stays_on_platform() {
        let scene = scene();
        let platform = Platform::floating(300.0, 400.0, 120.0);
        let mut player = resting_on(&platform);

        for _ in 0..10 {
            player.update(std::slice::from_ref(&platform), 0.0, &scene);
            assert_eq!(player.rect().bottom(), platform.y);
            assert!(player.on_ground);
            assert_eq!(player.vel_y, 0.0);
        }
    }

    #[test]
    fn test_ground_platform_landing() {
        let scene = scene();
        let ground = Platform::ground(&scene);
        let mut player = Player::new(&scene);
        player.double_jumped = true;

        for _ in 0..120 {
            player.update(std::slice::from_ref(&ground), 0.0, &scene);
        }
        assert!(player.on_ground);
        assert!(!player.double_jumped);
        assert_eq!(player.rect().bottom(), scene.ground_y());
    }

    #[test]
    fn test_hard_floor_without_platforms() {
        let scene = scene();
        let mut player = Player::new(&scene);
        player.vel_y = TERMINAL_FALL_SPEED;

        for _ in 0..60 {
            player.update(&[], 0.0, &scene);
        }
        assert!(player.on_ground);
        assert_eq!(player.pos.y, scene.ground_y() - PLAYER_SIZE);
    }

    #[test]
    fn test_jump_then_double_jump_then_nothing() {
        let scene = scene();
        let ground = Platform::ground(&scene);
        let mut player = resting_on(&ground);
        player.update(std::slice::from_ref(&ground), 0.0, &scene);
        assert!(player.on_ground);

        assert!(player.jump());
        assert!(!player.on_ground);
        assert_eq!(player.vel_y, -JUMP_POWER);

        player.update(std::slice::from_ref(&ground), 0.0, &scene);
        assert!(player.jump());
        assert!(player.double_jumped);
        assert_eq!(player.vel_y, -JUMP_POWER * DOUBLE_JUMP_FACTOR);

        let vel_before = player.vel_y;
        assert!(!player.jump());
        assert_eq!(player.vel_y, vel_before);
    }

    #[test]
    fn test_double_jump_requires_capability() {
        let mut player = Player::new(&scene());
        player.on_ground = false;
        player.can_double_jump = false;
        assert!(!player.jump());
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_head_bump_stops_rise() {
        let scene = scene();
        let ceiling = Platform::floating(100.0, 300.0, 200.0);
        let mut player = Player::new(&scene);
        // Just below the ceiling, rising fast
        player.pos = Vec2::new(150.0, ceiling.rect().bottom() + 2.0);
        player.vel_y = -10.0;

        player.update(std::slice::from_ref(&ceiling), 0.0, &scene);
        assert_eq!(player.pos.y, ceiling.rect().bottom());
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_horizontal_movement_and_facing() {
        let scene = scene();
        let ground = Platform::ground(&scene);
        let mut player = resting_on(&ground);
        let x0 = player.pos.x;

        player.update(std::slice::from_ref(&ground), 1.0, &scene);
        assert_eq!(player.pos.x, x0 + PLAYER_SPEED);
        assert!(player.facing_right);

        player.update(std::slice::from_ref(&ground), -1.0, &scene);
        assert_eq!(player.pos.x, x0);
        assert!(!player.facing_right);
    }

    #[test]
    fn test_nan_axis_ignored() {
        let scene = scene();
        let mut player = Player::new(&scene);
        let x0 = player.pos.x;
        player.update(&[], f32::NAN, &scene);
        assert_eq!(player.pos.x, x0);
    }

    #[test]
    fn test_scene_bounds_clamp() {
        let scene = scene();
        let mut player = Player::new(&scene);
        player.pos.x = 2.0;
        player.update(&[], -1.0, &scene);
        assert_eq!(player.pos.x, 0.0);

        player.pos.x = scene.width - PLAYER_SIZE - 1.0;
        player.update(&[], 1.0, &scene);
        assert_eq!(player.pos.x, scene.width - PLAYER_SIZE);
    }

    #[test]
    fn test_take_damage_and_invincibility() {
        let scene = scene();
        let mut player = Player::new(&scene);

        assert!(player.take_damage(10));
        assert_eq!(player.health, 90);
        assert_eq!(player.invincible_ticks, INVINCIBLE_TICKS);

        assert!(!player.take_damage(10));
        assert_eq!(player.health, 90);

        for _ in 0..INVINCIBLE_TICKS {
            player.update(&[], 0.0, &scene);
        }
        assert_eq!(player.invincible_ticks, 0);
        assert!(player.take_damage(10));
        assert_eq!(player.health, 80);
    }

    #[test]
    fn test_health_clamped() {
        let mut player = Player::new(&scene());
        player.take_damage(250);
        assert_eq!(player.health, 0);
        assert!(player.is_dead());

        player.heal(500);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_knockback_direction() {
        let scene = scene();
        let mut player = Player::new(&scene);
        player.pos.x = 200.0;
        player.knockback_from(220.0, &scene);
        assert_eq!(player.pos.x, 170.0);
        player.knockback_from(100.0, &scene);
        assert_eq!(player.pos.x, 200.0);

        player.pos.x = 10.0;
        player.knockback_from(40.0, &scene);
        assert_eq!(player.pos.x, 0.0);
    }

    #[test]
    fn test_flash_pattern() {
        let mut player = Player::new(&scene());
        assert!(!player.is_flash_hidden());
        player.invincible_ticks = 24;
        assert!(player.is_flash_hidden());
        player.invincible_ticks = 27;
        assert!(!player.is_flash_hidden());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn player_stays_in_scene(
                moves in proptest::collection::vec((-1.0f32..=1.0, any::<bool>()), 10..200)
            ) {
                let scene = Scene::default();
                let platforms = vec![
                    Platform::ground(&scene),
                    Platform::floating(150.0, scene.height - 150.0, 100.0),
                    Platform::floating(350.0, scene.height - 200.0, 100.0),
                ];
                let mut player = Player::new(&scene);

                for &(axis, jump) in &moves {
                    if jump {
                        player.jump();
                    }
                    player.update(&platforms, axis, &scene);

                    prop_assert!(player.pos.x >= 0.0);
                    prop_assert!(player.pos.x <= scene.width - player.size);
                    prop_assert!(player.rect().bottom() <= scene.ground_y());
                    prop_assert!(player.vel_y <= TERMINAL_FALL_SPEED);
                    if player.on_ground {
                        prop_assert!(!player.double_jumped);
                    }
                }
            }

            #[test]
            fn resting_player_lands_on_any_platform(
                x in 0i32..=600,
                y in 60i32..=500,
                width in 40i32..=200,
                offset in 0.0f32..1.0,
                vel_y in 0.0f32..=TERMINAL_FALL_SPEED
            ) {
                let scene = Scene::default();
                let platform = Platform::floating(x as f32, y as f32, width as f32);
                let platforms = vec![Platform::ground(&scene), platform.clone()];
                let mut player = Player::new(&scene);
                player.pos = Vec2::new(
                    platform.x + offset * (platform.width - 1.0),
                    platform.y - PLAYER_SIZE,
                );
                player.vel_y = vel_y;

                player.update(&platforms, 0.0, &scene);

                prop_assert_eq!(player.rect().bottom(), platform.y);
                prop_assert!(player.on_ground);
                prop_assert_eq!(player.vel_y, 0.0);
            }

            #[test]
            fn health_stays_in_range(hits in proptest::collection::vec(-50i32..200, 1..30)) {
                let mut player = Player::new(&Scene::default());
                for &amount in &hits {
                    player.invincible_ticks = 0;
                    player.take_damage(amount);
                    prop_assert!((0..=PLAYER_MAX_HEALTH).contains(&player.health));
                }
            }
        }
    }
}
