//! Enemy patrol logic
//!
//! Enemies walk back and forth along whatever platform they stand on and turn
//! around near its edges or at the scene boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, intersects};
use super::state::{Platform, Scene};
use crate::consts::*;

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Horizontal units per tick
    pub speed: f32,
    /// -1.0 = walking left, 1.0 = walking right
    pub direction: f32,
    /// Index into the level's platform list, recomputed every tick
    #[serde(skip)]
    pub bound_platform: Option<usize>,
}

impl Enemy {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: ENEMY_SIZE,
            speed,
            direction: -1.0,
            bound_platform: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    /// Advance one tick of patrol movement
    pub fn update(&mut self, platforms: &[Platform], scene: &Scene) {
        self.pos.x += self.speed * self.direction;

        // Probe one unit down so an enemy resting exactly on a top edge still binds
        let probe = self.rect().translated(Vec2::Y);
        self.bound_platform = platforms
            .iter()
            .position(|p| intersects(&probe, &p.rect()));

        match self.bound_platform.map(|i| &platforms[i]) {
            Some(platform) => {
                if self.pos.x <= platform.x + ENEMY_EDGE_MARGIN {
                    self.direction = 1.0;
                } else if self.pos.x + self.size >= platform.right() - ENEMY_EDGE_MARGIN {
                    self.direction = -1.0;
                }
            }
            None => {
                self.direction = -self.direction;
                let center = self.rect().center_x();
                if let Some(platform) = platforms.iter().find(|p| p.rect().spans_x(center)) {
                    self.pos.y = platform.y - self.size;
                }
            }
        }

        if self.pos.x <= 0.0 {
            self.pos.x = 0.0;
            self.direction = 1.0;
        } else if self.pos.x >= scene.width - self.size {
            self.pos.x = scene.width - self.size;
            self.direction = -1.0;
        }
    }

    /// True once the enemy has wandered well past either side of the scene
    pub fn is_out_of_bounds(&self, scene: &Scene) -> bool {
        self.pos.x < -ENEMY_CULL_DISTANCE || self.pos.x > scene.width + ENEMY_CULL_DISTANCE
    }
}
