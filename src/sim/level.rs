//! Level layouts
//!
//! Levels 1 and 2 and the final level are hand-authored; everything in
//! between is generated procedurally. Generation is append-only: platforms
//! first, then coins and the door, which only read the finished platform list.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Coin, Door, Platform, Scene};
use crate::consts::*;

/// Largest vertical step allowed between consecutive procedural platforms
pub const MAX_PLATFORM_STEP: i32 = 100;
/// Replacement offsets used when a random height breaks reachability
const STEP_OFFSETS: [i32; 6] = [-80, -60, -40, 40, 60, 80];
/// Horizontal gap range between chained procedural platforms
const GAP_RANGE: (i32, i32) = (100, 200);
/// Width range of intermediate procedural platforms
const WIDTH_RANGE: (i32, i32) = (80, 140);
/// Width of the final procedural platform (door anchor)
const DOOR_PLATFORM_WIDTH: i32 = 150;
/// Coins float this far above a platform's top
const COIN_HOVER: f32 = 30.0;

/// Hand-authored platforms as (x, height above scene bottom, width)
const LEVEL_1: [(i32, i32, i32); 4] = [
    (150, 150, 100),
    (350, 200, 100),
    (550, 150, 100),
    (700, 200, 100),
];
const LEVEL_2: [(i32, i32, i32); 4] = [
    (100, 180, 120),
    (300, 250, 120),
    (500, 180, 120),
    (650, 300, 150),
];
const BOSS_LEVEL: [(i32, i32, i32); 5] = [
    (100, 200, 100),
    (250, 300, 100),
    (400, 250, 100),
    (550, 350, 100),
    (700, 200, 100),
];

/// How a level index is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    /// Level 1: fixed platforms, one coin on each
    Tutorial,
    /// Level 2: larger fixed platforms, scattered coins, door on the highest platform
    Fixed,
    /// Levels 3..max: chained random platforms
    Procedural,
    /// Final level: fixed staggered layout, lots of coins
    Boss,
}

impl LevelKind {
    pub fn for_level(level: u32, max_levels: u32) -> Self {
        match level {
            _ if level >= max_levels => LevelKind::Boss,
            0 | 1 => LevelKind::Tutorial,
            2 => LevelKind::Fixed,
            _ => LevelKind::Procedural,
        }
    }
}

/// Everything generated for one level
#[derive(Debug, Clone)]
pub struct LevelLayout {
    /// Ground strip first, then floating platforms in generation order
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub door: Door,
}

/// Build the layout for a level
pub fn generate_level<R: Rng + ?Sized>(
    level: u32,
    max_levels: u32,
    scene: &Scene,
    rng: &mut R,
) -> LevelLayout {
    let mut platforms = vec![Platform::ground(scene)];
    let kind = LevelKind::for_level(level, max_levels);
    log::debug!("Generating level {} as {:?}", level, kind);

    match kind {
        LevelKind::Tutorial => {
            platforms.extend(fixed_platforms(&LEVEL_1, scene));
            // One coin sitting centered on every floating platform
            let coins = platforms[1..]
                .iter()
                .map(|p| {
                    Coin::new(
                        p.x + (p.width / 2.0).floor() - COIN_SIZE / 2.0,
                        p.y - COIN_SIZE,
                    )
                })
                .collect();
            let door = door_on_last(&platforms);
            LevelLayout {
                platforms,
                coins,
                door,
            }
        }
        LevelKind::Fixed => {
            platforms.extend(fixed_platforms(&LEVEL_2, scene));
            let coins = scatter_coins(&platforms, 6, rng);
            let highest = platforms[1..]
                .iter()
                .min_by(|a, b| a.y.total_cmp(&b.y))
                .unwrap_or(&platforms[0]);
            let door = Door::on_platform(highest);
            LevelLayout {
                platforms,
                coins,
                door,
            }
        }
        LevelKind::Procedural => {
            platforms.extend(chained_platforms(level, scene, rng));
            let coins = scatter_coins(&platforms, 4 + level as usize, rng);
            let door = door_on_last(&platforms);
            LevelLayout {
                platforms,
                coins,
                door,
            }
        }
        LevelKind::Boss => {
            platforms.extend(fixed_platforms(&BOSS_LEVEL, scene));
            let coins = scatter_coins(&platforms, 10, rng);
            let door = door_on_last(&platforms);
            LevelLayout {
                platforms,
                coins,
                door,
            }
        }
    }
}

fn fixed_platforms<'a>(
    data: &'a [(i32, i32, i32)],
    scene: &'a Scene,
) -> impl Iterator<Item = Platform> + 'a {
    data.iter().map(|&(x, above_bottom, width)| {
        Platform::floating(x as f32, scene.height - above_bottom as f32, width as f32)
    })
}

/// Door on the final platform (the ground strip guarantees the list is non-empty)
fn door_on_last(platforms: &[Platform]) -> Door {
    Door::on_platform(&platforms[platforms.len() - 1])
}

/// Chain `min(4 + level, 8)` platforms left to right with bounded height steps
fn chained_platforms<R: Rng + ?Sized>(level: u32, scene: &Scene, rng: &mut R) -> Vec<Platform> {
    let count = (4 + level).min(8);
    let height = scene.height as i32;
    let min_y = height - 300;
    let max_y = height - 150;
    // Door platform sits a little higher so the door clears the band's floor
    let door_max_y = max_y - 50;

    let mut prev_x = 100;
    let mut prev_y = height - 150;
    let mut platforms = Vec::with_capacity(count as usize);

    for i in 0..count {
        let (x, y, width) = if i == count - 1 {
            let y = rng.random_range(min_y..=door_max_y);
            let y = reachable_y(y, prev_y, min_y, door_max_y, rng);
            (scene.width as i32 - DOOR_PLATFORM_WIDTH, y, DOOR_PLATFORM_WIDTH)
        } else {
            let x = prev_x + rng.random_range(GAP_RANGE.0..=GAP_RANGE.1);
            let y = rng.random_range(min_y..=max_y);
            let y = reachable_y(y, prev_y, min_y, max_y, rng);
            (x, y, rng.random_range(WIDTH_RANGE.0..=WIDTH_RANGE.1))
        };

        platforms.push(Platform::floating(x as f32, y as f32, width as f32));
        prev_x = x + width;
        prev_y = y;
    }

    platforms
}

/// Keep `y` if it is within a jump of `prev_y`, otherwise pick a bounded step
/// from `prev_y` that stays inside `[lo, hi]`
fn reachable_y<R: Rng + ?Sized>(y: i32, prev_y: i32, lo: i32, hi: i32, rng: &mut R) -> i32 {
    if (y - prev_y).abs() <= MAX_PLATFORM_STEP {
        return y;
    }
    let candidates: Vec<i32> = STEP_OFFSETS
        .iter()
        .map(|offset| prev_y + offset)
        .filter(|candidate| (lo..=hi).contains(candidate))
        .collect();
    match candidates.choose(rng) {
        Some(&stepped) => stepped,
        None => prev_y.clamp(lo, hi),
    }
}

/// Place `count` coins on random floating platforms
fn scatter_coins<R: Rng + ?Sized>(platforms: &[Platform], count: usize, rng: &mut R) -> Vec<Coin> {
    let mut coins = Vec::with_capacity(count);
    for _ in 0..count {
        if let Some(platform) = platforms[1..].choose(rng) {
            coins.push(coin_on_platform(platform, rng));
        }
    }
    coins
}

/// A coin hovering at a random spot above `platform`
pub fn coin_on_platform<R: Rng + ?Sized>(platform: &Platform, rng: &mut R) -> Coin {
    let span = (platform.width as i32 - 40).max(20);
    let x = platform.x + rng.random_range(20..=span) as f32;
    Coin::new(x, platform.y - COIN_HOVER)
}
