//! Host glue
//!
//! Turns wall-clock frame time into whole simulation ticks and raw key
//! presses into per-tick [`TickInput`] intents.

use crate::consts::SIM_DT;
use crate::sim::TickInput;

/// Longest frame the clock will account for (seconds)
pub const MAX_FRAME_SECONDS: f32 = 0.1;

/// Fixed-step accumulator
#[derive(Debug, Clone)]
pub struct FrameClock {
    accumulator: f32,
    max_substeps: u32,
}

impl FrameClock {
    pub fn new(max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            max_substeps: max_substeps.max(1),
        }
    }

    /// Add a frame's elapsed seconds and return how many ticks to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_SECONDS)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < self.max_substeps {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Drop any partial tick (after a pause or focus loss)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
    Pause,
    Restart,
    Confirm,
}

impl Key {
    /// Map a key name (browser `KeyboardEvent.key` style) onto a game key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "a" | "A" | "ArrowLeft" => Some(Key::Left),
            "d" | "D" | "ArrowRight" => Some(Key::Right),
            " " | "Space" | "w" | "W" | "ArrowUp" => Some(Key::Jump),
            "Escape" => Some(Key::Pause),
            "r" | "R" => Some(Key::Restart),
            "Enter" => Some(Key::Confirm),
            _ => None,
        }
    }
}

/// A key that fires once per press
#[derive(Debug, Clone, Copy, Default)]
struct OneShot {
    held: bool,
    pending: bool,
}

impl OneShot {
    fn press(&mut self) {
        if !self.held {
            self.pending = true;
        }
        self.held = true;
    }

    fn release(&mut self) {
        self.held = false;
    }
}

/// Keyboard state between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left_held: bool,
    right_held: bool,
    jump: OneShot,
    pause: OneShot,
    restart: OneShot,
    confirm: OneShot,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Auto-repeat of an already held key does not re-trigger.
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left_held = true,
            Key::Right => self.right_held = true,
            Key::Jump => self.jump.press(),
            Key::Pause => self.pause.press(),
            Key::Restart => self.restart.press(),
            Key::Confirm => self.confirm.press(),
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left_held = false,
            Key::Right => self.right_held = false,
            Key::Jump => self.jump.release(),
            Key::Pause => self.pause.release(),
            Key::Restart => self.restart.release(),
            Key::Confirm => self.confirm.release(),
        }
    }

    /// Horizontal axis from held keys; opposite keys cancel
    pub fn move_axis(&self) -> f32 {
        match (self.left_held, self.right_held) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Intents for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            move_axis: self.move_axis(),
            jump: self.jump.pending,
            pause: self.pause.pending,
            restart: self.restart.pending,
            confirm: self.confirm.pending,
        }
    }

    /// Clear one-shot inputs after a tick consumed them
    pub fn clear_one_shots(&mut self) {
        self.jump.pending = false;
        self.pause.pending = false;
        self.restart.pending = false;
        self.confirm.pending = false;
    }

    /// Release everything (focus lost)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_yields_whole_ticks() {
        let mut clock = FrameClock::new(8);
        assert_eq!(clock.advance(SIM_DT * 0.5), 0);
        assert_eq!(clock.advance(SIM_DT * 0.6), 1);
        assert_eq!(clock.advance(SIM_DT * 2.0), 2);
    }

    #[test]
    fn test_clock_clamps_long_frames() {
        // A 5 second hitch still only covers 0.1 s worth of ticks
        let mut hitch = FrameClock::new(100);
        let mut capped = FrameClock::new(100);
        let ticks = hitch.advance(5.0);
        assert_eq!(ticks, capped.advance(MAX_FRAME_SECONDS));
        assert!(ticks <= 6);

        let mut clock = FrameClock::new(2);
        assert_eq!(clock.advance(0.1), 2);

        let mut clock = FrameClock::new(8);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(-1.0), 0);
    }

    #[test]
    fn test_reset_drops_partial_tick() {
        let mut clock = FrameClock::new(8);
        assert_eq!(clock.advance(SIM_DT * 0.9), 0);
        clock.reset();
        assert_eq!(clock.advance(SIM_DT * 0.5), 0);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("a"), Some(Key::Left));
        assert_eq!(Key::from_name("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_name(" "), Some(Key::Jump));
        assert_eq!(Key::from_name("Escape"), Some(Key::Pause));
        assert_eq!(Key::from_name("q"), None);
    }

    #[test]
    fn test_held_axis() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        assert_eq!(input.move_axis(), -1.0);
        input.key_down(Key::Right);
        assert_eq!(input.move_axis(), 0.0);
        input.key_up(Key::Left);
        assert_eq!(input.move_axis(), 1.0);
    }

    #[test]
    fn test_one_shots_fire_once() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        input.key_down(Key::Jump);

        let first = input.tick_input();
        assert!(first.jump);
        assert_eq!(first.move_axis, 1.0);
        input.clear_one_shots();

        let second = input.tick_input();
        assert!(!second.jump);
        // Held keys survive the clear
        assert_eq!(second.move_axis, 1.0);

        input.release_all();
        assert_eq!(input.tick_input().move_axis, 0.0);
    }

    #[test]
    fn test_auto_repeat_does_not_retrigger() {
        let mut input = InputState::new();
        input.key_down(Key::Jump);
        assert!(input.tick_input().jump);
        input.clear_one_shots();

        // OS key repeat while still held
        input.key_down(Key::Jump);
        input.key_down(Key::Confirm);
        input.key_down(Key::Confirm);
        let held = input.tick_input();
        assert!(!held.jump);
        assert!(held.confirm);
        input.clear_one_shots();
        input.key_down(Key::Confirm);
        assert!(!input.tick_input().confirm);

        // A fresh press after release fires again
        input.key_up(Key::Jump);
        input.key_down(Key::Jump);
        assert!(input.tick_input().jump);
    }
}
