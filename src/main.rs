//! Adventure Dash entry point
//!
//! Headless native driver: runs the fixed-step loop against a scripted
//! keyboard, forwards events to a logging audio backend and prints the final
//! render snapshot as JSON.

use adventure_dash::audio::LogBackend;
use adventure_dash::consts::*;
use adventure_dash::platform::{FrameClock, InputState, Key};
use adventure_dash::sim::{GameEvent, GamePhase, GameState, tick};
use adventure_dash::{AudioManager, Settings};

/// Two minutes of simulated play
const MAX_FRAMES: u32 = TICK_RATE_HZ * 120;
/// Scripted jump cadence (frames)
const JUMP_EVERY: u32 = 45;
/// Frame on which the script pauses to the menu, and how long it stays there
const PAUSE_AT: u32 = TICK_RATE_HZ * 10;
const PAUSE_FRAMES: u32 = 30;

/// A scripted key transition
enum Press {
    Down(&'static str),
    Up(&'static str),
}

fn main() {
    env_logger::init();
    log::info!("Adventure Dash (headless) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed {}, sfx volume {:.2}", seed, settings.effective_volume());

    let mut state = GameState::with_scene(seed, settings.scene());
    let mut audio = AudioManager::from_settings(Some(Box::new(LogBackend)), &settings);
    let mut clock = FrameClock::new(settings.max_substeps());
    let mut input = InputState::new();

    for frame in 0..MAX_FRAMES {
        for press in scripted_keys(frame) {
            let (name, down) = match press {
                Press::Down(name) => (name, true),
                Press::Up(name) => (name, false),
            };
            let Some(key) = Key::from_name(name) else {
                continue;
            };
            if down {
                input.key_down(key);
            } else {
                input.key_up(key);
            }
        }

        for _ in 0..clock.advance(SIM_DT) {
            tick(&mut state, &input.tick_input());
            input.clear_one_shots();

            let events = state.drain_events();
            audio.handle_events(&events);
            let left_play = events.iter().any(|e| {
                matches!(
                    e,
                    GameEvent::PhaseChanged {
                        from: GamePhase::Playing,
                        ..
                    }
                )
            });
            if left_play {
                // Menu behaves like a focus loss: nothing stays held, no backlog on return
                input.release_all();
                clock.reset();
                break;
            }
        }

        if matches!(state.phase, GamePhase::GameOver | GamePhase::Victory) {
            break;
        }
    }

    log::info!(
        "Finished in {:?}: level {}/{}, health {}, coins {}, {} ticks",
        state.phase,
        state.level,
        state.max_levels,
        state.player.health,
        state.player.coins,
        state.time_ticks
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

/// Start from the menu, hold right, hop regularly, and take one break in the menu
fn scripted_keys(frame: u32) -> Vec<Press> {
    match frame {
        0 => vec![Press::Down("Enter"), Press::Down("ArrowRight")],
        1 => vec![Press::Up("Enter")],
        PAUSE_AT => vec![Press::Down("Escape")],
        f if f == PAUSE_AT + 1 => vec![Press::Up("Escape")],
        f if f == PAUSE_AT + PAUSE_FRAMES => {
            vec![Press::Down("Enter"), Press::Down("ArrowRight")]
        }
        f if f == PAUSE_AT + PAUSE_FRAMES + 1 => vec![Press::Up("Enter")],
        f => match f % JUMP_EVERY {
            0 => vec![Press::Down(" ")],
            2 => vec![Press::Up(" ")],
            // Double jump near the apex
            20 => vec![Press::Down("ArrowUp")],
            22 => vec![Press::Up("ArrowUp")],
            _ => Vec::new(),
        },
    }
}
