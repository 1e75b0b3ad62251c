//! Menu and overlay suite — the `GameState` machine and the screens around a run.
//!
//! ## States
//!
//! | State      | Description                                 |
//! |------------|---------------------------------------------|
//! | `MainMenu` | Initial state; splash screen shown          |
//! | `Playing`  | Run active; all gameplay systems live       |
//! | `Paused`   | Run frozen; pause overlay visible           |
//! | `GameOver` | Run dead; final-score overlay visible       |
//!
//! ## Screens (registered by `MenuPlugin`)
//!
//! | Screen     | Built on                | Torn down on        | Input handler (state-gated)  |
//! |------------|-------------------------|---------------------|------------------------------|
//! | Main menu  | `OnEnter(MainMenu)`     | `OnExit(MainMenu)`  | `menu_button_system`         |
//! | Pause      | `OnEnter(Paused)`       | `OnExit(Paused)`    | `pause_menu_button_system`   |
//! | Game over  | `OnEnter(GameOver)`     | `OnExit(GameOver)`  | `game_over_button_system`    |
//!
//! The Rapier physics pipeline is switched off on entry to every non-`Playing`
//! state and back on via `OnEnter(Playing)`, so nothing moves underneath an
//! overlay. Session setup and teardown (player spawn, resource resets, entity
//! sweeps) live in [`crate::session::SessionPlugin`], keyed off the same
//! transitions.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::player::PlayerScore;
use crate::session::SessionClock;
use crate::waves::PhaseState;

mod common;
mod game_over;
mod main_menu;
mod pause;
pub mod types;

pub use types::*;

use common::*;
use game_over::*;
use main_menu::*;
use pause::*;

/// Registers `GameState`, every menu screen, and the pause-gating of physics.
///
/// This plugin must be added to the app **before** any plugin that calls
/// `.run_if(in_state(GameState::Playing))`, so the state is always registered
/// first.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            // ── Main menu ─────────────────────────────────────────────────────
            .add_systems(
                OnEnter(GameState::MainMenu),
                (setup_main_menu, pause_physics),
            )
            .add_systems(OnExit(GameState::MainMenu), cleanup_main_menu)
            .add_systems(
                Update,
                menu_button_system.run_if(in_state(GameState::MainMenu)),
            )
            // ── Pause overlay ─────────────────────────────────────────────────
            .add_systems(OnEnter(GameState::Paused), (setup_pause_menu, pause_physics))
            .add_systems(OnExit(GameState::Paused), cleanup_pause_menu)
            .add_systems(
                Update,
                toggle_pause_system.run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (pause_resume_input_system, pause_menu_button_system)
                    .run_if(in_state(GameState::Paused)),
            )
            // ── Game-over overlay ─────────────────────────────────────────────
            .add_systems(
                OnEnter(GameState::GameOver),
                (setup_game_over, pause_physics),
            )
            .add_systems(OnExit(GameState::GameOver), cleanup_game_over)
            .add_systems(
                Update,
                game_over_button_system.run_if(in_state(GameState::GameOver)),
            )
            // The physics pipeline steps only while a run is live.
            .add_systems(OnEnter(GameState::Playing), resume_physics);
    }
}
