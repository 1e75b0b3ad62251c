//! Runtime gameplay configuration loaded from `assets/gameplay.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/gameplay.toml` and overwrites the defaults with any values present
//! in the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the constants you care about.
//!
//! Loaded files are range-checked with [`validate_config`]; a file containing
//! an out-of-range value is rejected as a whole and the compiled defaults stay
//! in force.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.player_speed`, `config.spawn_interval_floor_ms`, etc.
//!
//! ## Tuning workflow
//!
//! 1. Edit `assets/gameplay.toml`.
//! 2. Restart the game — no recompilation required.
//! 3. Run `cargo test` to validate the schedule invariants still hold.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{validate_arena, validate_phase_duration, validate_spawn_intervals, GameResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/gameplay.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Arena ─────────────────────────────────────────────────────────────────
    pub arena_width: f32,
    pub arena_height: f32,
    pub edge_spawn_buffer: f32,

    // ── Difficulty Phases ─────────────────────────────────────────────────────
    pub phase_duration_secs: f32,
    pub spawn_interval_base_ms: u32,
    pub spawn_interval_step_ms: u32,
    pub spawn_interval_floor_ms: u32,
    pub phase_speed_step: f32,
    pub boss_phase: u32,
    pub max_live_enemies: u32,

    // ── Player ────────────────────────────────────────────────────────────────
    pub player_speed: f32,
    pub player_max_hp: f32,
    pub player_collider_radius: f32,

    // ── Bullets ───────────────────────────────────────────────────────────────
    pub bullet_speed: f32,
    pub bullet_damage: f32,
    pub bullet_lifetime_secs: f32,
    pub bullet_collider_radius: f32,
    pub fire_cooldown_secs: f32,
    pub max_live_bullets: u32,

    // ── Score ─────────────────────────────────────────────────────────────────
    pub kill_score: u32,

    // ── HUD ───────────────────────────────────────────────────────────────────
    pub hud_font_size: f32,
    pub hud_bar_px_per_hp: f32,
    pub hud_bar_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Arena
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            edge_spawn_buffer: EDGE_SPAWN_BUFFER,
            // Difficulty Phases
            phase_duration_secs: PHASE_DURATION_SECS,
            spawn_interval_base_ms: SPAWN_INTERVAL_BASE_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            spawn_interval_floor_ms: SPAWN_INTERVAL_FLOOR_MS,
            phase_speed_step: PHASE_SPEED_STEP,
            boss_phase: BOSS_PHASE,
            max_live_enemies: MAX_LIVE_ENEMIES,
            // Player
            player_speed: PLAYER_SPEED,
            player_max_hp: PLAYER_MAX_HP,
            player_collider_radius: PLAYER_COLLIDER_RADIUS,
            // Bullets
            bullet_speed: BULLET_SPEED,
            bullet_damage: BULLET_DAMAGE,
            bullet_lifetime_secs: BULLET_LIFETIME_SECS,
            bullet_collider_radius: BULLET_COLLIDER_RADIUS,
            fire_cooldown_secs: FIRE_COOLDOWN_SECS,
            max_live_bullets: MAX_LIVE_BULLETS,
            // Score
            kill_score: KILL_SCORE,
            // HUD
            hud_font_size: HUD_FONT_SIZE,
            hud_bar_px_per_hp: HUD_BAR_PX_PER_HP,
            hud_bar_height: HUD_BAR_HEIGHT,
        }
    }
}

/// Range-checks the fields whose values can break the difficulty schedule or
/// the arena geometry.  Composes the helpers from [`crate::error`].
pub fn validate_config(config: &GameConfig) -> GameResult<()> {
    validate_spawn_intervals(config.spawn_interval_base_ms, config.spawn_interval_floor_ms)?;
    validate_phase_duration(config.phase_duration_secs)?;
    validate_arena(config.arena_width, config.arena_height)?;
    Ok(())
}

/// Startup system: attempt to load `assets/gameplay.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors and
/// out-of-range values are printed to stderr but do not abort the game.  A
/// missing file just leaves the defaults in place (they were inserted via
/// `insert_resource` before this system runs).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/gameplay.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => match validate_config(&loaded) {
                Ok(()) => {
                    *config = loaded;
                    println!("✓ Loaded gameplay config from {path}");
                }
                Err(e) => {
                    eprintln!("⚠ Rejected {path}: {e}; using defaults");
                }
            },
            Err(e) => {
                eprintln!("⚠ Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let config = GameConfig::default();
        assert_eq!(config.arena_width, ARENA_WIDTH);
        assert_eq!(config.spawn_interval_base_ms, SPAWN_INTERVAL_BASE_MS);
        assert_eq!(config.spawn_interval_floor_ms, SPAWN_INTERVAL_FLOOR_MS);
        assert_eq!(config.player_max_hp, PLAYER_MAX_HP);
        assert_eq!(config.bullet_damage, BULLET_DAMAGE);
        assert_eq!(config.max_live_bullets, MAX_LIVE_BULLETS);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: GameConfig =
            toml::from_str("player_speed = 250.0\nboss_phase = 5").expect("partial TOML parses");
        assert_eq!(config.player_speed, 250.0);
        assert_eq!(config.boss_phase, 5);
        // Everything else keeps its compiled default.
        assert_eq!(config.bullet_speed, BULLET_SPEED);
        assert_eq!(config.phase_duration_secs, PHASE_DURATION_SECS);
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(validate_config(&GameConfig::default()).is_ok());
    }

    #[test]
    fn zero_interval_floor_is_rejected() {
        let config = GameConfig {
            spawn_interval_floor_ms: 0,
            ..GameConfig::default()
        };
        let err = validate_config(&config).expect_err("zero floor must fail");
        assert!(err.to_string().contains("spawn_interval_floor_ms"));
    }

    #[test]
    fn floor_above_base_is_rejected() {
        let config = GameConfig {
            spawn_interval_base_ms: 200,
            spawn_interval_floor_ms: 300,
            ..GameConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn negative_phase_duration_is_rejected() {
        let config = GameConfig {
            phase_duration_secs: -1.0,
            ..GameConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
