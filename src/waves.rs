//! Difficulty phases and enemy spawning.
//!
//! A run advances through fixed-length phases (60 s by default).  Every
//! transition shortens the spawn interval (`max(floor, base − phase·step)` ms,
//! monotonically non-increasing), grants every live enemy a flat speed bonus,
//! and replaces the spawn timer with the new interval so there is never more
//! than one cadence in flight.
//!
//! Phase 1 draws uniformly from the five base kinds; phase 2 onward adds
//! bruisers and reapers.  The overlord is never part of a pool: the first draw
//! of the boss phase is forced to it, exactly once per run.

use crate::config::GameConfig;
use crate::enemy::{spawn_enemy, Enemy, EnemyKind};
use bevy::prelude::*;
use rand::Rng;

// ── Session state ─────────────────────────────────────────────────────────────

/// Difficulty and spawn-cadence state for the current run.
#[derive(Resource, Debug, Clone)]
pub struct PhaseState {
    /// Current phase, starting at 1.
    pub phase: u32,
    /// Seconds elapsed inside the current phase.
    pub time_in_phase: f32,
    /// Current spawn interval (ms).
    pub spawn_interval_ms: u32,
    /// Seconds until the next spawn attempt.
    pub spawn_timer: f32,
    /// Latched once the one-per-run boss has been injected.
    pub boss_spawned: bool,
}

impl PhaseState {
    /// Fresh phase-1 state under `config`.
    pub fn new(config: &GameConfig) -> Self {
        let interval_ms = spawn_interval_ms_for(1, config);
        Self {
            phase: 1,
            time_in_phase: 0.0,
            spawn_interval_ms: interval_ms,
            spawn_timer: interval_ms as f32 / 1000.0,
            boss_spawned: false,
        }
    }

    /// Advances the phase clock by `dt` seconds and returns how many phase
    /// transitions were crossed (usually 0 or 1; a large `dt` crosses
    /// several, each applying its own interval update).
    ///
    /// Crossing a boundary replaces the spawn timer with the new interval.
    pub fn advance(&mut self, dt: f32, config: &GameConfig) -> u32 {
        self.time_in_phase += dt;
        let mut crossed = 0;
        while self.time_in_phase >= config.phase_duration_secs {
            self.time_in_phase -= config.phase_duration_secs;
            self.phase += 1;
            self.spawn_interval_ms = spawn_interval_ms_for(self.phase, config);
            self.spawn_timer = self.spawn_interval_ms as f32 / 1000.0;
            crossed += 1;
        }
        crossed
    }
}

impl Default for PhaseState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

// ── Pure helpers ──────────────────────────────────────────────────────────────

/// Spawn interval (ms) for `phase`: `max(floor, base − phase·step)`.
/// Monotonically non-increasing in `phase`.
pub fn spawn_interval_ms_for(phase: u32, config: &GameConfig) -> u32 {
    let reduction = phase.saturating_mul(config.spawn_interval_step_ms);
    config
        .spawn_interval_base_ms
        .saturating_sub(reduction)
        .max(config.spawn_interval_floor_ms)
}

/// Kinds a given phase may draw from.  The overlord is never pooled.
pub fn pool_for_phase(phase: u32) -> &'static [EnemyKind] {
    const BASE: [EnemyKind; 5] = [
        EnemyKind::Crawler,
        EnemyKind::Chaser,
        EnemyKind::Bouncer,
        EnemyKind::Leaper,
        EnemyKind::Exploder,
    ];
    const EXPANDED: [EnemyKind; 7] = [
        EnemyKind::Crawler,
        EnemyKind::Chaser,
        EnemyKind::Bouncer,
        EnemyKind::Leaper,
        EnemyKind::Exploder,
        EnemyKind::Bruiser,
        EnemyKind::Reaper,
    ];
    if phase >= 2 {
        &EXPANDED
    } else {
        &BASE
    }
}

/// Draws the kind for the next spawn.
///
/// The first draw of the boss phase is forced to the overlord and latches
/// `boss_spawned`; every other draw is uniform over the phase pool.
pub fn select_spawn_kind(
    state: &mut PhaseState,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> EnemyKind {
    if state.phase == config.boss_phase && !state.boss_spawned {
        state.boss_spawned = true;
        return EnemyKind::Overlord;
    }
    let pool = pool_for_phase(state.phase);
    pool[rng.gen_range(0..pool.len())]
}

/// Picks a spawn point: a uniform draw among the four arena edges, a uniform
/// position along that edge's span, offset outward by `buffer`.
pub fn edge_spawn_point(
    arena_width: f32,
    arena_height: f32,
    buffer: f32,
    rng: &mut impl Rng,
) -> Vec2 {
    let half_w = arena_width / 2.0;
    let half_h = arena_height / 2.0;
    match rng.gen_range(0..4u32) {
        0 => Vec2::new(rng.gen_range(-half_w..=half_w), half_h + buffer), // top
        1 => Vec2::new(rng.gen_range(-half_w..=half_w), -half_h - buffer), // bottom
        2 => Vec2::new(-half_w - buffer, rng.gen_range(-half_h..=half_h)), // left
        _ => Vec2::new(half_w + buffer, rng.gen_range(-half_h..=half_h)), // right
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Ticks the phase clock; on every transition crossed, buffs each live
/// enemy's speed and logs the new cadence.
pub fn phase_clock_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut phase_state: ResMut<PhaseState>,
    mut q_enemies: Query<&mut Enemy>,
) {
    let crossed = phase_state.advance(time.delta_secs(), &config);
    if crossed == 0 {
        return;
    }

    let bonus = crossed as f32 * config.phase_speed_step;
    let mut buffed = 0u32;
    for mut enemy in q_enemies.iter_mut() {
        enemy.speed += bonus;
        buffed += 1;
    }
    info!(
        "[waves] phase {}: spawn interval {} ms, {} live enemies sped up by {}",
        phase_state.phase, phase_state.spawn_interval_ms, buffed, bonus
    );
}

/// Counts down the spawn timer; on expiry resets it to the current interval
/// and spawns one enemy at an arena edge.
///
/// At the live cap the spawn itself is skipped but the timer still resets,
/// so the cadence is unchanged once room frees up.  The cap check runs before
/// the kind draw so a skipped spawn cannot consume the boss injection.
pub fn enemy_spawn_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut phase_state: ResMut<PhaseState>,
    q_enemies: Query<(), With<Enemy>>,
) {
    phase_state.spawn_timer -= time.delta_secs();
    if phase_state.spawn_timer > 0.0 {
        return;
    }
    phase_state.spawn_timer = phase_state.spawn_interval_ms as f32 / 1000.0;

    if q_enemies.iter().count() as u32 >= config.max_live_enemies {
        return;
    }

    let mut rng = rand::thread_rng();
    let kind = select_spawn_kind(&mut phase_state, &config, &mut rng);
    let position = edge_spawn_point(
        config.arena_width,
        config.arena_height,
        config.edge_spawn_buffer,
        &mut rng,
    );
    spawn_enemy(&mut commands, kind, position);

    if kind == EnemyKind::Overlord {
        info!("[waves] overlord takes the field at {:?}", position);
    }
}
