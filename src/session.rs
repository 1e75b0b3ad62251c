//! Per-run session context — run clock, lifecycle hooks, and `SessionPlugin`.
//!
//! A "session" is everything with the lifetime of a single run: the player
//! avatar, live enemies and bullets, the HUD tree, and the resources that
//! track phase, score, and elapsed time. The plugin builds all of it on the
//! way into `Playing` and sweeps all of it on the way out, so states never
//! leak entities into each other.

use bevy::prelude::*;

use crate::combat::{bullet_hit_system, player_contact_system};
use crate::config::GameConfig;
use crate::enemy::{attach_enemy_mesh_system, enemy_chase_system, Enemy};
use crate::menu::GameState;
use crate::player::{
    attach_bullet_mesh_system, attach_player_mesh_system, bullet_lifetime_system,
    player_fire_system, player_move_system, spawn_player, Bullet, FireCooldown, Player,
    PlayerScore,
};
use crate::rendering::{
    refresh_hp_bar_system, refresh_kill_counter_system, refresh_phase_label_system, setup_hud,
    HudRoot,
};
use crate::waves::{enemy_spawn_system, phase_clock_system, PhaseState};

// ── Resources ─────────────────────────────────────────────────────────────────

/// Wall-clock seconds accumulated while the current run sits in `Playing`.
///
/// Menus and the pause overlay do not advance it, so the game-over summary
/// reports active survival time rather than time-since-launch.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SessionClock {
    pub elapsed_secs: f32,
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Advance the session clock by the frame delta.
pub fn session_clock_system(time: Res<Time>, mut clock: ResMut<SessionClock>) {
    clock.elapsed_secs += time.delta_secs();
}

/// Reset every per-run resource to its phase-one baseline.
///
/// Runs on both `MainMenu → Playing` and `GameOver → Playing`, so a new run
/// never inherits the previous run's phase, score, or fire cooldown.
pub fn reset_session_state(
    config: Res<GameConfig>,
    mut phase_state: ResMut<PhaseState>,
    mut clock: ResMut<SessionClock>,
    mut score: ResMut<PlayerScore>,
    mut cooldown: ResMut<FireCooldown>,
) {
    *phase_state = PhaseState::new(&config);
    clock.elapsed_secs = 0.0;
    score.reset();
    cooldown.timer = 0.0;
    info!(
        "[session] new run: phase {}, spawn interval {} ms",
        phase_state.phase, phase_state.spawn_interval_ms
    );
}

/// Despawn every entity belonging to the current run.
///
/// Covers the player avatar, live enemies, bullets in flight, and the HUD
/// tree. Any of the four may already be gone (the avatar after a game over,
/// enemies after a fresh start), so this is a sweep, not a checklist.
pub fn cleanup_session_entities(
    mut commands: Commands,
    doomed: Query<Entity, Or<(With<Player>, With<Enemy>, With<Bullet>, With<HudRoot>)>>,
) {
    for entity in doomed.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers the session resources, the per-frame gameplay loop, and the
/// session build/teardown hooks on state transitions.
///
/// Per-frame order inside `Update` is a single chain: input and movement
/// first, then the clocks, then spawning. Hit resolution runs in
/// `PostUpdate`, after the physics step has moved everything for the frame.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhaseState>()
            .init_resource::<SessionClock>()
            .init_resource::<PlayerScore>()
            .init_resource::<FireCooldown>()
            .add_systems(
                Update,
                (
                    player_move_system, // FIRST: velocities for this frame's physics step
                    player_fire_system,
                    bullet_lifetime_system,
                    enemy_chase_system,
                    session_clock_system,
                    phase_clock_system, // phase transitions before the spawn roll
                    enemy_spawn_system,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (
                    attach_player_mesh_system,
                    attach_enemy_mesh_system,
                    attach_bullet_mesh_system,
                    refresh_hp_bar_system,
                    refresh_kill_counter_system,
                    refresh_phase_label_system,
                )
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                PostUpdate,
                (bullet_hit_system, player_contact_system)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnEnter(GameState::MainMenu), cleanup_session_entities)
            .add_systems(
                OnTransition {
                    exited: GameState::MainMenu,
                    entered: GameState::Playing,
                },
                (reset_session_state, spawn_player, setup_hud).chain(),
            )
            .add_systems(
                OnTransition {
                    exited: GameState::GameOver,
                    entered: GameState::Playing,
                },
                (
                    cleanup_session_entities,
                    reset_session_state,
                    spawn_player,
                    setup_hud,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<SessionClock>();
        app.add_systems(Update, session_clock_system);
        app
    }

    #[test]
    fn clock_accumulates_frame_deltas() {
        let mut app = clock_app();

        // First update has a zero delta; later updates advance the clock.
        app.update();
        std::thread::sleep(std::time::Duration::from_millis(5));
        app.update();

        assert!(app.world().resource::<SessionClock>().elapsed_secs > 0.0);
    }

    #[test]
    fn reset_restores_the_phase_one_baseline() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.insert_resource(PhaseState {
            phase: 7,
            time_in_phase: 30.0,
            spawn_interval_ms: 300,
            spawn_timer: 0.1,
            boss_spawned: true,
        });
        app.insert_resource(SessionClock { elapsed_secs: 412.0 });
        app.insert_resource(PlayerScore { kills: 99 });
        app.insert_resource(FireCooldown { timer: 0.1 });
        app.add_systems(Update, reset_session_state);

        app.update();

        let phase_state = app.world().resource::<PhaseState>();
        assert_eq!(phase_state.phase, 1);
        assert_eq!(phase_state.spawn_interval_ms, 900);
        assert!(!phase_state.boss_spawned);
        assert_eq!(app.world().resource::<SessionClock>().elapsed_secs, 0.0);
        assert_eq!(app.world().resource::<PlayerScore>().kills, 0);
        assert_eq!(app.world().resource::<FireCooldown>().timer, 0.0);
    }

    #[test]
    fn cleanup_sweeps_only_session_entities() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, cleanup_session_entities);

        let player = app.world_mut().spawn(Player::default()).id();
        let enemy = app
            .world_mut()
            .spawn(Enemy {
                kind: crate::enemy::EnemyKind::Crawler,
                speed: 60.0,
                damage: 10.0,
            })
            .id();
        let bullet = app.world_mut().spawn(Bullet::default()).id();
        let bystander = app.world_mut().spawn(Transform::default()).id();

        app.update();

        assert!(app.world().get_entity(player).is_err());
        assert!(app.world().get_entity(enemy).is_err());
        assert!(app.world().get_entity(bullet).is_err());
        assert!(app.world().get_entity(bystander).is_ok());
    }
}
