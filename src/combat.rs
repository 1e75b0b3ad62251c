//! Hit resolution — bullets against enemies, enemies against the player.
//!
//! Both systems consume Rapier's `CollisionEvent::Started` messages in
//! `PostUpdate`, after the physics step has moved everything for the frame.
//!
//! Resolution rules:
//!
//! - A bullet is spent by its first contact: it despawns whether or not the
//!   enemy survives, and never damages a second enemy.
//! - Damage is accumulated per enemy and applied once per frame, so two
//!   bullets landing together score a single kill instead of two despawns.
//! - An enemy that reaches the player despawns unconditionally, whatever its
//!   remaining health, and scores nothing.
//! - Player health is floored at zero; when it gets there the avatar
//!   despawns and the state machine leaves `Playing`, which is what freezes
//!   the rest of the simulation. The avatar being gone also makes the
//!   transition fire exactly once.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::config::GameConfig;
use crate::enemy::{Enemy, EnemyHealth};
use crate::menu::GameState;
use crate::player::{Bullet, Player, PlayerHealth, PlayerScore};
use crate::session::SessionClock;

/// Apply one frame's accumulated bullet damage and despawn whatever it kills.
fn apply_bullet_damage(
    commands: &mut Commands,
    score: &mut PlayerScore,
    enemies: &mut Query<&mut EnemyHealth, With<Enemy>>,
    damage_by_enemy: HashMap<Entity, f32>,
    kill_score: u32,
) {
    for (enemy, damage) in damage_by_enemy {
        // The enemy may have been removed by an earlier event this frame.
        let Ok(mut health) = enemies.get_mut(enemy) else {
            continue;
        };
        health.hp -= damage;
        if health.hp <= 0.0 {
            commands.entity(enemy).despawn();
            score.record_kills(kill_score);
        }
    }
}

/// Resolve bullet/enemy contacts reported by the physics step.
pub fn bullet_hit_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut score: ResMut<PlayerScore>,
    mut collisions: MessageReader<CollisionEvent>,
    q_bullets: Query<(), With<Bullet>>,
    mut q_enemies: Query<&mut EnemyHealth, With<Enemy>>,
) {
    let mut spent_bullets: HashSet<Entity> = HashSet::new();
    let mut damage_by_enemy: HashMap<Entity, f32> = HashMap::new();

    for event in collisions.read() {
        let CollisionEvent::Started(e1, e2, _) = event else {
            continue;
        };
        let (bullet, enemy) = if q_bullets.contains(*e1) && q_enemies.contains(*e2) {
            (*e1, *e2)
        } else if q_bullets.contains(*e2) && q_enemies.contains(*e1) {
            (*e2, *e1)
        } else {
            continue;
        };

        // One hit per bullet; contacts beyond the first are ignored.
        if !spent_bullets.insert(bullet) {
            continue;
        }
        commands.entity(bullet).despawn();
        *damage_by_enemy.entry(enemy).or_insert(0.0) += config.bullet_damage;
    }

    apply_bullet_damage(
        &mut commands,
        &mut score,
        &mut q_enemies,
        damage_by_enemy,
        config.kill_score,
    );
}

/// Resolve enemy/player contacts reported by the physics step.
pub fn player_contact_system(
    mut commands: Commands,
    mut collisions: MessageReader<CollisionEvent>,
    q_enemies: Query<&Enemy>,
    mut q_player: Query<(Entity, &mut PlayerHealth), With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
    score: Res<PlayerScore>,
    clock: Res<SessionClock>,
) {
    let Ok((player, mut health)) = q_player.single_mut() else {
        return;
    };

    let mut rammed: HashSet<Entity> = HashSet::new();
    let mut total_damage = 0.0;

    for event in collisions.read() {
        let CollisionEvent::Started(e1, e2, _) = event else {
            continue;
        };
        let enemy = if *e1 == player {
            *e2
        } else if *e2 == player {
            *e1
        } else {
            continue;
        };
        let Ok(stats) = q_enemies.get(enemy) else {
            continue;
        };
        if !rammed.insert(enemy) {
            continue;
        }
        // Ramming is always fatal to the enemy, whatever its remaining hp.
        commands.entity(enemy).despawn();
        total_damage += stats.damage;
    }

    if total_damage <= 0.0 {
        return;
    }

    health.hp = (health.hp - total_damage).max(0.0);
    if health.hp <= 0.0 {
        commands.entity(player).despawn();
        next_state.set(GameState::GameOver);
        info!(
            "[combat] run over: {} kills in {:.1} s",
            score.kills, clock.elapsed_secs
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{stats_for, EnemyKind};
    use bevy::state::app::StatesPlugin;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    fn combat_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.insert_state(GameState::Playing);
        app.add_message::<CollisionEvent>();
        app.insert_resource(GameConfig::default());
        app.insert_resource(PlayerScore::default());
        app.insert_resource(SessionClock::default());
        // Same registration shape as the live schedule, gating included.
        app.add_systems(
            PostUpdate,
            (bullet_hit_system, player_contact_system)
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
        app
    }

    fn spawn_enemy_of(app: &mut App, kind: EnemyKind) -> Entity {
        let stats = stats_for(kind);
        app.world_mut()
            .spawn((
                Enemy {
                    kind,
                    speed: stats.speed,
                    damage: stats.damage,
                },
                EnemyHealth {
                    hp: stats.max_hp,
                    max_hp: stats.max_hp,
                },
            ))
            .id()
    }

    fn spawn_bullet(app: &mut App) -> Entity {
        app.world_mut().spawn(Bullet::default()).id()
    }

    fn spawn_player_with_hp(app: &mut App, hp: f32) -> Entity {
        app.world_mut()
            .spawn((Player::default(), PlayerHealth { hp, max_hp: 100.0 }))
            .id()
    }

    fn contact(app: &mut App, a: Entity, b: Entity) {
        app.world_mut()
            .write_message(CollisionEvent::Started(a, b, CollisionEventFlags::empty()));
    }

    fn current_state(app: &App) -> GameState {
        app.world().resource::<State<GameState>>().get().clone()
    }

    #[test]
    fn chaser_dies_to_exactly_two_bullets() {
        let mut app = combat_app();
        let enemy = spawn_enemy_of(&mut app, EnemyKind::Chaser);

        let first = spawn_bullet(&mut app);
        contact(&mut app, first, enemy);
        app.update();

        assert!(app.world().get_entity(first).is_err());
        assert_eq!(app.world().get::<EnemyHealth>(enemy).unwrap().hp, 10.0);
        assert_eq!(app.world().resource::<PlayerScore>().kills, 0);

        // Entity order in the pair is not guaranteed, so flip it here.
        let second = spawn_bullet(&mut app);
        contact(&mut app, enemy, second);
        app.update();

        assert!(app.world().get_entity(second).is_err());
        assert!(app.world().get_entity(enemy).is_err());
        assert_eq!(app.world().resource::<PlayerScore>().kills, 1);
    }

    #[test]
    fn a_bullet_is_spent_by_its_first_contact() {
        let mut app = combat_app();
        let near = spawn_enemy_of(&mut app, EnemyKind::Crawler);
        let far = spawn_enemy_of(&mut app, EnemyKind::Crawler);
        let bullet = spawn_bullet(&mut app);

        contact(&mut app, bullet, near);
        contact(&mut app, bullet, far);
        app.update();

        assert!(app.world().get_entity(bullet).is_err());
        assert_eq!(app.world().get::<EnemyHealth>(near).unwrap().hp, 20.0);
        assert_eq!(app.world().get::<EnemyHealth>(far).unwrap().hp, 30.0);
    }

    #[test]
    fn two_bullets_landing_together_score_one_kill() {
        let mut app = combat_app();
        let enemy = spawn_enemy_of(&mut app, EnemyKind::Chaser);
        let first = spawn_bullet(&mut app);
        let second = spawn_bullet(&mut app);

        contact(&mut app, first, enemy);
        contact(&mut app, second, enemy);
        app.update();

        assert!(app.world().get_entity(enemy).is_err());
        assert_eq!(app.world().resource::<PlayerScore>().kills, 1);
    }

    #[test]
    fn ramming_kills_the_enemy_but_scores_nothing() {
        let mut app = combat_app();
        let player = spawn_player_with_hp(&mut app, 100.0);
        let enemy = spawn_enemy_of(&mut app, EnemyKind::Bruiser);

        contact(&mut app, player, enemy);
        app.update();

        assert!(app.world().get_entity(enemy).is_err());
        assert_eq!(app.world().get::<PlayerHealth>(player).unwrap().hp, 70.0);
        assert_eq!(app.world().resource::<PlayerScore>().kills, 0);
        assert_eq!(current_state(&app), GameState::Playing);
    }

    #[test]
    fn simultaneous_rams_accumulate_into_one_hit() {
        let mut app = combat_app();
        let player = spawn_player_with_hp(&mut app, 50.0);
        let left = spawn_enemy_of(&mut app, EnemyKind::Chaser);
        let right = spawn_enemy_of(&mut app, EnemyKind::Chaser);

        contact(&mut app, left, player);
        contact(&mut app, player, right);
        app.update();

        assert!(app.world().get_entity(left).is_err());
        assert!(app.world().get_entity(right).is_err());
        assert_eq!(app.world().get::<PlayerHealth>(player).unwrap().hp, 10.0);
        assert_eq!(current_state(&app), GameState::Playing);
    }

    #[test]
    fn duplicate_contact_events_damage_once() {
        let mut app = combat_app();
        let player = spawn_player_with_hp(&mut app, 100.0);
        let enemy = spawn_enemy_of(&mut app, EnemyKind::Chaser);

        contact(&mut app, player, enemy);
        contact(&mut app, enemy, player);
        app.update();

        assert_eq!(app.world().get::<PlayerHealth>(player).unwrap().hp, 80.0);
    }

    #[test]
    fn a_heavy_ram_at_low_health_ends_the_run() {
        let mut app = combat_app();
        let player = spawn_player_with_hp(&mut app, 30.0);
        let enemy = spawn_enemy_of(&mut app, EnemyKind::Reaper);

        contact(&mut app, player, enemy);
        app.update();

        // Avatar and enemy are gone; the state change applies next frame.
        assert!(app.world().get_entity(player).is_err());
        assert!(app.world().get_entity(enemy).is_err());

        app.update();
        assert_eq!(current_state(&app), GameState::GameOver);

        // The run is frozen: later contacts must not resolve.
        let straggler = spawn_enemy_of(&mut app, EnemyKind::Crawler);
        let bullet = spawn_bullet(&mut app);
        contact(&mut app, bullet, straggler);
        app.update();

        assert!(app.world().get_entity(straggler).is_ok());
        assert!(app.world().get_entity(bullet).is_ok());
        assert_eq!(app.world().resource::<PlayerScore>().kills, 0);
    }
}
